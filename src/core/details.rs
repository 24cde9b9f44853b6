//! Details view model
//!
//! Combines the stored profile with derived metrics, and renders the plain
//! text report offered for download.

use crate::adapters::storage::DocumentStore;
use crate::core::metrics::DerivedMetrics;
use crate::core::profile::ProfileService;
use crate::domain::ids::UserId;
use crate::domain::{Result, UserProfile};
use std::sync::Arc;

const REPORT_TITLE: &str = "Be Healthy";
const REPORT_FOOTER: &str = "© 2024 Be Healthy. All rights reserved.";

/// Profile and metrics of one user
#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub email: String,
    pub profile: UserProfile,

    /// `None` while height or weight is missing
    pub metrics: Option<DerivedMetrics>,
}

impl DetailsView {
    /// Build the view from a loaded profile
    pub fn new(email: impl Into<String>, profile: UserProfile) -> Self {
        let metrics = DerivedMetrics::from_profile(&profile);
        Self {
            email: email.into(),
            profile,
            metrics,
        }
    }

    /// `22.22 (Normal weight)`, or `N/A` without metrics
    pub fn bmi_summary(&self) -> String {
        match self.metrics {
            Some(m) => format!("{:.2} ({})", m.bmi, m.category),
            None => "N/A".to_string(),
        }
    }

    /// Plain text report of the user's details
    pub fn render_report(&self) -> String {
        fn field<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "N/A".to_string())
        }

        format!(
            "{REPORT_TITLE}\n\n\
             User Details :\n\
             Email: {}\n\
             Age: {}\n\
             Height: {} cm\n\
             Weight: {} kg\n\
             Gender: {}\n\
             BMI: {}\n\n\
             {REPORT_FOOTER}\n",
            self.email,
            field(&self.profile.age),
            field(&self.profile.height),
            field(&self.profile.weight),
            field(&self.profile.gender),
            self.bmi_summary(),
        )
    }
}

/// Load the details of `user_id`
///
/// Returns `None` when the user has no profile document.
pub async fn load_details(
    store: Arc<dyn DocumentStore>,
    user_id: &UserId,
    email: &str,
) -> Result<Option<DetailsView>> {
    let profile = ProfileService::new(store).load(user_id).await?;
    Ok(profile.map(|p| DetailsView::new(email, p)))
}
