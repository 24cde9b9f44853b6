//! Body mass index

use crate::domain::UserProfile;
use serde::Serialize;
use std::fmt;

/// BMI bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    #[serde(rename = "Underweight")]
    Underweight,
    #[serde(rename = "Normal weight")]
    NormalWeight,
    #[serde(rename = "Overweight")]
    Overweight,
    #[serde(rename = "Obesity")]
    Obesity,
}

impl BmiCategory {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obesity => "Obesity",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compute BMI rounded half-up to two decimals
///
/// Returns `None` unless both inputs are positive finite numbers.
pub fn compute_bmi(height_cm: f64, weight_kg: f64) -> Option<f64> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    if !usable(height_cm) || !usable(weight_kg) {
        return None;
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    Some((bmi * 100.0).round() / 100.0)
}

/// Classify a BMI value
///
/// Buckets are `< 18.5`, `[18.5, 24.9)`, `[25, 29.9)` and everything else.
/// Values in `[24.9, 25)` therefore classify as obesity; stored reports and
/// existing users depend on these exact boundaries.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if (18.5..24.9).contains(&bmi) {
        BmiCategory::NormalWeight
    } else if (25.0..29.9).contains(&bmi) {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obesity
    }
}

/// Metrics derived from a profile, recomputed on every view
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl DerivedMetrics {
    /// Derive metrics, or `None` when height or weight is missing
    pub fn from_profile(profile: &UserProfile) -> Option<Self> {
        let bmi = compute_bmi(profile.height?, profile.weight?)?;
        Some(Self {
            bmi,
            category: classify_bmi(bmi),
        })
    }
}
