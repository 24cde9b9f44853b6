//! User profile domain model
//!
//! The profile document lives at `users/{uid}` next to the `email` and
//! `createdAt` fields written at sign-up. Web clients stored the raw form
//! strings, so numeric fields accept either JSON numbers or numeric strings.

use serde::{Deserialize, Deserializer, Serialize};

/// Minimum accepted height in centimetres
pub const MIN_HEIGHT_CM: f64 = 50.0;

/// Minimum accepted weight in kilograms
pub const MIN_WEIGHT_KG: f64 = 20.0;

/// Minimum accepted age in years
pub const MIN_AGE_YEARS: u32 = 8;

/// Personal metrics of a user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    /// Height in centimetres
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Weight in kilograms
    #[serde(default, deserialize_with = "lenient_f64", skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,

    /// Age in years
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    /// Free-form gender as entered by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl UserProfile {
    /// Creates a fully populated profile
    pub fn new(height: f64, weight: f64, age: u32, gender: impl Into<String>) -> Self {
        Self {
            height: Some(height),
            weight: Some(weight),
            age: Some(age),
            gender: Some(gender.into()),
        }
    }

    /// Validates the minimum height, weight and age
    ///
    /// # Errors
    ///
    /// Returns the first violated rule as a user-facing message.
    pub fn validate(&self) -> Result<(), String> {
        match self.height {
            Some(h) if h >= MIN_HEIGHT_CM => {}
            _ => return Err(format!("Height must be at least {MIN_HEIGHT_CM} cm")),
        }
        match self.weight {
            Some(w) if w >= MIN_WEIGHT_KG => {}
            _ => return Err(format!("Weight must be at least {MIN_WEIGHT_KG} kg")),
        }
        match self.age {
            Some(a) if a >= MIN_AGE_YEARS => {}
            _ => return Err(format!("Age must be at least {MIN_AGE_YEARS} years")),
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|v| v.is_finite()))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_f64(deserializer)?
        .filter(|v| *v >= 0.0 && *v <= u32::MAX as f64)
        .map(|v| v.trunc() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_reads_numbers_and_strings() {
        let numeric: UserProfile =
            serde_json::from_value(json!({"height": 180, "weight": 72.5, "age": 30, "gender": "female"}))
                .unwrap();
        assert_eq!(numeric, UserProfile::new(180.0, 72.5, 30, "female"));

        let textual: UserProfile =
            serde_json::from_value(json!({"height": "180", "weight": "72.5", "age": "30", "gender": "female"}))
                .unwrap();
        assert_eq!(textual, numeric);
    }

    #[test]
    fn test_profile_tolerates_missing_and_blank_fields() {
        let profile: UserProfile =
            serde_json::from_value(json!({"email": "a@b.c", "height": "", "weight": null})).unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_profile_serialization_omits_missing_fields() {
        let profile = UserProfile {
            height: Some(170.0),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&profile).unwrap(), json!({"height": 170.0}));
    }

    #[test]
    fn test_validate_boundaries() {
        assert!(UserProfile::new(50.0, 20.0, 8, "male").validate().is_ok());

        let err = UserProfile::new(49.9, 70.0, 30, "male").validate().unwrap_err();
        assert_eq!(err, "Height must be at least 50 cm");

        let err = UserProfile::new(170.0, 19.0, 30, "male").validate().unwrap_err();
        assert_eq!(err, "Weight must be at least 20 kg");

        let err = UserProfile::new(170.0, 70.0, 7, "male").validate().unwrap_err();
        assert_eq!(err, "Age must be at least 8 years");
    }

    #[test]
    fn test_validate_requires_values() {
        assert!(UserProfile::default().validate().is_err());
    }
}
