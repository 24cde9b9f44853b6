//! Parameter catalog for generated records
//!
//! The numeric bounds, decimal places, units and reference ranges below are
//! part of the generated data contract: downstream charts and range display
//! rely on them.

use crate::domain::record::{Parameter, TestType};
use rand::Rng;

/// A randomly generated quantitative parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericSpec {
    pub name: &'static str,
    /// Lowest generated value
    pub low: f64,
    /// Width of the generated interval; values fall in `[low, low + span]`
    pub span: f64,
    /// Fixed decimal places of the formatted value
    pub decimals: usize,
    pub unit: &'static str,
    /// Reference range shown next to the value
    pub range: Option<&'static str>,
}

impl NumericSpec {
    /// Upper bound of the generated values
    pub fn high(&self) -> f64 {
        self.low + self.span
    }

    /// Draw a value and format it
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Parameter {
        let raw = self.low + rng.gen::<f64>() * self.span;
        let value = format!("{:.*}", self.decimals, raw);

        let parameter = Parameter::measured(self.name, value, self.unit);
        match self.range {
            Some(range) => parameter.with_range(range),
            None => parameter,
        }
    }
}

const fn spec(
    name: &'static str,
    low: f64,
    span: f64,
    decimals: usize,
    unit: &'static str,
    range: Option<&'static str>,
) -> NumericSpec {
    NumericSpec {
        name,
        low,
        span,
        decimals,
        unit,
        range,
    }
}

/// Complete blood count panel, in display order
pub const BLOOD_PANEL: [NumericSpec; 7] = [
    spec("RBC", 4.0, 1.0, 2, "10^6/micl", Some("4-5.2")),
    spec("Hemoglobin", 12.5, 3.5, 1, "g/dL", Some("12.5-16")),
    spec("Hematocrit", 36.0, 6.0, 0, "%", Some("36-42")),
    spec("MCV", 80.0, 20.0, 1, "fL", Some("80-100")),
    spec("Basophils", 0.0, 1.0, 1, "%", Some("0-2")),
    spec("Neutrophils", 1.8, 5.9, 2, "10^3/micl", Some("1.8-7.7")),
    spec("Lymphocytes", 1.0, 3.8, 2, "10^3/micl", Some("1.0-4.8")),
];

/// Lipid and glucose panel
pub const LAB_PANEL: [NumericSpec; 2] = [
    spec("Cholesterol", 100.0, 140.0, 0, "mg/dL", None),
    spec("Blood Sugar", 70.0, 80.0, 0, "mg/dL", None),
];

/// Urine acidity
pub const URINE_PH: NumericSpec = spec("pH", 4.0, 4.0, 1, "", None);

/// Test types drawn for the extra current-year records
pub const EXTRA_TEST_TYPES: [TestType; 8] = [
    TestType::LabTest,
    TestType::Ultrasound,
    TestType::XRay,
    TestType::Mri,
    TestType::CtScan,
    TestType::UrineTest,
    TestType::Biopsy,
    TestType::Ekg,
];

/// Fixed finding reported by imaging and similar tests
pub fn observation_for(test_type: TestType) -> Option<&'static str> {
    match test_type {
        TestType::Ultrasound => Some("Normal structure observed"),
        TestType::XRay => Some("No fractures or abnormalities detected"),
        TestType::Mri => Some("No issues detected"),
        TestType::CtScan => Some("CT scan shows no issues"),
        TestType::Biopsy => Some("Biopsy results are benign"),
        TestType::Ekg => Some("EKG shows normal heart rhythm"),
        TestType::BloodTest | TestType::LabTest | TestType::UrineTest => None,
    }
}

/// Generate the parameters of one record of `test_type`
pub fn random_parameters<R: Rng + ?Sized>(test_type: TestType, rng: &mut R) -> Vec<Parameter> {
    match test_type {
        TestType::BloodTest => BLOOD_PANEL.iter().map(|s| s.sample(rng)).collect(),
        TestType::LabTest => LAB_PANEL.iter().map(|s| s.sample(rng)).collect(),
        TestType::UrineTest => vec![
            URINE_PH.sample(rng),
            Parameter::observed("Glucose", "Negative"),
        ],
        other => observation_for(other)
            .map(|text| vec![Parameter::observed("Observation", text)])
            .unwrap_or_default(),
    }
}
