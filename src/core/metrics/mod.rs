//! Derived metrics
//!
//! Pure computations over fetched profile and record data: BMI with its
//! category, and the blood test time series used for charting.

pub mod bmi;
pub mod series;

pub use bmi::{classify_bmi, compute_bmi, BmiCategory, DerivedMetrics};
pub use series::{
    build_blood_test_chart, chronological_blood_tests, select_blood_test_series, BloodTestChart,
    ChartDataset, CHART_PARAMETERS,
};
