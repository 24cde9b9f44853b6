//! Blood test series and chart data

use crate::domain::record::TestRecord;
use crate::domain::{AppError, Result};
use serde::Serialize;

/// Parameters plotted over time, in dataset order
pub const CHART_PARAMETERS: [&str; 3] = ["RBC", "Hemoglobin", "Hematocrit"];

/// Blood tests in reverse input order
///
/// Only yields chronological order when the input is newest-first; use
/// [`chronological_blood_tests`] for plotting.
pub fn select_blood_test_series(records: &[TestRecord]) -> Vec<&TestRecord> {
    records.iter().filter(|r| r.is_blood_test()).rev().collect()
}

/// Blood tests sorted oldest first; ties keep input order
pub fn chronological_blood_tests(records: &[TestRecord]) -> Vec<&TestRecord> {
    let mut series: Vec<&TestRecord> = records.iter().filter(|r| r.is_blood_test()).collect();
    series.sort_by_key(|r| r.date);
    series
}

/// One plotted parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    pub label: String,
    pub unit: String,
    pub data: Vec<f64>,
}

/// Line chart of the blood test history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BloodTestChart {
    /// ISO dates, one per blood test
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl BloodTestChart {
    /// Whether there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Build chart data from all blood tests in `records`, oldest first
///
/// # Errors
///
/// Fails on the first blood test that lacks a charted parameter
/// ([`AppError::MissingParameter`]) or has a non-numeric value for one
/// ([`AppError::InvalidParameterValue`]). No partial chart is returned.
pub fn build_blood_test_chart(records: &[TestRecord]) -> Result<BloodTestChart> {
    let series = chronological_blood_tests(records);

    let labels = series
        .iter()
        .map(|r| r.date.format("%Y-%m-%d").to_string())
        .collect();

    let mut datasets = Vec::with_capacity(CHART_PARAMETERS.len());
    for name in CHART_PARAMETERS {
        let mut data = Vec::with_capacity(series.len());
        let mut unit = String::new();

        for record in &series {
            let parameter = record
                .parameter(name)
                .ok_or_else(|| AppError::MissingParameter {
                    record_date: record.date.to_string(),
                    parameter: name.to_string(),
                })?;
            let value = parameter
                .numeric_value()
                .ok_or_else(|| AppError::InvalidParameterValue {
                    parameter: name.to_string(),
                    value: parameter.value.clone(),
                })?;

            if unit.is_empty() {
                unit = parameter.unit.clone();
            }
            data.push(value);
        }

        datasets.push(ChartDataset {
            label: name.to_string(),
            unit,
            data,
        });
    }

    Ok(BloodTestChart { labels, datasets })
}
