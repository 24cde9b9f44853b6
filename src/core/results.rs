//! Test results view model

use crate::adapters::storage::DocumentStore;
use crate::core::metrics::{build_blood_test_chart, BloodTestChart};
use crate::domain::ids::{DocumentPath, UserId};
use crate::domain::record::{decode_record_set, Parameter, TestRecord};
use crate::domain::{Result, StorageError};

/// Message shown when a user has no stored results
pub const NO_RESULTS_MESSAGE: &str = "No test results found";

/// What the results page shows
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    /// Nothing stored; carries the message to display
    Empty(String),

    /// Records in stored order plus the blood test chart
    Loaded {
        records: Vec<TestRecord>,
        chart: BloodTestChart,
    },
}

/// Load the stored results of `user_id`
///
/// # Errors
///
/// Returns storage errors and chart errors unchanged. Callers display them
/// as `Error fetching test results: {error}`.
pub async fn load_test_results(store: &dyn DocumentStore, user_id: &UserId) -> Result<ResultsView> {
    let path = DocumentPath::test_results(user_id);
    let records = match store.read(&path).await? {
        Some(value) => decode_record_set(value)
            .map_err(|e| StorageError::InvalidFormat(format!("{path}: {e}")))?,
        None => Vec::new(),
    };

    if records.is_empty() {
        tracing::debug!(uid = %user_id, "No test results stored");
        return Ok(ResultsView::Empty(NO_RESULTS_MESSAGE.to_string()));
    }

    let chart = build_blood_test_chart(&records)?;
    tracing::debug!(uid = %user_id, records = records.len(), "Fetched test results");
    Ok(ResultsView::Loaded { records, chart })
}

/// Lines describing one parameter of `record`
///
/// The reference range is only shown for blood tests.
pub fn parameter_lines(record: &TestRecord, parameter: &Parameter) -> Vec<String> {
    let mut value = format!("{}: {}", parameter.name, parameter.value);
    if !parameter.unit.is_empty() {
        value.push(' ');
        value.push_str(&parameter.unit);
    }

    let mut lines = vec![value];
    if record.is_blood_test() {
        if let Some(ref range) = parameter.range {
            lines.push(format!("Normal Range: {range}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStore;
    use crate::domain::record::{encode_record_set, TestType};
    use chrono::NaiveDate;
    use serde_json::json;

    fn uid() -> UserId {
        UserId::new("u1").unwrap()
    }

    #[tokio::test]
    async fn test_missing_results_are_empty_state() {
        let store = MemoryStore::new();
        let view = load_test_results(&store, &uid()).await.unwrap();
        assert_eq!(view, ResultsView::Empty("No test results found".to_string()));
    }

    #[tokio::test]
    async fn test_empty_array_is_empty_state() {
        let store = MemoryStore::new();
        store
            .write(&DocumentPath::test_results(&uid()), json!([]))
            .await
            .unwrap();
        let view = load_test_results(&store, &uid()).await.unwrap();
        assert!(matches!(view, ResultsView::Empty(_)));
    }

    #[tokio::test]
    async fn test_loaded_results_keep_stored_order() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let records = vec![
            TestRecord::new(
                TestType::Ekg,
                date,
                vec![Parameter::observed("Observation", "EKG shows normal heart rhythm")],
            ),
            TestRecord::new(
                TestType::LabTest,
                date,
                vec![Parameter::measured("Cholesterol", "180", "mg/dL")],
            ),
        ];
        store
            .write(
                &DocumentPath::test_results(&uid()),
                encode_record_set(&records).unwrap(),
            )
            .await
            .unwrap();

        match load_test_results(&store, &uid()).await.unwrap() {
            ResultsView::Loaded {
                records: loaded,
                chart,
            } => {
                assert_eq!(loaded, records);
                assert!(chart.is_empty());
            }
            other => panic!("Expected loaded view, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_results_are_errors() {
        let store = MemoryStore::new();
        store
            .write(&DocumentPath::test_results(&uid()), json!({"r00": {"testName": "MRI"}}))
            .await
            .unwrap();
        assert!(load_test_results(&store, &uid()).await.is_err());
    }

    #[test]
    fn test_ranges_only_for_blood_tests() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 2).unwrap();
        let param = Parameter::measured("Hematocrit", "40", "%").with_range("36-42");

        let blood = TestRecord::new(TestType::BloodTest, date, vec![param.clone()]);
        assert_eq!(
            parameter_lines(&blood, &param),
            vec!["Hematocrit: 40 %", "Normal Range: 36-42"]
        );

        let lab = TestRecord::new(TestType::LabTest, date, vec![param.clone()]);
        assert_eq!(parameter_lines(&lab, &param), vec!["Hematocrit: 40 %"]);
    }
}
