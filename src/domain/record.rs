//! Test record domain model
//!
//! A [`TestRecord`] is one diagnostic event (a blood panel, an X-ray, ...) made
//! of named [`Parameter`]s. Field names on the wire are camelCase so documents
//! stay compatible with the collections already written by web clients.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Kind of diagnostic test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestType {
    #[serde(rename = "Blood Test")]
    BloodTest,
    #[serde(rename = "Lab Test")]
    LabTest,
    #[serde(rename = "Ultrasound")]
    Ultrasound,
    #[serde(rename = "X-Ray")]
    XRay,
    #[serde(rename = "MRI")]
    Mri,
    #[serde(rename = "CT Scan")]
    CtScan,
    #[serde(rename = "Urine Test")]
    UrineTest,
    #[serde(rename = "Biopsy")]
    Biopsy,
    #[serde(rename = "EKG")]
    Ekg,
}

impl TestType {
    /// Every test type, blood test first
    pub const ALL: [TestType; 9] = [
        TestType::BloodTest,
        TestType::LabTest,
        TestType::Ultrasound,
        TestType::XRay,
        TestType::Mri,
        TestType::CtScan,
        TestType::UrineTest,
        TestType::Biopsy,
        TestType::Ekg,
    ];

    /// Display name, identical to the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::BloodTest => "Blood Test",
            TestType::LabTest => "Lab Test",
            TestType::Ultrasound => "Ultrasound",
            TestType::XRay => "X-Ray",
            TestType::Mri => "MRI",
            TestType::CtScan => "CT Scan",
            TestType::UrineTest => "Urine Test",
            TestType::Biopsy => "Biopsy",
            TestType::Ekg => "EKG",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown test type: {s}"))
    }
}

/// One measured or observed value within a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter identifier, e.g. "RBC" or "Observation"
    pub name: String,

    /// Fixed-decimal numeric text or a categorical string
    pub value: String,

    /// Unit, empty when not applicable
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub unit: String,

    /// Clinical reference range ("low-high")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
}

impl Parameter {
    /// Quantitative parameter without a reference range
    pub fn measured(name: impl Into<String>, value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: unit.into(),
            range: None,
        }
    }

    /// Categorical or free-text parameter
    pub fn observed(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            unit: String::new(),
            range: None,
        }
    }

    /// Attaches a reference range
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }

    /// Parses the value as a number, if it is one
    pub fn numeric_value(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }
}

/// One diagnostic event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRecord {
    /// Kind of test
    pub test_name: TestType,

    /// Calendar date of the test
    #[serde(with = "record_date")]
    pub date: NaiveDate,

    /// Measured values, shape fixed by the test type
    pub parameters: Vec<Parameter>,
}

impl TestRecord {
    /// Creates a new record
    pub fn new(test_name: TestType, date: NaiveDate, parameters: Vec<Parameter>) -> Self {
        Self {
            test_name,
            date,
            parameters,
        }
    }

    /// Finds a parameter by exact name
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Whether this is a blood test
    pub fn is_blood_test(&self) -> bool {
        self.test_name == TestType::BloodTest
    }
}

/// Serde adapter for record dates
///
/// Dates are written as `YYYY-MM-DD`. Reading also accepts the US locale form
/// `M/D/YYYY` produced by browser clients.
pub mod record_date {
    use super::*;

    const ISO_FORMAT: &str = "%Y-%m-%d";
    const US_LOCALE_FORMAT: &str = "%m/%d/%Y";

    /// Parses a stored date in any accepted format
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, ISO_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(raw, US_LOCALE_FORMAT))
            .ok()
    }

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(ISO_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid record date: {raw}")))
    }
}

/// Storage key for the record at `index` within a user's record set
///
/// Keys are zero-padded so that lexical key order equals generation order.
pub fn record_key(index: usize) -> String {
    format!("r{index:02}")
}

/// Encodes records as the keyed mapping stored at `testresults/{uid}`
pub fn encode_record_set(records: &[TestRecord]) -> serde_json::Result<Value> {
    let mut set = Map::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        set.insert(record_key(index), serde_json::to_value(record)?);
    }
    Ok(Value::Object(set))
}

/// Decodes a stored record set
///
/// Accepts the keyed mapping written by [`encode_record_set`] (records come
/// back in key order) as well as a plain array, which is how some stores
/// return sequential keys. A mapping whose keys are all integers is read in
/// numeric order. `null` entries are skipped.
pub fn decode_record_set(value: Value) -> serde_json::Result<Vec<TestRecord>> {
    let entries: Vec<Value> = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut keyed: Vec<(String, Value)> = map.into_iter().collect();
            // Sequential push keys ("0", "1", ..., "10") order by value
            if keyed.iter().all(|(k, _)| k.parse::<u64>().is_ok()) {
                keyed.sort_by_key(|(k, _)| k.parse::<u64>().unwrap_or(u64::MAX));
            } else {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            }
            keyed.into_iter().map(|(_, v)| v).collect()
        }
        other => {
            return Err(serde::de::Error::custom(format!(
                "expected a record set, found {other}"
            )))
        }
    };

    entries
        .into_iter()
        .filter(|v| !v.is_null())
        .map(serde_json::from_value)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_test_type_wire_names() {
        assert_eq!(serde_json::to_value(TestType::XRay).unwrap(), json!("X-Ray"));
        assert_eq!(serde_json::to_value(TestType::CtScan).unwrap(), json!("CT Scan"));
        let parsed: TestType = serde_json::from_value(json!("Blood Test")).unwrap();
        assert_eq!(parsed, TestType::BloodTest);
    }

    #[test]
    fn test_test_type_from_str_matches_display() {
        for test_type in TestType::ALL {
            assert_eq!(test_type.to_string().parse::<TestType>().unwrap(), test_type);
        }
        assert!("Colonoscopy".parse::<TestType>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case_and_omits_empty_fields() {
        let record = TestRecord::new(
            TestType::UrineTest,
            date(2024, 3, 7),
            vec![
                Parameter::measured("pH", "6.2", ""),
                Parameter::observed("Glucose", "Negative"),
            ],
        );

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "testName": "Urine Test",
                "date": "2024-03-07",
                "parameters": [
                    {"name": "pH", "value": "6.2"},
                    {"name": "Glucose", "value": "Negative"}
                ]
            })
        );
    }

    #[test]
    fn test_record_reads_locale_dates() {
        let value = json!({
            "testName": "MRI",
            "date": "7/14/2021",
            "parameters": [{"name": "Observation", "value": "No issues detected"}]
        });

        let record: TestRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.date, date(2021, 7, 14));
        assert_eq!(record.parameters[0].unit, "");
        assert!(record.parameters[0].range.is_none());
    }

    #[test]
    fn test_record_rejects_garbage_date() {
        let value = json!({
            "testName": "MRI",
            "date": "yesterday",
            "parameters": []
        });
        assert!(serde_json::from_value::<TestRecord>(value).is_err());
    }

    #[test]
    fn test_parameter_lookup_and_numeric_value() {
        let record = TestRecord::new(
            TestType::BloodTest,
            date(2020, 1, 1),
            vec![
                Parameter::measured("RBC", "4.52", "10^6/micl").with_range("4-5.2"),
                Parameter::observed("Note", "n/a"),
            ],
        );

        assert!(record.is_blood_test());
        assert_eq!(record.parameter("RBC").unwrap().numeric_value(), Some(4.52));
        assert_eq!(record.parameter("Note").unwrap().numeric_value(), None);
        assert!(record.parameter("rbc").is_none());
    }

    fn blood_test(day: u32) -> TestRecord {
        TestRecord::new(
            TestType::BloodTest,
            date(2022, 5, day),
            vec![Parameter::measured("Hematocrit", "40", "%").with_range("36-42")],
        )
    }

    #[test]
    fn test_record_keys_sort_in_generation_order() {
        assert_eq!(record_key(0), "r00");
        assert_eq!(record_key(13), "r13");
        assert!(record_key(9) < record_key(10));
    }

    #[test]
    fn test_record_set_is_keyed_object() {
        let records = vec![blood_test(1), blood_test(2)];
        let value = encode_record_set(&records).unwrap();

        let map = value.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["r01"]["date"], json!("2022-05-02"));
        assert_eq!(decode_record_set(value).unwrap(), records);
    }

    #[test]
    fn test_decode_array_with_holes() {
        let value = json!([
            null,
            {"testName": "EKG", "date": "2023-01-02",
             "parameters": [{"name": "Observation", "value": "EKG shows normal heart rhythm"}]}
        ]);

        let records = decode_record_set(value).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].test_name, TestType::Ekg);
    }

    #[test]
    fn test_decode_integer_keys_in_numeric_order() {
        let mut set = Map::new();
        for (index, year) in (2014..=2025).rev().enumerate() {
            let record = TestRecord::new(TestType::BloodTest, date(year, 1, 1), Vec::new());
            set.insert(index.to_string(), serde_json::to_value(record).unwrap());
        }

        let years: Vec<i32> = decode_record_set(Value::Object(set))
            .unwrap()
            .iter()
            .map(|r| r.date.year())
            .collect();
        assert_eq!(years, (2014..=2025).rev().collect::<Vec<_>>());
    }

    #[test]
    fn test_decode_rejects_scalars() {
        assert!(decode_record_set(json!("oops")).is_err());
        assert!(decode_record_set(Value::Null).unwrap().is_empty());
    }
}
