//! Integration tests for the synthetic record generator

use behealthy::core::generator::catalog::{BLOOD_PANEL, EXTRA_TEST_TYPES};
use behealthy::core::generator::{
    generate_test_results, FixedClock, RecordGenerator, BLOOD_TEST_YEARS,
};
use behealthy::domain::TestType;
use chrono::{Datelike, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::sync::Arc;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn assert_shape(records: &[behealthy::domain::TestRecord], today: NaiveDate) {
    let blood: Vec<_> = records.iter().filter(|r| r.is_blood_test()).collect();
    let others: Vec<_> = records.iter().filter(|r| !r.is_blood_test()).collect();

    assert_eq!(blood.len(), 10);
    assert!((2..=4).contains(&others.len()), "got {} extra records", others.len());

    for (offset, record) in blood.iter().enumerate() {
        assert_eq!(record.date.year(), today.year() - offset as i32);
    }
    for record in records {
        assert!((1..=28).contains(&record.date.day()));
        assert!((1..=12).contains(&record.date.month()));
    }
    for record in &others {
        assert_eq!(record.date.year(), today.year());
    }

    for record in blood {
        let names: Vec<&str> = record.parameters.iter().map(|p| p.name.as_str()).collect();
        let expected: Vec<&str> = BLOOD_PANEL.iter().map(|s| s.name).collect();
        assert_eq!(names, expected);

        for spec in BLOOD_PANEL.iter() {
            let value = record
                .parameter(spec.name)
                .and_then(|p| p.numeric_value())
                .unwrap();
            assert!(
                value >= spec.low && value <= spec.high(),
                "{} = {} outside [{}, {}]",
                spec.name,
                value,
                spec.low,
                spec.high()
            );
        }
    }
}

#[test]
fn test_generated_records_have_expected_shape() {
    for seed in 0..200 {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = generate_test_results(&mut rng, today());
        assert_shape(&records, today());
    }
}

#[test]
fn test_successive_generations_differ_but_keep_shape() {
    let generator = RecordGenerator::new(Arc::new(FixedClock(today())));
    let mut rng = StdRng::seed_from_u64(7);

    let first = generator.generate(&mut rng);
    let second = generator.generate(&mut rng);

    assert_shape(&first, today());
    assert_shape(&second, today());
    assert_ne!(first, second);
}

#[test]
fn test_generation_on_leap_day() {
    let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let records = generate_test_results(&mut rng, leap_day);
    assert_shape(&records, leap_day);
}

#[test]
fn test_blood_tests_come_first() {
    let mut rng = StdRng::seed_from_u64(11);
    let records = generate_test_results(&mut rng, today());

    assert!(records[..BLOOD_TEST_YEARS as usize]
        .iter()
        .all(|r| r.test_name == TestType::BloodTest));
    assert!(records[BLOOD_TEST_YEARS as usize..]
        .iter()
        .all(|r| r.test_name != TestType::BloodTest));
}

fn decimals(value: &str) -> usize {
    value.split_once('.').map(|(_, d)| d.len()).unwrap_or(0)
}

#[test]
fn test_extra_records_stay_within_catalog_bounds() {
    let mut drawn = HashSet::new();

    for seed in 0..500 {
        let mut rng = StdRng::seed_from_u64(seed);
        let records = generate_test_results(&mut rng, today());

        for record in records.iter().filter(|r| !r.is_blood_test()) {
            drawn.insert(record.test_name);

            match record.test_name {
                TestType::LabTest => {
                    let cholesterol = record.parameter("Cholesterol").unwrap();
                    let sugar = record.parameter("Blood Sugar").unwrap();
                    let c = cholesterol.numeric_value().unwrap();
                    let s = sugar.numeric_value().unwrap();
                    assert!((100.0..=240.0).contains(&c), "Cholesterol {c}");
                    assert!((70.0..=150.0).contains(&s), "Blood Sugar {s}");
                    assert_eq!(decimals(&cholesterol.value), 0);
                    assert_eq!(decimals(&sugar.value), 0);
                }
                TestType::UrineTest => {
                    let ph = record.parameter("pH").unwrap();
                    let value = ph.numeric_value().unwrap();
                    assert!((4.0..=8.0).contains(&value), "pH {value}");
                    assert_eq!(decimals(&ph.value), 1, "pH {}", ph.value);
                    assert_eq!(record.parameter("Glucose").unwrap().value, "Negative");
                }
                other => {
                    assert_eq!(record.parameters.len(), 1, "{other}");
                    assert_eq!(record.parameters[0].name, "Observation");
                }
            }
        }
    }

    for test_type in EXTRA_TEST_TYPES {
        assert!(drawn.contains(&test_type), "{test_type} was never drawn");
    }
    assert_eq!(drawn.len(), EXTRA_TEST_TYPES.len());
}
