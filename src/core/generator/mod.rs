//! Synthetic test record generator
//!
//! New accounts start with a plausible medical history: one blood test per
//! year for the last ten years plus two to four other tests from the current
//! year. Generation is a pure function of a random source and a date; writing
//! the result is a separate step ([`RecordGenerator::provision`]).
//!
//! # Example
//!
//! ```rust
//! use behealthy::core::generator::generate_test_results;
//! use chrono::NaiveDate;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
//! let records = generate_test_results(&mut rng, today);
//!
//! assert_eq!(records.iter().filter(|r| r.is_blood_test()).count(), 10);
//! ```

pub mod catalog;
pub mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use crate::adapters::storage::DocumentStore;
use crate::domain::ids::{DocumentPath, UserId};
use crate::domain::record::{encode_record_set, TestRecord, TestType};
use crate::domain::{AppError, Result, StorageError};
use chrono::{Datelike, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Number of yearly blood tests, the first dated in the current year
pub const BLOOD_TEST_YEARS: i32 = 10;

/// Fewest extra current-year records
pub const MIN_EXTRA_RECORDS: usize = 2;

/// Most extra current-year records
pub const MAX_EXTRA_RECORDS: usize = 4;

/// Latest day of month used, valid in every month
const MAX_DAY: u32 = 28;

/// Generate a full record set
///
/// Returns the ten yearly blood tests (newest first) followed by the extra
/// records. Every call yields a structurally complete set.
pub fn generate_test_results<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<TestRecord> {
    let extra = rng.gen_range(MIN_EXTRA_RECORDS..=MAX_EXTRA_RECORDS);
    let mut records = Vec::with_capacity(BLOOD_TEST_YEARS as usize + extra);

    for offset in 0..BLOOD_TEST_YEARS {
        records.push(random_record(rng, TestType::BloodTest, today.year() - offset));
    }

    for _ in 0..extra {
        let test_type = *catalog::EXTRA_TEST_TYPES
            .choose(rng)
            .unwrap_or(&TestType::LabTest);
        records.push(random_record(rng, test_type, today.year()));
    }

    tracing::debug!(
        blood_tests = BLOOD_TEST_YEARS,
        extra_tests = extra,
        "Generated test results"
    );
    records
}

fn random_record<R: Rng + ?Sized>(rng: &mut R, test_type: TestType, year: i32) -> TestRecord {
    let date = random_date(rng, year);
    TestRecord::new(test_type, date, catalog::random_parameters(test_type, rng))
}

/// Uniform month, day in `1..=28`
fn random_date<R: Rng + ?Sized>(rng: &mut R, year: i32) -> NaiveDate {
    let month0: u32 = rng.gen_range(0..12);
    let day: u32 = rng.gen_range(1..=MAX_DAY);
    NaiveDate::from_ymd_opt(year, month0 + 1, day)
        .expect("days up to 28 exist in every month of every supported year")
}

/// Generates and stores the initial record set of new users
pub struct RecordGenerator {
    clock: Arc<dyn Clock>,
}

impl RecordGenerator {
    /// Create a generator reading dates from `clock`
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Create a generator using the system clock
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// Generate a record set dated relative to the clock's today
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TestRecord> {
        generate_test_results(rng, self.clock.today())
    }

    /// Generate a record set and write it to `testresults/{uid}`
    ///
    /// The set is written as one full replacement. Calling this again for
    /// the same user overwrites the previous history with new values, so
    /// the account flow invokes it exactly once per account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::GenerationFailure`] when the write fails.
    pub async fn provision<R: Rng + Send + ?Sized>(
        &self,
        store: &dyn DocumentStore,
        user_id: &UserId,
        rng: &mut R,
    ) -> Result<Vec<TestRecord>> {
        let records = self.generate(rng);
        let path = DocumentPath::test_results(user_id);

        let failure = |source: StorageError| AppError::GenerationFailure {
            user_id: user_id.to_string(),
            source,
        };

        let document = encode_record_set(&records).map_err(|e| {
            failure(StorageError::WriteFailed {
                path: path.to_string(),
                message: e.to_string(),
            })
        })?;
        store.write(&path, document).await.map_err(failure)?;

        crate::log_results_provisioned!(user_id, records.len(), store.backend_name());
        Ok(records)
    }
}
