//! Domain models and types for Be Healthy.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`UserId`], [`DocumentPath`])
//! - **Domain models** ([`TestRecord`], [`Parameter`], [`UserProfile`], [`GoalList`])
//! - **Error types** ([`AppError`], [`StorageError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! User identifiers and storage paths are newtypes validated on construction,
//! so a path can never be built from an unchecked user id:
//!
//! ```rust
//! use behealthy::domain::{DocumentPath, UserId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uid = UserId::new("f3a9c2e4")?;
//! let path = DocumentPath::test_results(&uid);
//! assert_eq!(path.as_str(), "testresults/f3a9c2e4");
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod goals;
pub mod ids;
pub mod profile;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{AppError, StorageError};
pub use goals::GoalList;
pub use ids::{DocumentPath, UserId};
pub use profile::UserProfile;
pub use record::{decode_record_set, encode_record_set, Parameter, TestRecord, TestType};
pub use result::Result;
