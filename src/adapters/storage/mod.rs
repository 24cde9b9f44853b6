//! Document storage layer
//!
//! All persisted state (test results, profiles, goals, accounts) lives in a
//! keyed JSON document store. Backends implement [`DocumentStore`] and are
//! selected from configuration by [`create_document_store`].

pub mod factory;
pub mod file;
pub mod firebase;
pub mod memory;
pub mod postgresql;
pub mod traits;

pub use factory::create_document_store;
pub use file::FileStore;
pub use firebase::FirebaseStore;
pub use memory::MemoryStore;
pub use postgresql::PostgreSQLStore;
pub use traits::{read_document, write_document, DocumentStore, StoreResult};
