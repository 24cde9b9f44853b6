//! Identity providers
//!
//! Account creation and credential checks sit behind [`IdentityProvider`]
//! so the account flow does not depend on a particular auth service.

pub mod local;
pub mod traits;

pub use local::LocalIdentityProvider;
pub use traits::{AuthenticatedUser, IdentityProvider};
