//! Revocation registry port, a key/value surface with per-key expiry.

mod r#trait;
pub use r#trait::RevocationRegistry;

mod mock;
pub use mock::MockRevocationRegistry;
