//! Credential store port, standing in for the external identity system.

mod r#trait;
pub use r#trait::CredentialStore;

mod mock;
pub use mock::MockCredentialStore;
