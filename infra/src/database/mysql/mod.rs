//! MySQL implementations of the core repository ports.

pub mod credential_store_impl;
pub mod token_repository_impl;

pub use credential_store_impl::MySqlCredentialStore;
pub use token_repository_impl::MySqlTokenRepository;
