//! MySQL persistence built on SQLx.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{MySqlCredentialStore, MySqlTokenRepository};
