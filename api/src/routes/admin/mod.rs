//! Administrative endpoints.

pub mod revoke;
