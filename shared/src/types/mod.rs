//! Common wire-level types

pub mod response;

pub use response::ErrorResponse;
