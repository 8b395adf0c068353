//! Domain layer containing the auth subsystem's business entities.

pub mod entities;

pub use entities::*;
