//! Library exports for integration tests and external embedding.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
