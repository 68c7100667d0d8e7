//! REST API server module.
//!
//! Provides the download-link extraction endpoint and health checks.

pub mod error;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
