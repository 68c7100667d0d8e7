//! HTTP service exposing the social media download-link extractors.

pub mod api;
pub mod error;

pub use api::ApiServer;
pub use error::{Error, Result};
