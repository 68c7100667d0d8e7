//! API request and response models.

use serde::{Deserialize, Serialize};

/// Query parameters for the download endpoint.
///
/// Both fields are required; empty strings count as missing so that
/// `?url=&platform=tt` is rejected the same way as an absent parameter.
#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}
