use std::time::Duration;

use reqwest::Client;

use super::dispatcher::{Dispatcher, UpstreamConfig};

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Bound on every outbound call; upstreams that hang would otherwise block
/// the caller indefinitely.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

pub fn default_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to create HTTP client")
}

/// Returns a new `Dispatcher` wired to the production upstream endpoints.
pub fn default_dispatcher() -> Dispatcher {
    Dispatcher::new(default_client(), UpstreamConfig::default())
}
