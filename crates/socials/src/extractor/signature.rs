use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::error::ExtractorError;

/// Maximum age before a held token must be refreshed.
pub const MAX_TOKEN_AGE_MS: i64 = 240_000;

/// Short-lived token issued by the download service, required on info and
/// download requests.
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureToken {
    pub signature: String,
    /// Upstream-issued epoch millis; doubles as the issue time for the
    /// expiry check.
    pub timestamp: i64,
}

impl SignatureToken {
    pub fn is_expired(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp > MAX_TOKEN_AGE_MS
    }
}

/// Caches the signature token for the lifetime of the process and refreshes
/// it on demand when a consumer finds it absent or stale.
///
/// The lock is never held across the refresh call, so two concurrent
/// consumers can both observe a stale token and both refresh. Refreshes are
/// independent upstream calls; last write wins and either token is usable.
pub struct SignatureManager {
    client: Client,
    base_url: String,
    token: RwLock<Option<SignatureToken>>,
}

impl SignatureManager {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Returns the held token, refreshing it first when absent or older than
    /// [`MAX_TOKEN_AGE_MS`].
    pub async fn ensure_valid(&self) -> Result<SignatureToken, ExtractorError> {
        let now_ms = epoch_millis();
        {
            let guard = self.token.read();
            if let Some(token) = guard.as_ref()
                && !token.is_expired(now_ms)
            {
                return Ok(token.clone());
            }
        }

        let token = self.refresh().await?;
        *self.token.write() = Some(token.clone());
        Ok(token)
    }

    async fn refresh(&self) -> Result<SignatureToken, ExtractorError> {
        let url = format!("{}/generate-signature", self.base_url);
        debug!(url = %url, "refreshing signature token");

        let token = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| ExtractorError::UpstreamAuth(format!("signature refresh failed: {e}")))?
            .json::<SignatureToken>()
            .await
            .map_err(|e| {
                ExtractorError::UpstreamAuth(format!("malformed signature response: {e}"))
            })?;

        Ok(token)
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or_default()
}
