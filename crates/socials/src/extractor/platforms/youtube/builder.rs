use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::{
    extractor::{
        error::ExtractorError,
        platform_extractor::{Extractor, PlatformExtractor},
        signature::{SignatureManager, SignatureToken},
    },
    media::{DownloadResult, YoutubeDownloads},
};

/// Extractor backed by the signature-gated download service. Every info and
/// search call carries the current signature in headers; download links are
/// synthesized locally from the info payload.
pub struct YouTube {
    pub extractor: Extractor,
    signer: Arc<SignatureManager>,
    api_base: String,
}

impl YouTube {
    pub const BASE_URL: &str = "https://ytdownloader.nvlgroup.my.id";

    pub fn new(url: String, client: Client, signer: Arc<SignatureManager>) -> Self {
        let extractor = Extractor::new("YouTube", url, client);
        Self {
            extractor,
            signer,
            api_base: Self::BASE_URL.to_string(),
        }
    }

    /// Point the extractor at a different download-service base, mainly for
    /// tests against a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn fetch_info(&self, token: &SignatureToken) -> Result<Value, ExtractorError> {
        let url = format!(
            "{}/web/info?url={}",
            self.api_base,
            urlencoding::encode(&self.extractor.url)
        );
        self.signed_json(&url, token, "info").await
    }

    /// Search the download service for content matching `query`. The response
    /// shape is upstream-owned and returned untouched.
    pub async fn search(&self, query: &str) -> Result<Value, ExtractorError> {
        let token = self.signer.ensure_valid().await?;
        let url = format!(
            "{}/web/search?q={}",
            self.api_base,
            urlencoding::encode(query)
        );
        self.signed_json(&url, &token, "search").await
    }

    async fn signed_json(
        &self,
        url: &str,
        token: &SignatureToken,
        what: &str,
    ) -> Result<Value, ExtractorError> {
        let response = self
            .extractor
            .get(url)
            .header("x-server-signature", token.signature.as_str())
            .header("x-signature-timestamp", token.timestamp.to_string())
            .send()
            .await
            .map_err(|e| ExtractorError::UpstreamInfo(format!("{what} request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ExtractorError::UpstreamInfo(format!(
                "{what} request returned {}",
                response.status()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ExtractorError::UpstreamInfo(format!("malformed {what} response: {e}")))
    }

    fn download_links(
        &self,
        info: &Value,
        token: &SignatureToken,
    ) -> Result<(Vec<Value>, Vec<Value>), ExtractorError> {
        let resolutions = info
            .get("resolutions")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ExtractorError::UpstreamInfo("info response missing resolutions".to_string())
            })?;
        let audio_bitrates = info
            .get("audioBitrates")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ExtractorError::UpstreamInfo("info response missing audioBitrates".to_string())
            })?;

        let video = self.synthesize(resolutions, "height", "download", "resolution", token);
        let audio = self.synthesize(audio_bitrates, "bitrate", "audio", "bitrate", token);
        Ok((video, audio))
    }

    /// Copy each option entry and attach a direct-download URL carrying the
    /// content URL, the entry's numeric value and the current signature.
    /// Entries without a usable number are skipped rather than producing a
    /// broken link.
    fn synthesize(
        &self,
        entries: &[Value],
        source_key: &str,
        endpoint: &str,
        param: &str,
        token: &SignatureToken,
    ) -> Vec<Value> {
        entries
            .iter()
            .filter_map(|entry| {
                let Some(fields) = entry.as_object() else {
                    debug!("skipping non-object option entry");
                    return None;
                };
                let Some(value) = numeric_field(fields, source_key) else {
                    debug!("skipping option entry without a numeric {source_key}");
                    return None;
                };
                let mut fields = fields.clone();
                fields.insert(
                    "url".to_string(),
                    json!(format!(
                        "{}/web/{}?url={}&{}={}&signature={}&timestamp={}",
                        self.api_base,
                        endpoint,
                        self.extractor.url,
                        param,
                        value,
                        token.signature,
                        token.timestamp
                    )),
                );
                Some(Value::Object(fields))
            })
            .collect()
    }
}

fn numeric_field(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    match fields.get(key) {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl PlatformExtractor for YouTube {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<DownloadResult, ExtractorError> {
        let token = self.signer.ensure_valid().await?;
        let info = self.fetch_info(&token).await?;
        let (video, audio) = self.download_links(&info, &token)?;

        Ok(DownloadResult::YouTube(YoutubeDownloads {
            info,
            video,
            audio,
        }))
    }
}
