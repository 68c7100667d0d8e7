use std::sync::Arc;

use reqwest::Client;
use tracing::debug;

use super::error::ExtractorError;
use super::platform::Platform;
use super::platform_extractor::PlatformExtractor;
use super::platforms::{
    facebook::Facebook, instagram::Instagram, tiktok::TikTok, youtube::YouTube,
};
use super::signature::SignatureManager;
use crate::media::DownloadResult;

/// Upstream service bases, one per extractor. Defaults target production;
/// tests override individual entries to point at a local mock.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub youtube_base: String,
    pub tiktok_base: String,
    pub facebook_base: String,
    pub instagram_base: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            youtube_base: YouTube::BASE_URL.to_string(),
            tiktok_base: TikTok::BASE_URL.to_string(),
            facebook_base: Facebook::BASE_URL.to_string(),
            instagram_base: Instagram::BASE_URL.to_string(),
        }
    }
}

/// Routes a content URL to the extractor for its platform.
///
/// One dispatcher lives for the whole process. It owns the shared HTTP
/// client and the signature manager; extractors are built per call, so no
/// state is carried between extractions.
pub struct Dispatcher {
    client: Client,
    config: UpstreamConfig,
    signer: Arc<SignatureManager>,
}

impl Dispatcher {
    pub fn new(client: Client, config: UpstreamConfig) -> Self {
        let signer = Arc::new(SignatureManager::new(
            client.clone(),
            config.youtube_base.clone(),
        ));
        Self {
            client,
            config,
            signer,
        }
    }

    /// Resolve `alias` against the platform table, then extract.
    pub async fn dispatch_alias(
        &self,
        url: &str,
        alias: &str,
    ) -> Result<DownloadResult, ExtractorError> {
        let platform = Platform::from_alias(alias)?;
        self.dispatch(url, platform).await
    }

    pub async fn dispatch(
        &self,
        url: &str,
        platform: Platform,
    ) -> Result<DownloadResult, ExtractorError> {
        debug!(%platform, url, "dispatching extraction");
        match platform {
            Platform::YouTube => {
                YouTube::new(url.to_string(), self.client.clone(), self.signer.clone())
                    .with_api_base(self.config.youtube_base.clone())
                    .extract()
                    .await
            }
            Platform::TikTok => {
                TikTok::new(url.to_string(), self.client.clone())
                    .with_api_base(self.config.tiktok_base.clone())
                    .extract()
                    .await
            }
            Platform::Facebook => {
                Facebook::new(url.to_string(), self.client.clone())
                    .with_api_base(self.config.facebook_base.clone())
                    .extract()
                    .await
            }
            Platform::Instagram => {
                Instagram::new(url.to_string(), self.client.clone())
                    .with_api_base(self.config.instagram_base.clone())
                    .extract()
                    .await
            }
        }
    }
}
