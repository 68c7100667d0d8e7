use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;

use super::DEFAULT_UA;
use super::error::ExtractorError;
use crate::media::DownloadResult;

/// Base extractor shared by the platform implementations.
///
/// Holds the target URL, the shared HTTP client and the platform's fixed
/// header set; request builders returned by [`Extractor::get`] /
/// [`Extractor::post`] come pre-configured with those headers.
#[derive(Debug, Clone)]
pub struct Extractor {
    // url to extract from, e.g. "https://www.tiktok.com/@user/video/123"
    pub url: String,
    // name of the platform, e.g. "TikTok", "Facebook"...
    pub platform_name: String,
    pub client: Client,
    platform_headers: HeaderMap,
}

impl Extractor {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        platform_name: S1,
        url: S2,
        client: Client,
    ) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_UA),
        );
        // Do not set `Accept-Encoding`; reqwest adds it (and decompresses)
        // when the corresponding crate features are enabled.

        Self {
            platform_name: platform_name.into(),
            url: url.into(),
            client,
            platform_headers: default_headers,
        }
    }

    #[inline]
    pub fn set_origin_static(&mut self, origin: &'static str) {
        self.add_header_owned(reqwest::header::ORIGIN, HeaderValue::from_static(origin));
    }

    #[inline]
    pub fn set_referer_static(&mut self, referer: &'static str) {
        self.add_header_owned(reqwest::header::REFERER, HeaderValue::from_static(referer));
    }

    pub fn add_header_owned<K: Into<HeaderName>, V: Into<HeaderValue>>(
        &mut self,
        key: K,
        value: V,
    ) {
        self.platform_headers.insert(key.into(), value.into());
    }

    pub fn add_header_str<K: AsRef<str>, V: AsRef<str>>(&mut self, key: K, value: V) {
        match HeaderName::from_bytes(key.as_ref().as_bytes()) {
            Ok(name) => match HeaderValue::from_str(value.as_ref()) {
                Ok(value) => {
                    self.platform_headers.insert(name, value);
                }
                Err(e) => {
                    debug!(error = %e, "Invalid header value; skipping");
                }
            },
            Err(e) => {
                debug!(error = %e, "Invalid header name; skipping");
            }
        }
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    /// Create a request with the platform headers pre-applied.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .headers(self.platform_headers.clone())
    }

    pub fn get_platform_headers(&self) -> &HeaderMap {
        &self.platform_headers
    }
}

#[async_trait]
pub trait PlatformExtractor: Send + Sync {
    fn get_extractor(&self) -> &Extractor;

    fn get_platform_headers(&self) -> &HeaderMap {
        &self.get_extractor().platform_headers
    }

    async fn extract(&self) -> Result<DownloadResult, ExtractorError>;
}
