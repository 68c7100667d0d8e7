use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{self, HeaderValue};
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::{
    extractor::{
        error::ExtractorError,
        platform_extractor::{Extractor, PlatformExtractor},
    },
    media::{DownloadResult, InstagramLink},
};

static DOWNLOAD_BUTTON: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.abutton.is-success.is-fullwidth.btn-premium").unwrap());

/// Envelope around the search response; `data` is an HTML fragment.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: String,
}

pub struct Instagram {
    pub extractor: Extractor,
    api_base: String,
}

impl Instagram {
    pub const BASE_URL: &str = "https://yt1s.io";

    pub fn new(url: String, client: Client) -> Self {
        let mut extractor = Extractor::new("Instagram", url, client);
        extractor.add_header_owned(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        extractor.add_header_owned(
            header::USER_AGENT,
            HeaderValue::from_static("Postify/1.0.0"),
        );
        extractor.set_origin_static("https://yt1s.io");
        extractor.set_referer_static("https://yt1s.io/");

        Self {
            extractor,
            api_base: Self::BASE_URL.to_string(),
        }
    }

    /// Point the extractor at a different search endpoint, mainly for tests
    /// against a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn fetch_search_fragment(&self) -> Result<String, ExtractorError> {
        let url = format!("{}/api/ajaxSearch", self.api_base);
        let response = self
            .extractor
            .post(&url)
            .form(&[
                ("q", self.extractor.url.as_str()),
                ("w", ""),
                ("p", "home"),
                ("lang", "en"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let envelope: SearchResponse = response.json().await.map_err(|e| {
            ExtractorError::UpstreamParse(format!("malformed search response: {e}"))
        })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl PlatformExtractor for Instagram {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Zero parsed buttons is a valid outcome and yields an empty list, not
    /// an error.
    async fn extract(&self) -> Result<DownloadResult, ExtractorError> {
        let fragment = self.fetch_search_fragment().await?;
        Ok(DownloadResult::Instagram(parse_links(&fragment)))
    }
}

fn parse_links(fragment: &str) -> Vec<InstagramLink> {
    let html = Html::parse_fragment(fragment);
    html.select(&DOWNLOAD_BUTTON)
        .map(|button| InstagramLink {
            title: button.value().attr("title").unwrap_or_default().to_string(),
            url: button.value().attr("href").unwrap_or_default().to_string(),
        })
        .collect()
}
