use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderName, HeaderValue};
use scraper::{ElementRef, Html, Selector};

use crate::{
    extractor::{
        error::ExtractorError,
        platform_extractor::{Extractor, PlatformExtractor},
    },
    media::{DownloadResult, FacebookDownload, FacebookGrade, FacebookLink, QualityLabel},
};

static CAPTION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".results-item-text").unwrap());
static PREVIEW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".results-item-image").unwrap());
static RESULT_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".results-list-item").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

pub struct Facebook {
    pub extractor: Extractor,
    api_base: String,
}

impl Facebook {
    pub const BASE_URL: &str = "https://getmyfb.com";

    pub fn new(url: String, client: Client) -> Self {
        let mut extractor = Extractor::new("Facebook", url, client);
        // The processing endpoint only answers htmx-shaped requests. Share
        // links go through the private-video flow, selected by the target
        // header.
        let target = if extractor.url.contains("share") {
            "#private-video-downloader"
        } else {
            "#target"
        };
        extractor.add_header_owned(
            HeaderName::from_static("hx-current-url"),
            HeaderValue::from_static("https://getmyfb.com/"),
        );
        extractor.add_header_owned(
            HeaderName::from_static("hx-request"),
            HeaderValue::from_static("true"),
        );
        extractor.add_header_owned(
            HeaderName::from_static("hx-target"),
            HeaderValue::from_static(target),
        );
        extractor.add_header_owned(
            HeaderName::from_static("hx-trigger"),
            HeaderValue::from_static("form"),
        );
        extractor.add_header_owned(
            HeaderName::from_static("hx-post"),
            HeaderValue::from_static("/process"),
        );
        extractor.add_header_owned(
            HeaderName::from_static("hx-swap"),
            HeaderValue::from_static("innerHTML"),
        );

        Self {
            extractor,
            api_base: Self::BASE_URL.to_string(),
        }
    }

    /// Point the extractor at a different processing endpoint, mainly for
    /// tests against a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn fetch_results_fragment(&self) -> Result<String, ExtractorError> {
        let url = format!("{}/process", self.api_base);
        let id = urlencoding::decode(&self.extractor.url)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| self.extractor.url.clone());
        let response = self
            .extractor
            .post(&url)
            .form(&[("id", id.as_str()), ("locale", "en")])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PlatformExtractor for Facebook {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<DownloadResult, ExtractorError> {
        let fragment = self.fetch_results_fragment().await?;
        let download = parse_results(&fragment)?;
        Ok(DownloadResult::Facebook(download))
    }
}

fn parse_results(fragment: &str) -> Result<FacebookDownload, ExtractorError> {
    let html = Html::parse_fragment(fragment);

    let caption = html
        .select(&CAPTION)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string();
    let preview = html
        .select(&PREVIEW)
        .next()
        .and_then(|element| element.value().attr("src"))
        .unwrap_or_default()
        .to_string();
    let results: Vec<FacebookLink> = html.select(&RESULT_ITEM).map(parse_result_item).collect();

    if caption.is_empty() && preview.is_empty() && results.is_empty() {
        return Err(ExtractorError::EmptyResult);
    }

    Ok(FacebookDownload {
        caption,
        preview,
        results,
    })
}

fn parse_result_item(item: ElementRef<'_>) -> FacebookLink {
    let text: String = item.text().collect();
    let quality = match leading_number(&text) {
        Some(pixels) => QualityLabel::Pixels(pixels),
        None => QualityLabel::Unknown,
    };
    let kind = if text.contains("HD") {
        FacebookGrade::Hd
    } else {
        FacebookGrade::Sd
    };
    let url = item
        .select(&ANCHOR)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .unwrap_or_default()
        .to_string();
    FacebookLink { quality, kind, url }
}

/// Leading base-10 number of the trimmed option text ("720p (HD)" -> 720).
/// Zero and non-numeric prefixes yield `None`.
fn leading_number(text: &str) -> Option<u64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    match digits.parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(number) => Some(number),
    }
}
