use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{self, HeaderValue};

use super::models::{TikwmData, TikwmResponse};
use super::utils::{format_grouped_count, format_taken_at};
use crate::{
    extractor::{
        error::ExtractorError,
        platform_extractor::{Extractor, PlatformExtractor},
    },
    media::{
        DownloadResult, TikTokAuthor, TikTokDownload, TikTokLink, TikTokLinkKind, TikTokMusic,
        TikTokStats,
    },
};

pub struct TikTok {
    pub extractor: Extractor,
    api_base: String,
}

impl TikTok {
    pub const BASE_URL: &str = "https://www.tikwm.com";

    pub fn new(url: String, client: Client) -> Self {
        let mut extractor = Extractor::new("TikTok", url, client);
        extractor.add_header_owned(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        extractor.add_header_owned(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("id-ID,id;q=0.9,en-US;q=0.8,en;q=0.7"),
        );
        // The endpoint rejects browser-looking user agents.
        extractor.add_header_owned(header::USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        extractor.set_origin_static("https://www.tikwm.com");
        extractor.set_referer_static("https://www.tikwm.com/");

        Self {
            extractor,
            api_base: Self::BASE_URL.to_string(),
        }
    }

    /// Point the extractor at a different API base, mainly for tests against
    /// a local mock.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn fetch_post(&self) -> Result<TikwmData, ExtractorError> {
        let url = format!("{}/api/", self.api_base);
        let response = self
            .extractor
            .post(&url)
            .query(&[("url", self.extractor.url.as_str()), ("hd", "1")])
            .send()
            .await?
            .error_for_status()?;

        let envelope: TikwmResponse = response.json().await.map_err(|e| {
            ExtractorError::UpstreamParse(format!("malformed tikwm response: {e}"))
        })?;
        envelope.data.ok_or_else(|| {
            ExtractorError::UpstreamParse("tikwm response carried no data".to_string())
        })
    }
}

#[async_trait]
impl PlatformExtractor for TikTok {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<DownloadResult, ExtractorError> {
        let data = self.fetch_post().await?;
        let download = build_download(data)?;
        Ok(DownloadResult::TikTok(Box::new(download)))
    }
}

fn build_download(data: TikwmData) -> Result<TikTokDownload, ExtractorError> {
    let links = collect_links(&data)?;
    let music_url = [data.music.as_deref(), data.music_info.play.as_deref()]
        .into_iter()
        .flatten()
        .find(|url| !url.is_empty())
        .unwrap_or_default()
        .to_string();

    Ok(TikTokDownload {
        status: true,
        title: data.title,
        taken_at: format_taken_at(data.create_time),
        region: data.region,
        id: data.id,
        durations: data.duration,
        duration: format!("{} Seconds", data.duration),
        cover: data.cover,
        size_wm: data.wm_size,
        size_nowm: data.size,
        size_nowm_hd: data.hd_size,
        data: links,
        music_info: TikTokMusic {
            id: data.music_info.id,
            title: data.music_info.title,
            author: data.music_info.author,
            album: data.music_info.album.filter(|album| !album.is_empty()),
            url: music_url,
        },
        stats: TikTokStats {
            views: format_grouped_count(data.play_count),
            likes: format_grouped_count(data.digg_count),
            comment: format_grouped_count(data.comment_count),
            share: format_grouped_count(data.share_count),
            download: format_grouped_count(data.download_count),
        },
        author: TikTokAuthor {
            id: data.author.id,
            fullname: data.author.unique_id,
            nickname: data.author.nickname,
            avatar: data.author.avatar,
        },
    })
}

/// Links in presentation order. A post with none of the video size fields is
/// an image carousel and emits one photo entry per image; anything else emits
/// one entry per present, non-empty play URL in watermark, no-watermark,
/// no-watermark-HD order.
fn collect_links(data: &TikwmData) -> Result<Vec<TikTokLink>, ExtractorError> {
    let is_photo_post = data.size.is_none() && data.wm_size.is_none() && data.hd_size.is_none();
    if is_photo_post {
        let images = data.images.as_ref().ok_or_else(|| {
            ExtractorError::UpstreamParse("photo post without an image list".to_string())
        })?;
        return Ok(images
            .iter()
            .map(|url| TikTokLink {
                kind: TikTokLinkKind::Photo,
                url: url.clone(),
            })
            .collect());
    }

    let candidates = [
        (TikTokLinkKind::Watermark, data.wmplay.as_deref()),
        (TikTokLinkKind::Nowatermark, data.play.as_deref()),
        (TikTokLinkKind::NowatermarkHd, data.hdplay.as_deref()),
    ];
    Ok(candidates
        .into_iter()
        .filter_map(|(kind, url)| {
            url.filter(|url| !url.is_empty()).map(|url| TikTokLink {
                kind,
                url: url.to_string(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn data_from(value: serde_json::Value) -> TikwmData {
        serde_json::from_value(value).unwrap()
    }

    fn base_post() -> serde_json::Value {
        json!({
            "id": "7231234567890",
            "title": "cat does a flip",
            "region": "ID",
            "cover": "https://cdn.tikwm.com/cover.jpg",
            "duration": 15,
            "create_time": 1684108800,
            "music_info": {
                "id": "m1",
                "title": "original sound",
                "author": "artist",
                "album": "",
                "play": "https://cdn.tikwm.com/music.mp3"
            },
            "play_count": 1234567,
            "digg_count": 1000,
            "comment_count": 999,
            "share_count": 12,
            "download_count": 0,
            "author": {
                "id": "u1",
                "unique_id": "cat_handle",
                "nickname": "Cat",
                "avatar": "https://cdn.tikwm.com/avatar.jpg"
            }
        })
    }

    #[test]
    fn test_photo_post_emits_one_entry_per_image() {
        let mut post = base_post();
        post["images"] = json!(["https://i/1.jpg", "https://i/2.jpg", "https://i/3.jpg"]);
        let links = collect_links(&data_from(post)).unwrap();
        assert_eq!(
            links,
            vec![
                TikTokLink {
                    kind: TikTokLinkKind::Photo,
                    url: "https://i/1.jpg".to_string()
                },
                TikTokLink {
                    kind: TikTokLinkKind::Photo,
                    url: "https://i/2.jpg".to_string()
                },
                TikTokLink {
                    kind: TikTokLinkKind::Photo,
                    url: "https://i/3.jpg".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_photo_post_without_images_is_parse_error() {
        let err = collect_links(&data_from(base_post())).unwrap_err();
        assert!(matches!(err, ExtractorError::UpstreamParse(_)));
    }

    #[test]
    fn test_video_links_keep_fixed_order_and_skip_empty() {
        let mut post = base_post();
        post["size"] = json!(1048576);
        post["wmplay"] = json!("https://v/wm.mp4");
        post["play"] = json!("");
        post["hdplay"] = json!("https://v/hd.mp4");
        let links = collect_links(&data_from(post)).unwrap();
        assert_eq!(
            links,
            vec![
                TikTokLink {
                    kind: TikTokLinkKind::Watermark,
                    url: "https://v/wm.mp4".to_string()
                },
                TikTokLink {
                    kind: TikTokLinkKind::NowatermarkHd,
                    url: "https://v/hd.mp4".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_build_download_maps_fields() {
        let mut post = base_post();
        post["size"] = json!(1048576);
        post["wm_size"] = json!(1310720);
        post["play"] = json!("https://v/play.mp4");
        post["music"] = json!("");

        let download = build_download(data_from(post)).unwrap();
        assert!(download.status);
        assert_eq!(download.title, "cat does a flip");
        assert_eq!(download.taken_at, "Tuesday, January 20,  at 11:48:28 AM");
        assert_eq!(download.durations, 15);
        assert_eq!(download.duration, "15 Seconds");
        assert_eq!(download.size_nowm, Some(1048576));
        assert_eq!(download.size_wm, Some(1310720));
        assert_eq!(download.size_nowm_hd, None);
        assert_eq!(download.stats.views, "1.234.567");
        assert_eq!(download.stats.likes, "1.000");
        assert_eq!(download.stats.comment, "999");
        assert_eq!(download.stats.download, "0");
        // Empty top-level music falls back to the track's play URL, and an
        // empty album becomes null.
        assert_eq!(download.music_info.url, "https://cdn.tikwm.com/music.mp3");
        assert_eq!(download.music_info.album, None);
        assert_eq!(download.author.fullname, "cat_handle");
        assert_eq!(download.author.nickname, "Cat");
    }

    #[tokio::test]
    async fn test_extract_against_mock_api() {
        let mut server = mockito::Server::new_async().await;
        let mut post = base_post();
        post["size"] = json!(1048576);
        post["play"] = json!("https://v/play.mp4");
        let api = server
            .mock("POST", "/api/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "url".into(),
                    "https://www.tiktok.com/@cat_handle/video/7231234567890".into(),
                ),
                Matcher::UrlEncoded("hd".into(), "1".into()),
            ]))
            .match_header("accept", "application/json, text/javascript, */*; q=0.01")
            .match_header("user-agent", "Mozilla/5.0")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"code": 0, "msg": "success", "data": post}).to_string())
            .create_async()
            .await;

        let extractor = TikTok::new(
            "https://www.tiktok.com/@cat_handle/video/7231234567890".to_string(),
            Client::new(),
        )
        .with_api_base(server.url());
        let result = extractor.extract().await.unwrap();
        let DownloadResult::TikTok(download) = result else {
            panic!("expected a TikTok result");
        };

        assert_eq!(
            download.data,
            vec![TikTokLink {
                kind: TikTokLinkKind::Nowatermark,
                url: "https://v/play.mp4".to_string()
            }]
        );
        assert_eq!(download.id, "7231234567890");
        api.assert_async().await;
    }

    #[tokio::test]
    async fn test_envelope_without_data_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        let _api = server
            .mock("POST", "/api/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code": -1, "msg": "url invalid"}"#)
            .create_async()
            .await;

        let extractor =
            TikTok::new("https://www.tiktok.com/bad".to_string(), Client::new())
                .with_api_base(server.url());
        let err = extractor.extract().await.unwrap_err();
        assert!(matches!(err, ExtractorError::UpstreamParse(_)));
    }

    #[tokio::test]
    #[ignore]
    async fn test_extract() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        let extractor = TikTok::new(
            "https://www.tiktok.com/@tiktok/video/7106594312292453675".to_string(),
            Client::new(),
        );
        let result = extractor.extract().await.unwrap();
        println!("{result:?}");
    }
}
