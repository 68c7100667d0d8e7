//! Wire models for the tikwm.com post API. Field names follow the upstream
//! payload; only the fields the extractor consumes are declared.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct TikwmResponse {
    pub data: Option<TikwmData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TikwmData {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub create_time: i64,
    #[serde(default)]
    pub duration: i64,
    // Video posts carry at least one of the sizes; photo posts carry none.
    pub size: Option<u64>,
    pub wm_size: Option<u64>,
    pub hd_size: Option<u64>,
    pub images: Option<Vec<String>>,
    pub play: Option<String>,
    pub wmplay: Option<String>,
    pub hdplay: Option<String>,
    pub music: Option<String>,
    pub music_info: TikwmMusic,
    pub play_count: i64,
    pub digg_count: i64,
    pub comment_count: i64,
    pub share_count: i64,
    pub download_count: i64,
    pub author: TikwmAuthor,
}

#[derive(Debug, Deserialize)]
pub(super) struct TikwmMusic {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    pub album: Option<String>,
    pub play: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TikwmAuthor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub unique_id: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub avatar: String,
}
