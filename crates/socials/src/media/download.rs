use serde::{Serialize, Serializer};
use serde_json::Value;

/// Normalized extraction output, one variant per platform.
///
/// The shapes are deliberately not unified: each platform keeps the wire
/// format its frontend consumers already branch on. Serialization is untagged
/// so a variant serializes exactly as its payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum DownloadResult {
    YouTube(YoutubeDownloads),
    TikTok(Box<TikTokDownload>),
    Facebook(FacebookDownload),
    Instagram(Vec<InstagramLink>),
}

/// YouTube-class output: the upstream info payload plus synthesized
/// direct-download links for every resolution and audio bitrate.
#[derive(Debug, Clone, Serialize)]
pub struct YoutubeDownloads {
    pub info: Value,
    pub video: Vec<Value>,
    pub audio: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TikTokDownload {
    pub status: bool,
    pub title: String,
    /// Long-form date string with the literal "1970" stripped, kept verbatim
    /// from the legacy formatting.
    pub taken_at: String,
    pub region: String,
    pub id: String,
    /// Raw duration in seconds.
    pub durations: i64,
    /// Display duration, "<n> Seconds".
    pub duration: String,
    pub cover: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_wm: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_nowm: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_nowm_hd: Option<u64>,
    pub data: Vec<TikTokLink>,
    pub music_info: TikTokMusic,
    pub stats: TikTokStats,
    pub author: TikTokAuthor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TikTokLink {
    #[serde(rename = "type")]
    pub kind: TikTokLinkKind,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TikTokLinkKind {
    Photo,
    Watermark,
    Nowatermark,
    NowatermarkHd,
}

impl TikTokLinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Watermark => "watermark",
            Self::Nowatermark => "nowatermark",
            Self::NowatermarkHd => "nowatermark_hd",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TikTokMusic {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Explicit null when the upstream has no album.
    pub album: Option<String>,
    pub url: String,
}

/// Engagement counters, digit-grouped with '.' regardless of locale.
#[derive(Debug, Clone, Serialize)]
pub struct TikTokStats {
    pub views: String,
    pub likes: String,
    pub comment: String,
    pub share: String,
    pub download: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TikTokAuthor {
    pub id: String,
    /// The upstream handle (`unique_id`).
    pub fullname: String,
    pub nickname: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FacebookDownload {
    pub caption: String,
    pub preview: String,
    pub results: Vec<FacebookLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacebookLink {
    pub quality: QualityLabel,
    #[serde(rename = "type")]
    pub kind: FacebookGrade,
    pub url: String,
}

/// Leading numeric quality of a Facebook option, or the empty string when the
/// option text carries no usable number. Serializes as a bare number or "".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityLabel {
    Pixels(u64),
    Unknown,
}

impl Serialize for QualityLabel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Pixels(value) => serializer.serialize_u64(*value),
            Self::Unknown => serializer.serialize_str(""),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FacebookGrade {
    Hd,
    Sd,
}

impl FacebookGrade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hd => "HD",
            Self::Sd => "SD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstagramLink {
    pub title: String,
    pub url: String,
}
