pub mod download;

pub use download::{
    DownloadResult, FacebookDownload, FacebookGrade, FacebookLink, InstagramLink, QualityLabel,
    TikTokAuthor, TikTokDownload, TikTokLink, TikTokLinkKind, TikTokMusic, TikTokStats,
    YoutubeDownloads,
};
