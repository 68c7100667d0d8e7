use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("upstream auth error: {0}")]
    UpstreamAuth(String),
    #[error("upstream info error: {0}")]
    UpstreamInfo(String),
    #[error("upstream parse error: {0}")]
    UpstreamParse(String),
    #[error("no downloadable media found")]
    EmptyResult,
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
}
