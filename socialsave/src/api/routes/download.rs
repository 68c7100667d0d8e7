//! Download link extraction route.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::api::error::{ApiError, ApiResult};
use crate::api::models::DownloadQuery;
use crate::api::server::AppState;
use socials_parser::DownloadResult;

/// Create the download router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(download))
}

/// Extract download links for a content URL on the given platform.
///
/// The response shape is platform-specific; callers branch on the platform
/// they asked for.
async fn download(
    State(state): State<AppState>,
    Query(query): Query<DownloadQuery>,
) -> ApiResult<Json<DownloadResult>> {
    let (Some(url), Some(platform)) = (
        query.url.filter(|url| !url.is_empty()),
        query.platform.filter(|platform| !platform.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Missing url or platform query"));
    };

    tracing::info!(%platform, url = %url, "download request");
    let result = state.dispatcher.dispatch_alias(&url, &platform).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::create_router;
    use axum_test::TestServer;
    use mockito::Matcher;
    use serde_json::{Value, json};
    use socials_parser::{Dispatcher, UpstreamConfig};
    use std::sync::Arc;

    fn test_server(state: AppState) -> TestServer {
        TestServer::new(create_router(state)).unwrap()
    }

    fn state_with_tiktok_base(base: String) -> AppState {
        let config = UpstreamConfig {
            tiktok_base: base,
            ..UpstreamConfig::default()
        };
        let dispatcher = Dispatcher::new(reqwest::Client::new(), config);
        AppState::new().with_dispatcher(Arc::new(dispatcher))
    }

    #[tokio::test]
    async fn test_missing_url_is_rejected() {
        let server = test_server(AppState::new());
        let response = server
            .get("/download")
            .add_query_param("platform", "tiktok")
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Missing url or platform query"}));
    }

    #[tokio::test]
    async fn test_missing_platform_is_rejected() {
        let server = test_server(AppState::new());
        let response = server
            .get("/download")
            .add_query_param("url", "https://example.com/v")
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Missing url or platform query"}));
    }

    #[tokio::test]
    async fn test_empty_params_count_as_missing() {
        let server = test_server(AppState::new());
        let response = server
            .get("/download")
            .add_query_param("url", "")
            .add_query_param("platform", "")
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Missing url or platform query"}));
    }

    #[tokio::test]
    async fn test_unknown_platform_is_rejected() {
        let server = test_server(AppState::new());
        let response = server
            .get("/download")
            .add_query_param("url", "https://example.com/v")
            .add_query_param("platform", "twitter")
            .await;
        response.assert_status_bad_request();
        response.assert_json(&json!({"error": "Unsupported platform"}));
    }

    #[tokio::test]
    async fn test_tiktok_download_end_to_end() {
        let mut upstream = mockito::Server::new_async().await;
        let api = upstream
            .mock("POST", "/api/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "url".into(),
                    "https://www.tiktok.com/@user/video/1".into(),
                ),
                Matcher::UrlEncoded("hd".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "code": 0,
                    "data": {
                        "id": "1",
                        "title": "clip",
                        "size": 2048,
                        "wm_size": 4096,
                        "play": "https://v/play.mp4",
                        "music_info": {
                            "id": "m1",
                            "title": "original sound",
                            "author": "artist",
                            "play": "https://v/music.mp3"
                        },
                        "play_count": 10,
                        "digg_count": 2,
                        "comment_count": 1,
                        "share_count": 0,
                        "download_count": 0,
                        "author": {
                            "id": "u1",
                            "unique_id": "handle",
                            "nickname": "name",
                            "avatar": ""
                        }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let server = test_server(state_with_tiktok_base(upstream.url()));
        let response = server
            .get("/download")
            .add_query_param("url", "https://www.tiktok.com/@user/video/1")
            .add_query_param("platform", "tt")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], true);
        assert_eq!(
            body["data"],
            json!([{"type": "nowatermark", "url": "https://v/play.mp4"}])
        );
        assert_eq!(body["music_info"]["title"], "original sound");
        assert_eq!(body["music_info"]["url"], "https://v/music.mp3");
        api.assert_async().await;
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_as_server_error() {
        let mut upstream = mockito::Server::new_async().await;
        let _api = upstream
            .mock("POST", "/api/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html>challenge page</html>")
            .create_async()
            .await;

        let server = test_server(state_with_tiktok_base(upstream.url()));
        let response = server
            .get("/download")
            .add_query_param("url", "https://www.tiktok.com/@user/video/1")
            .add_query_param("platform", "tiktok")
            .await;
        response.assert_status_internal_server_error();

        let body: Value = response.json();
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("upstream parse error"));
    }
}
