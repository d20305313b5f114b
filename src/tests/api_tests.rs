#[cfg(test)]
mod tests {
    use std::fs;

    use axum::{
        body::{Body, Bytes},
        http::{header, HeaderMap, Request, StatusCode},
        middleware::from_fn_with_state,
        Router,
    };
    use http_body_util::BodyExt; // for .collect()
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::config::AppConfig;
    use crate::middleware::security_headers::security_headers_middleware;
    use crate::routes;
    use crate::state::AppState;
    use crate::tests::sample_library;

    fn setup_test_app() -> (TempDir, Router) {
        let (dir, library) = sample_library();
        let state = AppState::with_library(library, AppConfig::default());
        let cfg = state.config.clone();
        let app = routes::router(state).layer(from_fn_with_state(cfg, security_headers_middleware));
        (dir, app)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = get(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn index_describes_api() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["name"], "mediashelf");
        assert!(v["endpoints"]["GET /api/search?q=&type="].is_string());
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["status"], "ok");
        let ts = v["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn categories_endpoint() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/categories").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["count"], 2);
        assert_eq!(v["categories"][0]["name"], "clips");
        assert_eq!(v["categories"][1]["name"], "photos");
        assert_eq!(v["categories"][1]["path"], "/api/categories/photos");
        assert_eq!(v["categories"][1]["filesUrl"], "/api/categories/photos/files");
    }

    #[tokio::test]
    async fn category_files_endpoint() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/categories/photos/files").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["category"], "photos");
        assert_eq!(v["count"], 2);
        assert_eq!(v["totalBytes"], 2058);
        assert_eq!(v["totalSize"], "2.01 KB");

        let a = &v["files"][0];
        assert_eq!(a["name"], "a.jpg");
        assert_eq!(a["size"], 2048);
        assert_eq!(a["sizeFormatted"], "2 KB");
        assert_eq!(a["extension"], ".jpg");
        assert_eq!(a["type"], "image");
        assert_eq!(a["url"], "/api/files/photos/a.jpg");
        assert_eq!(a["downloadUrl"], "/api/download/photos/a.jpg");
        assert_eq!(v["files"][1]["type"], "other");
    }

    #[tokio::test]
    async fn empty_category_totals_zero_bytes() {
        let (dir, app) = setup_test_app();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let (status, v) = get_json(&app, "/api/categories/empty/files").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["count"], 0);
        assert_eq!(v["totalSize"], "0 Bytes");
    }

    #[tokio::test]
    async fn missing_category_is_404() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/categories/missing/files").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(v["error"].as_str().unwrap().contains("missing"));
        assert_eq!(v["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn percent_encoded_category_is_decoded() {
        let (dir, app) = setup_test_app();
        fs::create_dir(dir.path().join("Summer 2024")).unwrap();
        fs::write(dir.path().join("Summer 2024/beach.webp"), b"webp").unwrap();

        let (status, v) = get_json(&app, "/api/categories/Summer%202024/files").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["files"][0]["url"], "/api/files/Summer%202024/beach.webp");

        let (status, headers, body) = get(&app, "/api/files/Summer%202024/beach.webp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/webp");
        assert_eq!(&body[..], b"webp");
    }

    #[tokio::test]
    async fn all_files_endpoint() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/files").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["count"], 3);
        assert_eq!(v["files"][0]["category"], "clips");
        assert_eq!(v["files"][0]["name"], "c.mp4");
        assert_eq!(v["files"][0]["type"], "video");
        assert_eq!(v["files"][0]["sizeFormatted"], "4.77 MB");
    }

    #[tokio::test]
    async fn stream_file_inline() {
        let (_dir, app) = setup_test_app();
        let (status, headers, body) = get(&app, "/api/files/photos/a.jpg").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
        assert_eq!(headers[header::CONTENT_LENGTH], "2048");
        assert!(headers[header::CONTENT_DISPOSITION].to_str().unwrap().starts_with("inline"));
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers.get(header::CACHE_CONTROL).is_none());
        assert_eq!(body.len(), 2048);
    }

    #[tokio::test]
    async fn download_file_as_attachment() {
        let (_dir, app) = setup_test_app();
        let (status, headers, body) = get(&app, "/api/download/clips/c.mp4").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "video/mp4");
        assert_eq!(headers[header::CONTENT_DISPOSITION], "attachment; filename=\"c.mp4\"");
        assert_eq!(body.len(), 5_000_000);
    }

    #[tokio::test]
    async fn missing_file_is_404() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/files/photos/missing.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(v["error"].is_string());

        let (status, _) = get_json(&app, "/api/download/photos/missing.jpg").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn traversal_is_400() {
        let (dir, app) = setup_test_app();
        fs::write(dir.path().join("secret.txt"), b"top secret").unwrap();

        let (status, v) = get_json(&app, "/api/files/photos/..%2Fsecret.txt").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(v["code"], "INVALID_INPUT");

        let (status, _) = get_json(&app, "/api/download/photos/..%2F..%2F..%2Fetc%2Fpasswd").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(&app, "/api/categories/..%2F/files").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn denylisted_file_is_404() {
        let (_dir, app) = setup_test_app();
        let (status, _) = get_json(&app, "/api/files/.git/HEAD").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = get_json(&app, "/api/files/photos/.DS_Store").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn search_requires_parameters() {
        let (_dir, app) = setup_test_app();
        for uri in ["/api/search", "/api/search?q=&type="] {
            let (status, v) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert!(v["error"].is_string());
        }
    }

    #[tokio::test]
    async fn search_query_keeps_spaces() {
        let (dir, app) = setup_test_app();
        fs::write(dir.path().join("clips/my clip.mov"), b"mov").unwrap();
        let (status, v) = get_json(&app, "/api/search?q=%20clip").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["query"], " clip");
        assert_eq!(v["count"], 1);
        assert_eq!(v["results"][0]["name"], "my clip.mov");
    }

    #[tokio::test]
    async fn search_rejects_unknown_type() {
        let (_dir, app) = setup_test_app();
        let (status, _) = get_json(&app, "/api/search?type=audio").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn search_by_query() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/search?q=cl").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["count"], 1);
        assert_eq!(v["query"], "cl");
        assert!(v["type"].is_null());
        assert_eq!(v["results"][0]["category"], "clips");
        assert_eq!(v["results"][0]["name"], "c.mp4");
    }

    #[tokio::test]
    async fn search_by_type() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/search?type=image").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["count"], 1);
        assert_eq!(v["type"], "image");
        assert!(v["query"].is_null());
        assert_eq!(v["results"][0]["name"], "a.jpg");
    }

    #[tokio::test]
    async fn json_responses_are_not_cached() {
        let (_dir, app) = setup_test_app();
        let (_, headers, _) = get(&app, "/api/categories").await;
        assert_eq!(headers[header::CACHE_CONTROL], "no-store");
        assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    }

    #[tokio::test]
    async fn metrics_count_requests() {
        let (_dir, app) = setup_test_app();
        get(&app, "/api/search?q=a").await;
        get(&app, "/api/files/photos/b.txt").await;
        get(&app, "/api/download/photos/b.txt").await;

        let (status, v) = get_json(&app, "/api/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["searches"], 1);
        assert_eq!(v["streams_started"], 1);
        assert_eq!(v["downloads_started"], 1);
        assert_eq!(v["bytes_served"], 20);
    }

    #[tokio::test]
    async fn unknown_route_is_json_404() {
        let (_dir, app) = setup_test_app();
        let (status, v) = get_json(&app, "/api/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(v["error"], "Route not found");
    }
}
