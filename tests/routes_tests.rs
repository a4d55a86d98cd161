// tests/routes_tests.rs

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::io::Write;
use tower::ServiceExt;

use elfscout::{AppState, Config, server};

fn test_state(upload_dir: &std::path::Path, logs_dir: &std::path::Path) -> AppState {
    let config = Config {
        upload_dir: upload_dir.to_path_buf(),
        logs_dir: logs_dir.to_path_buf(),
        ..Config::default()
    };
    AppState { config }
}

fn multipart_body(boundary: &str, file_name: &str, contents: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    write!(
        data,
        "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
        boundary, file_name
    )
    .unwrap();
    data.extend_from_slice(contents);
    write!(data, "\r\n--{}--\r\n", boundary).unwrap();
    data
}

#[tokio::test]
async fn test_health_check() {
    let response = elfscout::routes::health_check().await;
    let body = response.0;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "elfscout");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_upload_rejects_disallowed_extension() {
    let dir = tempfile::tempdir().unwrap();
    let app = server::app(test_state(&dir.path().join("uploads"), &dir.path().join("logs")));

    let boundary = "---------------------------testboundary";
    let data = multipart_body(boundary, "notes.txt", b"hello");

    let req = Request::builder()
        .method("POST")
        .uri("/binary/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(data))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "invalid_extension");
}

#[tokio::test]
async fn test_upload_rejects_traversal_filename() {
    let dir = tempfile::tempdir().unwrap();
    let app = server::app(test_state(&dir.path().join("uploads"), &dir.path().join("logs")));

    let boundary = "---------------------------testboundary";
    let data = multipart_body(boundary, "../../etc/passwd.elf", b"hello");

    let req = Request::builder()
        .method("POST")
        .uri("/binary/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(data))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "invalid_filename");
}

#[tokio::test]
async fn test_upload_stores_allowed_file() {
    let dir = tempfile::tempdir().unwrap();
    let upload_dir = dir.path().join("uploads");
    let app = server::app(test_state(&upload_dir, &dir.path().join("logs")));

    let boundary = "---------------------------testboundary";
    let data = multipart_body(boundary, "sample.elf", b"\x7fELF-ish");

    let req = Request::builder()
        .method("POST")
        .uri("/binary/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(data))
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["file_name"], "sample.elf");
    assert!(upload_dir.join("sample.elf").exists());
}

#[tokio::test]
async fn test_checksec_endpoint_unknown_file() {
    let dir = tempfile::tempdir().unwrap();
    let app = server::app(test_state(&dir.path().join("uploads"), &dir.path().join("logs")));

    let req = Request::builder()
        .method("GET")
        .uri("/binary/checksec?filename=missing.elf")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["error"], "file_not_found");
}

#[tokio::test]
async fn test_saved_strings_missing_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = server::app(test_state(&dir.path().join("uploads"), &dir.path().join("logs")));

    let req = Request::builder()
        .method("GET")
        .uri("/binary/strings/saved?filename=never-analyzed.elf")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
