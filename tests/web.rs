//! Integration test: HTML form page endpoints
//!
//! The form variant reports every outcome inline in the re-rendered page,
//! so these assert on markup instead of status codes.

use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use catdog::api::{create_pages_router, AppState};
use catdog::config::Config;
use catdog::service::ClassifierService;

const BOUNDARY: &str = "catdog-test-boundary";

fn test_app() -> axum::Router {
    let upload_dir = std::env::temp_dir().join("catdog-test-web-uploads");
    std::fs::create_dir_all(&upload_dir).ok();

    let mut config = Config::default();
    config.model.path = "/nonexistent/catdog-test-model.onnx".into();

    let service = Arc::new(ClassifierService::new(&config.model));
    let state = Arc::new(AppState {
        service,
        upload_dir,
        start_time: Instant::now(),
        requests_served: AtomicU64::new(0),
    });
    create_pages_router(state)
}

fn multipart_request(field: &str, filename: Option<&str>, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    match filename {
        Some(name) => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\n")
                .as_bytes(),
        ),
        None => body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{field}\"\r\n").as_bytes(),
        ),
    }
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn png_bytes() -> Vec<u8> {
    let img = image::DynamicImage::new_rgb8(4, 4);
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_form_page_renders() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .starts_with("text/html"));

    let page = body_text(response).await;
    assert!(page.contains("<form"));
    assert!(page.contains("name=\"file\""));
}

#[tokio::test]
async fn test_post_missing_file_shows_inline_error() {
    let app = test_app();
    let response = app
        .oneshot(multipart_request("other", Some("photo.png"), &png_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("No file part"));
    assert!(page.contains("class=\"error\""));
}

#[tokio::test]
async fn test_post_empty_filename_shows_inline_error() {
    let app = test_app();
    let response = app
        .oneshot(multipart_request("file", Some(""), &png_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("No file selected"));
}

#[tokio::test]
async fn test_post_without_model_shows_inline_error() {
    let app = test_app();
    let response = app
        .oneshot(multipart_request("file", Some("photo.png"), &png_bytes()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("Model not loaded"));
    assert!(!page.contains("Prediction:"));
}

#[tokio::test]
async fn test_persisted_uploads_are_served() {
    let app = test_app();

    let upload_dir = std::env::temp_dir().join("catdog-test-web-uploads");
    let name = format!("{}.jpg", uuid::Uuid::new_v4());
    std::fs::write(upload_dir.join(&name), b"jpeg bytes").unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/uploads/{name}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
