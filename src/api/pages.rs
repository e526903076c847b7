//! HTML form variant handlers
//!
//! The second server presents a plain upload form, accepts the same multipart
//! field via POST and re-renders the page with the outcome inline. Uploads
//! that classify successfully are persisted and served back for display.

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Html,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use uuid::Uuid;

use crate::engine::preprocess::decode_image;
use crate::service::Prediction;

use super::rest::{AppState, MAX_UPLOAD_BYTES};
use super::upload::read_upload;

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Cat vs Dog Classifier</title>
<style>
  body { font-family: sans-serif; max-width: 640px; margin: 40px auto; padding: 0 16px; }
  form { margin: 24px 0; padding: 24px; border: 2px dashed #9ca3af; border-radius: 8px; }
  .error { color: #b00020; }
  img { max-width: 100%; border-radius: 8px; margin-top: 12px; }
</style>
</head>
<body>
<h1>Cat vs Dog Classifier</h1>
<p>Upload a photo and the model will decide which one it is.</p>
<form method="post" enctype="multipart/form-data">
  <input type="file" name="file" accept="image/*">
  <button type="submit">Classify</button>
</form>
{result}
</body>
</html>
"#;

/// Create the form page router
pub fn create_pages_router(state: Arc<AppState>) -> Router {
    let uploads = ServeDir::new(state.upload_dir.clone());

    Router::new()
        .route("/", get(page_handler).post(classify_handler))
        // Persisted uploads, referenced by the result markup
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the empty upload form
async fn page_handler() -> Html<String> {
    render_page("")
}

/// Classify the posted form upload and re-render the page
async fn classify_handler(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Html<String> {
    let upload = match read_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => return render_error(&e.to_string()),
    };

    let prediction = match state.service.predict(&upload.data).await {
        Ok(prediction) => prediction,
        Err(e) => return render_error(&e.to_string()),
    };

    let image_url = save_upload(&state.upload_dir, &upload.data);
    info!(
        "Classified {} as {} ({:.1}%)",
        upload.filename,
        prediction.label.as_str(),
        prediction.confidence
    );

    render_result(&prediction, image_url.as_deref())
}

fn render_page(result_block: &str) -> Html<String> {
    Html(PAGE_TEMPLATE.replace("{result}", result_block))
}

fn render_error(message: &str) -> Html<String> {
    render_page(&format!(r#"<p class="error">{}</p>"#, escape_html(message)))
}

fn render_result(prediction: &Prediction, image_url: Option<&str>) -> Html<String> {
    let mut block = format!(
        "<h2>Prediction: {}</h2>\n<p>Confidence: {:.2}%</p>",
        prediction.label.as_str(),
        prediction.confidence
    );
    if let Some(url) = image_url {
        block.push_str(&format!("\n<img src=\"{}\" alt=\"uploaded image\">", url));
    }
    render_page(&block)
}

/// Persist an upload for display and return its URL path.
///
/// The image is re-encoded as JPEG with EXIF orientation applied, so the
/// browser shows exactly what the classifier saw. Persistence failures are
/// logged and the response simply omits the image.
fn save_upload(dir: &Path, data: &[u8]) -> Option<String> {
    if let Err(e) = std::fs::create_dir_all(dir) {
        error!("Failed to create upload dir {}: {}", dir.display(), e);
        return None;
    }

    let name = format!("{}.jpg", Uuid::new_v4());
    let path = dir.join(&name);

    let saved = match decode_image(data) {
        Ok(img) => img.to_rgb8().save(&path).map_err(|e| e.to_string()),
        // keep the raw bytes if re-decoding fails
        Err(_) => std::fs::write(&path, data).map_err(|e| e.to_string()),
    };

    if let Err(e) = saved {
        error!("Failed to save upload to {}: {}", path.display(), e);
        return None;
    }

    Some(format!("/uploads/{}", name))
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
