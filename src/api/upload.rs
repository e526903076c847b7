//! Shared multipart upload extraction
//!
//! Both server variants accept the same form field, so the field walk and the
//! upload validation rules live here and each surface maps the failures into
//! its own response shape.

use axum::extract::Multipart;
use thiserror::Error;

/// Form field holding the image in both variants.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Invalid multipart request: {0}")]
    Multipart(String),

    #[error("Failed to read the uploaded file: {0}")]
    Read(String),

    #[error("No file part in the request")]
    MissingFile,

    #[error("No file selected")]
    EmptyFilename,
}

pub struct Upload {
    pub data: Vec<u8>,
    pub filename: String,
}

/// Pull the image out of a multipart form.
///
/// Requires a `file` field carrying a non-empty filename; the bytes are
/// returned untouched. Unknown fields are skipped.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Upload, UploadError> {
    let mut data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == UPLOAD_FIELD {
            filename = field.file_name().map(|s| s.to_string());
            data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| UploadError::Read(e.to_string()))?
                    .to_vec(),
            );
        }
    }

    let data = data.ok_or(UploadError::MissingFile)?;

    match filename.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Ok(Upload {
            data,
            filename: name.to_string(),
        }),
        _ => Err(UploadError::EmptyFilename),
    }
}
