//! Classification error taxonomy

use thiserror::Error;

/// Errors surfaced by the classification service.
///
/// Upload validation (missing field, empty filename) is rejected at the API
/// boundary before the service is involved, so it does not appear here.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("Model not loaded. Check the server logs from startup.")]
    ModelNotLoaded,

    #[error("Could not decode the uploaded file as an image: {0}")]
    InvalidImage(String),

    #[error("Inference failed: {0}")]
    Inference(String),
}
