//! Classifier service - Core business logic
//!
//! Owns the optional model handle and orchestrates decode, preprocessing and
//! inference for both server variants.

use std::sync::Arc;

use tracing::{error, info};

use crate::config::ModelConfig;
use crate::engine::preprocess::decode_image;
use crate::engine::Classifier;

use super::error::ClassifyError;
use super::types::{HealthResult, Prediction};

/// Cat vs Dog classification service
pub struct ClassifierService {
    classifier: Option<Arc<Classifier>>,
}

impl ClassifierService {
    /// Create the service, attempting the one-time model load.
    ///
    /// A load failure is logged and remembered rather than propagated: the
    /// servers still start and every later prediction reports the model as
    /// not loaded.
    pub fn new(config: &ModelConfig) -> Self {
        let classifier = match Classifier::load(config) {
            Ok(classifier) => Some(Arc::new(classifier)),
            Err(e) => {
                error!("Failed to load model from {}: {:#}", config.path.display(), e);
                info!(
                    "Place the model file at {} and restart to enable predictions",
                    config.path.display()
                );
                None
            }
        };

        Self { classifier }
    }

    /// Whether the model loaded at startup.
    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }

    /// Classify an uploaded image.
    ///
    /// The model check runs first: without a loaded model no decoding or
    /// inference is attempted. Decode and the forward pass are CPU-bound and
    /// run on the blocking pool.
    pub async fn predict(&self, image_data: &[u8]) -> Result<Prediction, ClassifyError> {
        let classifier = self
            .classifier
            .clone()
            .ok_or(ClassifyError::ModelNotLoaded)?;

        let image_data = image_data.to_vec();
        let scores = tokio::task::spawn_blocking(move || {
            let image = decode_image(&image_data)
                .map_err(|e| ClassifyError::InvalidImage(e.to_string()))?;
            classifier
                .run(&image)
                .map_err(|e| ClassifyError::Inference(e.to_string()))
        })
        .await
        .map_err(|e| ClassifyError::Inference(e.to_string()))??;

        Prediction::from_scores(&scores)
    }

    /// Get health status
    pub fn health(&self) -> HealthResult {
        HealthResult {
            healthy: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_loaded: self.is_ready(),
        }
    }
}
