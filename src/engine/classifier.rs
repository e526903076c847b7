//! Cat vs Dog ONNX classifier
//!
//! Wraps a tract inference plan for a binary cat/dog model. The network takes
//! one [1, size, size, 3] RGB tensor and produces either a single sigmoid
//! score or a two-class probability vector.

use std::time::Instant;

use anyhow::{Context, Result};
use image::DynamicImage;
use tract_onnx::prelude::*;
use tract_onnx::tract_core;
use tracing::info;

use crate::config::{ModelConfig, Normalization};
use super::preprocess;

type RunnablePlan = tract_core::model::typed::RunnableModel<
    TypedFact,
    Box<dyn TypedOp>,
    Graph<TypedFact, Box<dyn TypedOp>>,
>;

pub struct Classifier {
    plan: RunnablePlan,
    input_size: u32,
    normalization: Normalization,
}

impl Classifier {
    /// Load and optimize the ONNX model for a fixed input shape.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        info!("Loading model from {}", config.path.display());
        let start = Instant::now();

        let side = config.input_size as usize;
        let plan = tract_onnx::onnx()
            .model_for_path(&config.path)
            .with_context(|| format!("failed to read model file {}", config.path.display()))?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, side, side, 3)),
            )?
            .into_optimized()?
            .into_runnable()?;

        info!("Model loaded in {:?}", start.elapsed());
        Ok(Self {
            plan,
            input_size: config.input_size,
            normalization: config.normalization,
        })
    }

    /// Run one forward pass over a decoded image and return the raw output
    /// scores in model order.
    pub fn run(&self, image: &DynamicImage) -> Result<Vec<f32>> {
        let input = preprocess::to_model_input(image, self.input_size, self.normalization);
        let outputs = self
            .plan
            .run(tvec!(input.into_tensor().into()))
            .context("forward pass failed")?;
        let view = outputs[0]
            .to_array_view::<f32>()
            .context("model output is not an f32 tensor")?;
        Ok(view.iter().copied().collect())
    }
}
