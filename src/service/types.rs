//! Service layer types

use serde::{Deserialize, Serialize};

use super::error::ClassifyError;

/// Decision threshold for the single-score sigmoid output.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// Class label produced by the binary classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Cat,
    Dog,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Cat => "Cat",
            Label::Dog => "Dog",
        }
    }
}

/// Classification result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    /// Confidence in the predicted label as a percentage, always in [50, 100].
    pub confidence: f32,
    /// Raw model output backing the decision, before thresholding.
    pub raw_score: f32,
}

impl Prediction {
    /// Interpret raw model output scores.
    ///
    /// A single score is treated as the sigmoid probability of "Dog": above
    /// the threshold the label is Dog with confidence `score`, otherwise Cat
    /// with confidence `1 - score`. A two-value output is treated as
    /// [cat, dog] class probabilities and the larger one wins. Anything else
    /// is a model mismatch.
    pub fn from_scores(scores: &[f32]) -> Result<Self, ClassifyError> {
        match scores {
            [score] => {
                let (label, fraction) = if *score > DECISION_THRESHOLD {
                    (Label::Dog, *score)
                } else {
                    (Label::Cat, 1.0 - *score)
                };
                Ok(Self {
                    label,
                    confidence: round2(fraction * 100.0),
                    raw_score: *score,
                })
            }
            [cat, dog] => {
                let (label, fraction) = if *dog > *cat {
                    (Label::Dog, *dog)
                } else {
                    (Label::Cat, *cat)
                };
                Ok(Self {
                    label,
                    confidence: round2(fraction * 100.0),
                    raw_score: fraction,
                })
            }
            _ => Err(ClassifyError::Inference(format!(
                "unexpected model output of {} values",
                scores.len()
            ))),
        }
    }
}

/// Health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResult {
    pub healthy: bool,
    pub version: String,
    pub model_loaded: bool,
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
