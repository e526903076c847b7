//! Inference engine module
//!
//! Image decoding, preprocessing and tract-based ONNX inference.

pub mod classifier;
pub mod preprocess;

pub use classifier::Classifier;
