//! Service layer module

pub mod classifier_service;
pub mod error;
pub mod types;

pub use classifier_service::ClassifierService;
pub use error::ClassifyError;
pub use types::*;
