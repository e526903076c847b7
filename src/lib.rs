//! Cat vs Dog Classification Service Library

pub mod api;
pub mod config;
pub mod engine;
pub mod service;

pub use config::Config;
