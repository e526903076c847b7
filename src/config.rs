//! Classifier service configuration

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub uploads: UploadsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub api_port: u16,
    pub web_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub input_size: u32,
    pub normalization: Normalization,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadsConfig {
    pub dir: PathBuf,
}

/// Pixel normalization applied before the forward pass.
///
/// Both server binaries read the same scheme from config, so the API and the
/// form page always feed the model identically prepared tensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Scale into [0, 1] by dividing by 255.
    Scale,
    /// Scale into [-1, 1], the Xception-family convention.
    Signed,
}

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn default_path() -> &'static str {
        "config.toml"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                api_port: 8000,
                web_port: 5000,
            },
            model: ModelConfig {
                path: PathBuf::from("models/catdog.onnx"),
                input_size: 299,
                normalization: Normalization::Signed,
            },
            uploads: UploadsConfig {
                dir: PathBuf::from("uploads"),
            },
        }
    }
}
