//! Service configuration. JSON file, every section optional.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Path to the ONNX rhythm classifier
    pub model_path: PathBuf,
    /// Window and alert parameters, applied to every session
    pub predictor: PredictorConfig,
    pub server: ServerConfig,
    /// Synthetic stream driver
    pub simulate: SimulateConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Samples per classifier window
    pub window_size: usize,
    /// Risky / Future Risk alerts fire only above this confidence (0.0–1.0)
    pub confidence_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulateConfig {
    /// Number of samples generated when none is given on the command line
    pub samples: usize,
    /// Delay between samples (milliseconds)
    pub interval_ms: u64,
    /// Standard deviation of the additive gaussian noise
    pub noise_std: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("lstm_ecg_model.onnx"),
            predictor: PredictorConfig::default(),
            server: ServerConfig::default(),
            simulate: SimulateConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            confidence_threshold: 0.8,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
        }
    }
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            samples: 200,
            interval_ms: 100,
            noise_std: 0.2,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl PredictorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::Configuration("window_size must be positive".into()));
        }
        let t = self.confidence_threshold;
        if !t.is_finite() || !(0.0..=1.0).contains(&t) {
            return Err(Error::Configuration(format!(
                "confidence_threshold must lie in [0, 1], got {}",
                t
            )));
        }
        Ok(())
    }
}

impl ServiceConfig {
    /// Load from JSON file if present; otherwise return default.
    /// A file that exists but does not parse is a configuration error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str::<ServiceConfig>(&data)
            .map_err(|e| Error::Configuration(format!("{}: {}", path.display(), e)))
    }

    pub fn validate(&self) -> Result<()> {
        self.predictor.validate()?;
        let noise = self.simulate.noise_std;
        if !noise.is_finite() || noise <= 0.0 {
            return Err(Error::Configuration(format!(
                "simulate.noise_std must be positive, got {}",
                noise
            )));
        }
        Ok(())
    }
}
