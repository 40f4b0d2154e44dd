//! ECG Sentinel — streaming heart-rhythm classification with trend and alert analysis.
//!
//! Modular structure:
//! - [`window`] — Rolling sample buffer and per-window min-max scaling
//! - [`model`] — Classifier capability, label table, ONNX backend
//! - [`predictor`] — Streaming predictor, trend tracking, alert rules
//! - [`sessions`] — Predictors keyed by stream/session id
//! - [`server`] — HTTP shim
//! - [`simulate`] — Synthetic ECG driver
//! - [`logging`] — Structured logging

pub mod config;
pub mod error;
pub mod window;
pub mod model;
pub mod predictor;
pub mod sessions;
pub mod server;
pub mod simulate;
pub mod logging;

pub use config::ServiceConfig;
pub use error::{Error, Result};
pub use window::{WindowBuffer, ScaledWindow};
pub use model::{Classifier, ClassDistribution, EcgClass, OnnxClassifier};
pub use predictor::{IngestOutcome, PredictionResult, StreamingPredictor};
pub use sessions::SessionRegistry;
pub use logging::StructuredLogger;
