//! Streaming predictor: buffers samples, classifies full windows, and layers
//! trend and alert analysis across successive predictions.

mod alert;
mod engine;
mod trend;

pub use alert::{alert_for, Alert, LOW_CONFIDENCE_FLOOR};
pub use engine::StreamingPredictor;
pub use trend::TrendTracker;

use crate::model::EcgClass;
use serde::{Deserialize, Serialize};

/// Returned while the first window is still filling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectingStatus {
    /// Always `"collecting"`
    pub status: String,
    pub message: String,
    pub current_count: usize,
    pub required_count: usize,
}

impl CollectingStatus {
    pub fn new(current_count: usize, required_count: usize) -> Self {
        Self {
            status: "collecting".to_string(),
            message: format!("Collecting data ({}/{})", current_count, required_count),
            current_count,
            required_count,
        }
    }
}

/// One classified window. Field names on the wire follow the dashboard's format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    #[serde(rename = "prediction")]
    pub predicted_label: EcgClass,
    pub confidence: f32,
    /// The sample that completed this window
    #[serde(rename = "ecg_value")]
    pub raw_sample_value: f64,
    #[serde(rename = "trend")]
    pub trend_message: String,
    /// Empty when no alert applies
    #[serde(rename = "alert")]
    pub alert_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngestOutcome {
    Collecting(CollectingStatus),
    Prediction(PredictionResult),
}

impl IngestOutcome {
    pub fn prediction(&self) -> Option<&PredictionResult> {
        match self {
            IngestOutcome::Prediction(p) => Some(p),
            IngestOutcome::Collecting(_) => None,
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self, IngestOutcome::Collecting(_))
    }
}
