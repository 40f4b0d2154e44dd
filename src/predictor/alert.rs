//! Advisory attached to each prediction. First matching rule wins.

use crate::model::EcgClass;
use serde::Serialize;

/// Below this confidence every prediction is flagged for manual review.
pub const LOW_CONFIDENCE_FLOOR: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alert {
    LowConfidence,
    Urgent,
    FutureRisk,
}

impl Alert {
    pub fn message(self) -> &'static str {
        match self {
            Alert::LowConfidence => "Low confidence in prediction - please verify manually",
            Alert::Urgent => "URGENT: Risky ECG pattern detected!",
            Alert::FutureRisk => "Warning: Potential future risk detected",
        }
    }
}

/// Comparisons are strict: confidence equal to the floor or the threshold does not alert.
pub fn alert_for(label: EcgClass, confidence: f32, threshold: f32) -> Option<Alert> {
    if confidence < LOW_CONFIDENCE_FLOOR {
        return Some(Alert::LowConfidence);
    }
    match label {
        EcgClass::Risky if confidence > threshold => Some(Alert::Urgent),
        EcgClass::FutureRisk if confidence > threshold => Some(Alert::FutureRisk),
        _ => None,
    }
}
