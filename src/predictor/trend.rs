//! Trend narrative across successive window predictions.

use crate::model::EcgClass;

/// Streak length at which the abnormal-run warning replaces the change/consistency message.
const ANOMALY_STREAK_WARNING: u32 = 3;

#[derive(Debug, Clone, Default)]
pub struct TrendTracker {
    previous: Option<EcgClass>,
    consecutive_anomalies: u32,
}

impl TrendTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous(&self) -> Option<EcgClass> {
        self.previous
    }

    pub fn consecutive_anomalies(&self) -> u32 {
        self.consecutive_anomalies
    }

    /// Record `current` and describe how it relates to the previous prediction.
    /// The first observation leaves the anomaly counter untouched.
    pub fn observe(&mut self, current: EcgClass) -> String {
        let Some(previous) = self.previous.replace(current) else {
            return "Initial prediction, trend not established yet.".to_string();
        };

        if current.is_abnormal() {
            self.consecutive_anomalies = self.consecutive_anomalies.saturating_add(1);
        } else {
            self.consecutive_anomalies = 0;
        }

        if self.consecutive_anomalies >= ANOMALY_STREAK_WARNING {
            format!(
                "Warning: {} consecutive abnormal readings detected!",
                self.consecutive_anomalies
            )
        } else if current != previous {
            format!("Pattern changed from {} to {}", previous, current)
        } else {
            format!("Consistent {} pattern", current)
        }
    }
}
