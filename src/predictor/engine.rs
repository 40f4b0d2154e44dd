//! One predictor per stream: COLLECTING until the window fills, READY forever after.

use super::{alert_for, CollectingStatus, IngestOutcome, PredictionResult, TrendTracker};
use crate::config::PredictorConfig;
use crate::error::Result;
use crate::model::Classifier;
use crate::window::WindowBuffer;
use chrono::Local;
use std::sync::Arc;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct StreamingPredictor {
    buffer: WindowBuffer,
    classifier: Arc<dyn Classifier>,
    threshold: f32,
    trend: TrendTracker,
}

impl StreamingPredictor {
    /// Fails with a configuration error on a zero window or an out-of-range threshold.
    pub fn new(config: &PredictorConfig, classifier: Arc<dyn Classifier>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            buffer: WindowBuffer::new(config.window_size),
            classifier,
            threshold: config.confidence_threshold,
            trend: TrendTracker::new(),
        })
    }

    /// Push one sample and classify the window once it is full.
    ///
    /// On classification failure the sample stays in the buffer but trend
    /// state is left exactly as it was before the call.
    pub fn ingest(&mut self, sample: f64) -> Result<IngestOutcome> {
        self.buffer.push(sample);

        let Some(scaled) = self.buffer.snapshot_scaled() else {
            return Ok(IngestOutcome::Collecting(CollectingStatus::new(
                self.buffer.len(),
                self.buffer.capacity(),
            )));
        };

        let distribution = self.classifier.classify(scaled.values()).map_err(|e| {
            tracing::error!(error = %e, "classification failed");
            e
        })?;
        let (label, confidence) = distribution.top();

        let trend_message = self.trend.observe(label);
        let alert = alert_for(label, confidence, self.threshold);
        if let Some(a) = alert {
            tracing::warn!(label = %label, confidence, alert = ?a, "ecg alert");
        } else {
            tracing::debug!(label = %label, confidence, "ecg prediction");
        }

        Ok(IngestOutcome::Prediction(PredictionResult {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            predicted_label: label,
            confidence,
            raw_sample_value: sample,
            trend_message,
            alert_message: alert.map(|a| a.message().to_string()).unwrap_or_default(),
        }))
    }

    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_ready(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn trend(&self) -> &TrendTracker {
        &self.trend
    }
}
