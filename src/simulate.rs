//! Synthetic ECG stream for exercising a predictor without a device attached:
//! `2·sin(x)` over `x ∈ [0, 20]` plus gaussian noise.

use crate::error::{Error, Result};
use crate::logging::StructuredLogger;
use crate::predictor::{IngestOutcome, StreamingPredictor};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

const AMPLITUDE: f64 = 2.0;
const SPAN: f64 = 20.0;

pub struct SyntheticEcg {
    total: usize,
    next: usize,
    noise: Normal<f64>,
    rng: StdRng,
}

impl SyntheticEcg {
    pub fn new(total: usize, noise_std: f64) -> Result<Self> {
        Self::with_rng(total, noise_std, StdRng::from_entropy())
    }

    /// Reproducible stream.
    pub fn seeded(total: usize, noise_std: f64, seed: u64) -> Result<Self> {
        Self::with_rng(total, noise_std, StdRng::seed_from_u64(seed))
    }

    fn with_rng(total: usize, noise_std: f64, rng: StdRng) -> Result<Self> {
        if !noise_std.is_finite() || noise_std <= 0.0 {
            return Err(Error::Configuration(format!(
                "noise_std must be positive, got {}",
                noise_std
            )));
        }
        let noise = Normal::new(0.0, noise_std)
            .map_err(|e| Error::Configuration(format!("noise_std {}: {}", noise_std, e)))?;
        Ok(Self {
            total,
            next: 0,
            noise,
            rng,
        })
    }

    /// Noise-free value at position `i`; evenly spaced, both ends inclusive.
    fn clean(&self, i: usize) -> f64 {
        if self.total <= 1 {
            return 0.0;
        }
        let x = SPAN * i as f64 / (self.total - 1) as f64;
        x.sin() * AMPLITUDE
    }
}

impl Iterator for SyntheticEcg {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.next >= self.total {
            return None;
        }
        let v = self.clean(self.next) + self.noise.sample(&mut self.rng);
        self.next += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next;
        (left, Some(left))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimulationSummary {
    pub samples: usize,
    pub predictions: usize,
    pub alerts: usize,
}

/// Feed `signal` through `predictor`, one JSON line per prediction to `out`.
/// Stops early once `stop` is set; a classification failure or a failed
/// write to `out` ends the run.
pub fn run(
    predictor: &mut StreamingPredictor,
    signal: impl Iterator<Item = f64>,
    interval: Duration,
    stop: &AtomicBool,
    out: &mut impl Write,
) -> Result<SimulationSummary> {
    let mut summary = SimulationSummary::default();
    for sample in signal {
        if stop.load(Ordering::Relaxed) {
            tracing::info!(samples = summary.samples, "simulation interrupted");
            break;
        }
        summary.samples += 1;
        match predictor.ingest(sample)? {
            IngestOutcome::Collecting(status) => {
                tracing::debug!(message = %status.message, "collecting");
            }
            IngestOutcome::Prediction(result) => {
                summary.predictions += 1;
                if !result.alert_message.is_empty() {
                    summary.alerts += 1;
                }
                StructuredLogger::emit_json(&result, out).map_err(|e| {
                    tracing::warn!(error = %e, "output closed; stopping simulation");
                    Error::Io(e)
                })?;
            }
        }
        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }
    Ok(summary)
}
