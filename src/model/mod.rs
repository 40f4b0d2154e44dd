//! Rhythm classifier capability: fixed label table, score distribution, ONNX backend.

mod labels;
mod onnx;

pub use labels::EcgClass;
pub use onnx::OnnxClassifier;

use crate::error::{Error, Result};

/// Anything that maps one scaled window to one score per [`EcgClass`].
///
/// Implementations are shared read-only across sessions, so `classify`
/// takes `&self` and must be safe to call from several threads.
pub trait Classifier: Send + Sync {
    fn classify(&self, window: &[f32]) -> Result<ClassDistribution>;
}

/// Scores aligned to the [`EcgClass`] ordinals.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDistribution {
    scores: Vec<f32>,
}

impl ClassDistribution {
    /// Rejects anything that is not exactly one finite score per class.
    pub fn new(scores: Vec<f32>) -> Result<Self> {
        if scores.len() != EcgClass::COUNT {
            return Err(Error::Classification(format!(
                "malformed distribution: expected {} scores, got {}",
                EcgClass::COUNT,
                scores.len()
            )));
        }
        if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(Error::Classification(format!(
                "malformed distribution: non-finite score {}",
                bad
            )));
        }
        Ok(Self { scores })
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    /// Highest-scoring class and its score. Ties go to the lowest ordinal.
    pub fn top(&self) -> (EcgClass, f32) {
        let (idx, score) = self
            .scores
            .iter()
            .copied()
            .enumerate()
            .fold((0, f32::NEG_INFINITY), |best, (i, s)| {
                if s > best.1 {
                    (i, s)
                } else {
                    best
                }
            });
        // `new` guarantees COUNT entries, so every index has a label.
        let class = EcgClass::from_ordinal(idx).unwrap_or(EcgClass::Normal);
        (class, score)
    }
}
