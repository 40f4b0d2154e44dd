//! ONNX Runtime backend. Input: [1, window_size, 1] f32, output: one score per class.

use super::{ClassDistribution, Classifier};
use crate::error::{Error, Result};
use ndarray::Array3;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::Path;
use std::sync::{Mutex, Once};

static ORT_INIT: Once = Once::new();

fn init_env() {
    ORT_INIT.call_once(|| {
        let _ = ort::init().with_name("ecg-sentinel").commit();
    });
}

fn build_session(path: &Path) -> ort::Result<Session> {
    Session::builder()?
        .with_optimization_level(GraphOptimizationLevel::Level3)?
        .with_intra_threads(1)?
        .commit_from_file(path)
}

fn run_session(session: &mut Session, input_name: &str, input: Array3<f32>) -> ort::Result<Vec<f32>> {
    let tensor = Tensor::from_array(input)?;
    let outputs = session.run(ort::inputs![input_name => tensor])?;
    let (_, scores) = outputs[0].try_extract_tensor::<f32>()?;
    Ok(scores.to_vec())
}

pub struct OnnxClassifier {
    session: Mutex<Session>,
    input_name: String,
    window_size: usize,
}

impl OnnxClassifier {
    /// Load the model from `path`. A missing or unloadable model is a configuration error.
    pub fn load(path: &Path, window_size: usize) -> Result<Self> {
        if !path.exists() {
            tracing::error!(path = %path.display(), "ONNX model not found");
            return Err(Error::Configuration(format!(
                "model file not found: {}",
                path.display()
            )));
        }

        init_env();
        let session = build_session(path).map_err(|e| {
            Error::Configuration(format!("failed to load {}: {}", path.display(), e))
        })?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "input".to_string());
        tracing::info!(path = %path.display(), input = %input_name, window_size, "classifier loaded");

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            window_size,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, window: &[f32]) -> Result<ClassDistribution> {
        if window.len() != self.window_size {
            return Err(Error::Classification(format!(
                "expected window of {} samples, got {}",
                self.window_size,
                window.len()
            )));
        }
        let input = Array3::from_shape_vec((1, self.window_size, 1), window.to_vec())
            .map_err(|e| Error::Classification(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| Error::Classification("model session poisoned".into()))?;
        let scores = run_session(&mut session, &self.input_name, input)
            .map_err(|e| Error::Classification(e.to_string()))?;
        ClassDistribution::new(scores)
    }
}
