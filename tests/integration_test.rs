//! Integration test: config load, streaming predictor end to end, sessions, simulation.

use ecg_sentinel::{
    config::{PredictorConfig, ServiceConfig},
    model::{ClassDistribution, Classifier, EcgClass, OnnxClassifier},
    predictor::{IngestOutcome, StreamingPredictor},
    sessions::{SessionRegistry, DEFAULT_SESSION},
    simulate::{self, SyntheticEcg},
    Error,
};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Hands out scripted distributions in order, then repeats the last one.
struct Scripted {
    replies: Mutex<Vec<Vec<f32>>>,
}

impl Scripted {
    fn new(replies: Vec<Vec<f32>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies),
        })
    }

    fn constant(scores: Vec<f32>) -> Arc<Self> {
        Self::new(vec![scores])
    }
}

impl Classifier for Scripted {
    fn classify(&self, _window: &[f32]) -> ecg_sentinel::Result<ClassDistribution> {
        let mut replies = self.replies.lock().unwrap();
        let next = if replies.len() > 1 {
            replies.remove(0)
        } else {
            replies[0].clone()
        };
        ClassDistribution::new(next)
    }
}

const NORMAL: [f32; 4] = [0.9, 0.05, 0.03, 0.02];
const RISKY: [f32; 4] = [0.05, 0.9, 0.03, 0.02];
const LOW: [f32; 4] = [0.1, 0.1, 0.7, 0.1];

fn predictor(window_size: usize, classifier: Arc<Scripted>) -> StreamingPredictor {
    let config = PredictorConfig {
        window_size,
        confidence_threshold: 0.8,
    };
    StreamingPredictor::new(&config, classifier).unwrap()
}

#[test]
fn config_load_default() {
    let c = ServiceConfig::load(Path::new("nonexistent.json")).unwrap();
    assert_eq!(c.predictor.window_size, 100);
    assert_eq!(c.predictor.confidence_threshold, 0.8);
    assert!(c.validate().is_ok());
}

#[test]
fn config_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"predictor": {"window_size": 3}}"#).unwrap();
    let c = ServiceConfig::load(&path).unwrap();
    assert_eq!(c.predictor.window_size, 3);
    assert_eq!(c.predictor.confidence_threshold, 0.8);
    assert_eq!(c.server.bind_addr, "0.0.0.0:8000");
}

#[test]
fn config_rejects_bad_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        ServiceConfig::load(&path),
        Err(Error::Configuration(_))
    ));

    let mut c = ServiceConfig::default();
    c.predictor.window_size = 0;
    assert!(matches!(c.validate(), Err(Error::Configuration(_))));
    c.predictor.window_size = 10;
    c.predictor.confidence_threshold = 1.5;
    assert!(c.validate().is_err());
}

#[test]
fn collecting_until_window_full() {
    let mut p = predictor(5, Scripted::constant(NORMAL.to_vec()));
    for i in 1..5 {
        match p.ingest(i as f64).unwrap() {
            IngestOutcome::Collecting(status) => {
                assert_eq!(status.status, "collecting");
                assert_eq!(status.current_count, i);
                assert_eq!(status.required_count, 5);
                assert_eq!(status.message, format!("Collecting data ({}/5)", i));
            }
            other => panic!("expected collecting, got {:?}", other),
        }
        assert!(!p.is_ready());
    }
    assert!(p.ingest(5.0).unwrap().prediction().is_some());
    assert!(p.is_ready());
    // stays READY after the window is full
    assert!(p.ingest(6.0).unwrap().prediction().is_some());
    assert_eq!(p.buffered(), 5);
}

#[test]
fn end_to_end_risky_window() {
    let mut p = predictor(3, Scripted::constant(RISKY.to_vec()));
    assert!(p.ingest(1.0).unwrap().is_collecting());
    assert!(p.ingest(2.0).unwrap().is_collecting());
    let out = p.ingest(3.0).unwrap();
    let result = out.prediction().unwrap();
    assert_eq!(result.predicted_label, EcgClass::Risky);
    assert_eq!(result.confidence, 0.9);
    assert_eq!(result.raw_sample_value, 3.0);
    assert!(result.alert_message.starts_with("URGENT"));
    assert_eq!(
        result.trend_message,
        "Initial prediction, trend not established yet."
    );
}

#[test]
fn trend_sequence_across_windows() {
    let clf = Scripted::new(vec![
        NORMAL.to_vec(),
        NORMAL.to_vec(),
        RISKY.to_vec(),
        RISKY.to_vec(),
        LOW.to_vec(),
    ]);
    let mut p = predictor(1, clf);
    let trends: Vec<String> = (0..5)
        .map(|i| p.ingest(i as f64).unwrap().prediction().unwrap().trend_message.clone())
        .collect();
    assert_eq!(
        trends,
        vec![
            "Initial prediction, trend not established yet.",
            "Consistent Normal pattern",
            "Pattern changed from Normal to Risky",
            "Consistent Risky pattern",
            "Warning: 3 consecutive abnormal readings detected!",
        ]
    );
}

#[test]
fn low_confidence_alert_beats_risky() {
    let mut p = predictor(1, Scripted::constant(vec![0.2, 0.5, 0.2, 0.1]));
    let out = p.ingest(0.0).unwrap();
    let result = out.prediction().unwrap();
    assert_eq!(result.predicted_label, EcgClass::Risky);
    assert_eq!(
        result.alert_message,
        "Low confidence in prediction - please verify manually"
    );
}

#[test]
fn prediction_wire_format() {
    let mut p = predictor(1, Scripted::constant(RISKY.to_vec()));
    let out = p.ingest(1.25).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["prediction"], "Risky");
    assert_eq!(json["ecg_value"], 1.25);
    assert_eq!(json["alert"], "URGENT: Risky ECG pattern detected!");
    assert!(json["trend"].is_string());
    assert_eq!(json["timestamp"].as_str().unwrap().len(), 19);
    assert!(json.get("status").is_none());
}

#[test]
fn sessions_are_independent() {
    let registry = SessionRegistry::new(
        PredictorConfig {
            window_size: 2,
            confidence_threshold: 0.8,
        },
        Scripted::constant(NORMAL.to_vec()),
    )
    .unwrap();

    let a = registry.create().unwrap();
    let b = registry.create().unwrap();
    assert!(registry.ingest(&a, 1.0).unwrap().is_collecting());
    assert!(registry.ingest(&b, 1.0).unwrap().is_collecting());
    assert!(registry.ingest(&a, 2.0).unwrap().prediction().is_some());
    assert!(registry.ingest(DEFAULT_SESSION, 2.0).unwrap().is_collecting());
    assert_eq!(registry.len(), 3);

    registry.remove(&a).unwrap();
    assert!(!registry.contains(&a));
    assert!(matches!(
        registry.ingest(&a, 3.0),
        Err(Error::SessionNotFound(_))
    ));
    assert!(matches!(
        registry.remove("missing"),
        Err(Error::SessionNotFound(_))
    ));
}

#[test]
fn unknown_session_ids_are_not_opened() {
    let registry = SessionRegistry::new(
        PredictorConfig {
            window_size: 2,
            confidence_threshold: 0.8,
        },
        Scripted::constant(NORMAL.to_vec()),
    )
    .unwrap();

    for i in 0..1000 {
        let id = format!("s{}", i);
        assert!(matches!(
            registry.ingest(&id, 1.0),
            Err(Error::SessionNotFound(_))
        ));
    }
    assert!(registry.is_empty());

    assert!(registry.ingest(DEFAULT_SESSION, 1.0).unwrap().is_collecting());
    assert_eq!(registry.len(), 1);
}

#[test]
fn onnx_missing_model_is_configuration_error() {
    let err = OnnxClassifier::load(Path::new("nonexistent.onnx"), 100).err().unwrap();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn simulation_emits_one_line_per_prediction() {
    let mut p = predictor(10, Scripted::constant(RISKY.to_vec()));
    let signal = SyntheticEcg::seeded(25, 0.2, 3).unwrap();
    let stop = AtomicBool::new(false);
    let mut out = Vec::new();
    let summary = simulate::run(&mut p, signal, Duration::ZERO, &stop, &mut out).unwrap();
    assert_eq!(summary.samples, 25);
    assert_eq!(summary.predictions, 16);
    assert_eq!(summary.alerts, 16);
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().count(), 16);
    for line in text.lines() {
        let v: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(v["prediction"], "Risky");
    }
}

/// Accepts nothing, like stdout after the reader has gone away.
struct ClosedPipe;

impl std::io::Write for ClosedPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn simulation_stops_when_output_closes() {
    let mut p = predictor(2, Scripted::constant(NORMAL.to_vec()));
    let stop = AtomicBool::new(false);
    let err = simulate::run(
        &mut p,
        SyntheticEcg::seeded(10, 0.2, 3).unwrap(),
        Duration::ZERO,
        &stop,
        &mut ClosedPipe,
    )
    .err()
    .unwrap();
    assert!(matches!(err, Error::Io(_)));
    // the window filled on the second sample and the run ended there
    assert_eq!(p.buffered(), 2);
    assert!(p.trend().previous().is_some());
}

#[test]
fn simulation_honours_stop_flag() {
    let mut p = predictor(2, Scripted::constant(NORMAL.to_vec()));
    let stop = AtomicBool::new(true);
    let mut out = Vec::new();
    let summary = simulate::run(
        &mut p,
        SyntheticEcg::seeded(10, 0.2, 3).unwrap(),
        Duration::ZERO,
        &stop,
        &mut out,
    )
    .unwrap();
    assert_eq!(summary.samples, 0);
    assert!(out.is_empty());
}
