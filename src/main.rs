//! ECG Sentinel entrypoint.
//!
//! `ecg-sentinel [serve]` runs the prediction API; `ecg-sentinel simulate [N]`
//! streams N synthetic samples through the configured model and prints one
//! JSON line per prediction.

use ecg_sentinel::{
    config::ServiceConfig,
    logging::StructuredLogger,
    model::{Classifier, OnnxClassifier},
    predictor::StreamingPredictor,
    sessions::SessionRegistry,
    server,
    simulate::{self, SyntheticEcg},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn load_classifier(config: &ServiceConfig) -> Result<Arc<dyn Classifier>, BoxError> {
    let classifier = OnnxClassifier::load(&config.model_path, config.predictor.window_size)?;
    Ok(Arc::new(classifier))
}

fn serve(config: ServiceConfig) -> Result<(), BoxError> {
    let classifier = load_classifier(&config)?;
    let registry = Arc::new(SessionRegistry::new(config.predictor.clone(), classifier)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::start_server(registry, &config.server.bind_addr))?;
    info!("ECG Sentinel stopping");
    Ok(())
}

fn simulate(config: ServiceConfig, samples: Option<usize>) -> Result<(), BoxError> {
    let classifier = load_classifier(&config)?;
    let mut predictor = StreamingPredictor::new(&config.predictor, classifier)?;
    let total = samples.unwrap_or(config.simulate.samples);
    let signal = SyntheticEcg::new(total, config.simulate.noise_std)?;

    static STOP: AtomicBool = AtomicBool::new(false);
    let _ = ctrlc::set_handler(|| {
        STOP.store(true, Ordering::Relaxed);
    });

    info!(samples = total, "simulation mode (Ctrl+C to stop)");
    let summary = simulate::run(
        &mut predictor,
        signal,
        Duration::from_millis(config.simulate.interval_ms),
        &STOP,
        &mut std::io::stdout().lock(),
    )?;
    info!(
        samples = summary.samples,
        predictions = summary.predictions,
        alerts = summary.alerts,
        "simulation complete"
    );
    Ok(())
}

fn main() -> Result<(), BoxError> {
    let config_path = std::env::var("ECG_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let config = ServiceConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);
    config.validate()?;

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| "serve".to_string());
    info!(command = %command, model = ?config.model_path, "ECG Sentinel starting");

    match command.as_str() {
        "serve" => serve(config),
        "simulate" => {
            let samples = args
                .next()
                .map(|n| n.parse::<usize>())
                .transpose()
                .map_err(|e| format!("invalid sample count: {}", e))?;
            simulate(config, samples)
        }
        other => Err(format!("unknown command '{}' (expected serve | simulate [N])", other).into()),
    }
}
