//! Predictors keyed by session id. Each stream owns its window and trend state;
//! ingests on one session are serialized, sessions never share state.
//! Sessions live until deleted, so unknown ids are refused rather than opened.

use crate::config::PredictorConfig;
use crate::error::{Error, Result};
use crate::model::Classifier;
use crate::predictor::{IngestOutcome, StreamingPredictor};
use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Session used when a caller does not name one.
pub const DEFAULT_SESSION: &str = "default";

pub type SharedPredictor = Arc<Mutex<StreamingPredictor>>;

pub struct SessionRegistry {
    config: PredictorConfig,
    classifier: Arc<dyn Classifier>,
    sessions: DashMap<String, SharedPredictor>,
}

impl SessionRegistry {
    pub fn new(config: PredictorConfig, classifier: Arc<dyn Classifier>) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            classifier,
            sessions: DashMap::new(),
        })
    }

    /// Register a fresh session under a random id.
    pub fn create(&self) -> Result<String> {
        let id = Uuid::new_v4().to_string();
        self.open(&id)?;
        Ok(id)
    }

    /// Look up an opened session. Only [`DEFAULT_SESSION`] is opened on demand;
    /// other ids must come from [`SessionRegistry::create`].
    pub fn get(&self, id: &str) -> Result<SharedPredictor> {
        if let Some(existing) = self.sessions.get(id) {
            return Ok(Arc::clone(existing.value()));
        }
        if id == DEFAULT_SESSION {
            return self.open(id);
        }
        Err(Error::SessionNotFound(id.to_string()))
    }

    fn open(&self, id: &str) -> Result<SharedPredictor> {
        let predictor = StreamingPredictor::new(&self.config, self.classifier.clone())?;
        let entry = self
            .sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::info!(session = %id, "session opened");
                Arc::new(Mutex::new(predictor))
            });
        Ok(Arc::clone(entry.value()))
    }

    /// Feed one sample to the named session.
    pub fn ingest(&self, id: &str, sample: f64) -> Result<IngestOutcome> {
        let predictor = self.get(id)?;
        let mut guard = predictor
            .lock()
            .map_err(|_| Error::Classification(format!("session {} poisoned", id)))?;
        guard.ingest(sample)
    }

    pub fn remove(&self, id: &str) -> Result<()> {
        match self.sessions.remove(id) {
            Some(_) => {
                tracing::info!(session = %id, "session closed");
                Ok(())
            }
            None => Err(Error::SessionNotFound(id.to_string())),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
