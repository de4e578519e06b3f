//! Lazily-initialised, shared fill-mask model handle
//!
//! The backend is built on the first prediction and reused read-only by
//! every later render. A failed build is not cached; the next call retries.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

use super::{build_prompt, top_predictions, FillMask, LocalFillMask, Prediction, RemoteFillMask, SensorReading};
use crate::cli::config::{PredictorBackend, PredictorConfig};
use crate::errors::PredictorError;

enum Source {
    Configured {
        config: PredictorConfig,
        client: Client,
        token: Option<String>,
    },
    Ready,
}

/// Handle to the process-wide predictor
pub struct LazyPredictor {
    cell: OnceCell<Arc<dyn FillMask>>,
    source: Source,
    top_k: usize,
}

impl LazyPredictor {
    /// Predictor that builds its backend from configuration on first use
    pub fn new(config: PredictorConfig, client: Client, token: Option<String>) -> Self {
        let top_k = config.top_k;
        Self {
            cell: OnceCell::new(),
            source: Source::Configured { config, client, token },
            top_k,
        }
    }

    /// Predictor around an already constructed backend
    pub fn with_backend(backend: Arc<dyn FillMask>, top_k: usize) -> Self {
        Self {
            cell: OnceCell::new_with(Some(backend)),
            source: Source::Ready,
            top_k,
        }
    }

    /// Whether the backend has been built yet
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Get the shared backend, building it on first call
    pub async fn get(&self) -> Result<Arc<dyn FillMask>, PredictorError> {
        self.cell
            .get_or_try_init(|| self.build())
            .await
            .map(Arc::clone)
    }

    async fn build(&self) -> Result<Arc<dyn FillMask>, PredictorError> {
        let Source::Configured { config, client, token } = &self.source else {
            return Err(PredictorError::Unavailable("No predictor backend configured".to_string()));
        };

        tracing::info!(backend = ?config.backend, model = %config.model_id, "initialising fill-mask predictor");

        match config.backend {
            PredictorBackend::Remote => Ok(Arc::new(RemoteFillMask::new(
                client.clone(),
                &config.endpoint,
                &config.model_id,
                token.clone(),
            ))),
            PredictorBackend::Local => {
                let model_id = config.model_id.clone();
                let limit = Duration::from_secs(config.load_timeout_secs);
                let model = load_within(limit, move || LocalFillMask::load(&model_id)).await?;
                Ok(Arc::new(model))
            }
        }
    }

    /// Top candidates for the reading's prompt, best first
    pub async fn predict(&self, reading: &SensorReading) -> Result<Vec<Prediction>, PredictorError> {
        let backend = self.get().await?;
        let predictions = backend.fill(&build_prompt(reading), self.top_k).await?;
        Ok(top_predictions(predictions, self.top_k))
    }
}

/// Run a blocking loader, giving up after `limit`.
/// The loader thread is left to finish on its own after a timeout.
async fn load_within<T, F>(limit: Duration, load: F) -> Result<T, PredictorError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PredictorError> + Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(load)).await {
        Ok(joined) => joined.map_err(|e| PredictorError::Unavailable(format!("Model loader failed: {}", e)))?,
        Err(_) => {
            tracing::warn!(limit_secs = limit.as_secs(), "model load timed out");
            Err(PredictorError::Unavailable(format!(
                "Model load timed out after {}s",
                limit.as_secs()
            )))
        }
    }
}
