//! Prediction service HTTP client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use scenechain_models::{Prediction, PredictionStatus};

use crate::clock::{Clock, TokioClock};
use crate::config::PredictConfig;
use crate::error::{PredictError, PredictResult};

/// Per-request HTTP timeout. Generous because creation requests carry a
/// `Prefer: wait` hint and the service may hold them open until terminal.
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Seam for submitting a prediction and awaiting its terminal result.
///
/// The orchestrator depends on this trait rather than on the concrete
/// client, so pipeline tests can script prediction outcomes.
#[async_trait]
pub trait PredictionRunner: Send + Sync {
    /// Submit a prediction at `path` and block until terminal success.
    async fn run_prediction(&self, path: &str, input: Value) -> PredictResult<Prediction>;
}

/// Client for the remote compute service.
///
/// Holds no mutable state; concurrent calls share only the underlying
/// connection pool.
pub struct PredictClient {
    http: Client,
    config: PredictConfig,
    clock: Arc<dyn Clock>,
}

impl PredictClient {
    /// Create a new client with the real clock.
    pub fn new(config: PredictConfig) -> PredictResult<Self> {
        Self::with_clock(config, Arc::new(TokioClock))
    }

    /// Create a new client with an explicit time source.
    pub fn with_clock(config: PredictConfig, clock: Arc<dyn Clock>) -> PredictResult<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(PredictError::Network)?;

        Ok(Self {
            http,
            config,
            clock,
        })
    }

    /// Submit a prediction creation request.
    ///
    /// The service may answer already-terminal (it is hinted to block until
    /// terminal where feasible) or still pending.
    pub async fn create_prediction(&self, path: &str, input: &Value) -> PredictResult<Prediction> {
        let url = format!("{}{}", self.config.base_url, path);

        debug!("Creating prediction at {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .header("Prefer", "wait")
            .json(input)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PredictError::request_failed(status, body));
        }

        let prediction: Prediction = response.json().await?;
        debug!(
            prediction_id = %prediction.id,
            status = %prediction.status,
            "Prediction created"
        );
        Ok(prediction)
    }

    /// Fetch the current state of a prediction. Single read, no side effects.
    pub async fn get_prediction(&self, id: &str) -> PredictResult<Prediction> {
        let url = format!("{}/predictions/{}", self.config.base_url, id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PredictError::request_failed(status, body));
        }

        Ok(response.json().await?)
    }

    /// Poll a prediction at a fixed interval until it reaches a terminal
    /// status or the configured timeout elapses.
    pub async fn wait_until_terminal(&self, id: &str) -> PredictResult<Prediction> {
        let started = self.clock.now();

        loop {
            if self.clock.now().duration_since(started) >= self.config.poll_timeout {
                warn!(prediction_id = %id, "Prediction timed out");
                return Err(PredictError::TimedOut(self.config.poll_timeout.as_secs()));
            }

            let prediction = self.get_prediction(id).await?;

            if prediction.is_terminal() {
                return ensure_succeeded(prediction);
            }

            debug!(
                prediction_id = %id,
                status = %prediction.status,
                "Prediction pending, polling again"
            );
            self.clock.sleep(self.config.poll_interval).await;
        }
    }

    /// Submit a prediction and block until it succeeds.
    ///
    /// Fast path: when the creation response is already terminal, no status
    /// polls are issued at all. Failures and cancellations surface as
    /// [`PredictError::JobFailed`]; the submission itself is never retried.
    pub async fn run(&self, path: &str, input: &Value) -> PredictResult<Prediction> {
        let created = self.create_prediction(path, input).await?;

        if created.is_terminal() {
            return ensure_succeeded(created);
        }

        info!(prediction_id = %created.id, "Waiting for prediction");
        self.wait_until_terminal(&created.id).await
    }
}

#[async_trait]
impl PredictionRunner for PredictClient {
    async fn run_prediction(&self, path: &str, input: Value) -> PredictResult<Prediction> {
        self.run(path, &input).await
    }
}

/// Map a terminal prediction to success or a job failure.
fn ensure_succeeded(prediction: Prediction) -> PredictResult<Prediction> {
    match prediction.status {
        PredictionStatus::Succeeded => Ok(prediction),
        PredictionStatus::Failed | PredictionStatus::Canceled => {
            let message = prediction
                .error
                .clone()
                .unwrap_or_else(|| format!("Prediction {}", prediction.status));
            Err(PredictError::job_failed(message))
        }
        _ => unreachable!("ensure_succeeded called with non-terminal prediction"),
    }
}
