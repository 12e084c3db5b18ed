//! Prediction client configuration.

use std::time::Duration;

use crate::error::{PredictError, PredictResult};

/// Default base URL of the compute service.
pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";

/// Configuration for the prediction client.
///
/// The API token is resolved once here and carried explicitly; nothing in
/// the request path reads the environment.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    /// Base URL of the compute service
    pub base_url: String,
    /// Bearer token for the compute service
    pub api_token: String,
    /// Fixed interval between status polls
    pub poll_interval: Duration,
    /// Upper bound on the total wait for a single prediction
    pub poll_timeout: Duration,
}

impl PredictConfig {
    /// Create a config with default polling parameters.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: api_token.into(),
            poll_interval: Duration::from_secs(5),
            poll_timeout: Duration::from_secs(12 * 60),
        }
    }

    /// Create config from environment variables.
    ///
    /// Fails eagerly when no token is present so a misconfigured deployment
    /// dies at startup rather than on the first request.
    pub fn from_env() -> PredictResult<Self> {
        let api_token = std::env::var("REPLICATE_API_TOKEN")
            .or_else(|_| std::env::var("REPLICATE_API_KEY"))
            .map_err(|_| PredictError::MissingToken)?;
        if api_token.trim().is_empty() {
            return Err(PredictError::MissingToken);
        }

        let mut config = Self::new(api_token);

        if let Ok(url) = std::env::var("REPLICATE_API_BASE") {
            config.base_url = url;
        }
        if let Some(secs) = std::env::var("PREDICT_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.poll_interval = Duration::from_secs(secs);
        }
        if let Some(secs) = std::env::var("PREDICT_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.poll_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
