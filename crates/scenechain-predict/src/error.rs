//! Prediction client error types.

use thiserror::Error;

pub type PredictResult<T> = Result<T, PredictError>;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Missing API token: set REPLICATE_API_TOKEN (or REPLICATE_API_KEY)")]
    MissingToken,

    #[error("Compute service returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Prediction failed: {0}")]
    JobFailed(String),

    #[error("Prediction timed out after {0} seconds")]
    TimedOut(u64),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictError {
    pub fn request_failed(status: u16, body: impl Into<String>) -> Self {
        Self::RequestFailed {
            status,
            body: body.into(),
        }
    }

    pub fn job_failed(msg: impl Into<String>) -> Self {
        Self::JobFailed(msg.into())
    }

    /// Check if this is a timeout-classed error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PredictError::TimedOut(_))
    }
}
