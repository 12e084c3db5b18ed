//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// The video generation job returned an output the pipeline cannot
    /// consume. Fatal: the run aborts immediately.
    #[error("Unexpected video output shape from compute service: {0}")]
    UnexpectedOutput(String),

    #[error("Prediction error: {0}")]
    Predict(#[from] scenechain_predict::PredictError),

    #[error("Media error: {0}")]
    Media(#[from] scenechain_media::MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    pub fn unexpected_output(msg: impl Into<String>) -> Self {
        Self::UnexpectedOutput(msg.into())
    }
}
