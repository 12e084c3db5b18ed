//! Application state.

use std::path::PathBuf;
use std::sync::Arc;

use scenechain_pipeline::{FfmpegMediaTools, MoviePipeline, PipelineConfig};
use scenechain_predict::{PredictClient, PredictConfig};

use crate::config::ApiConfig;

/// Shared application state.
///
/// The pipeline is stateless across runs, so one instance serves every
/// request; concurrent requests become independent pipeline runs.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub pipeline: Arc<MoviePipeline>,
    /// Durable output directory, also the static-delivery root
    pub output_dir: PathBuf,
}

impl AppState {
    /// Create new application state.
    ///
    /// Fails when the compute-service token is missing so deployments die
    /// at startup instead of on the first request.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let predict_config = PredictConfig::from_env()?;
        let pipeline_config = PipelineConfig::from_env();
        Self::with_configs(config, predict_config, pipeline_config)
    }

    /// Create state from explicit configs (used by tests).
    pub fn with_configs(
        config: ApiConfig,
        predict_config: PredictConfig,
        pipeline_config: PipelineConfig,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let client = PredictClient::new(predict_config)?;
        let output_dir = pipeline_config.output_dir.clone();

        let pipeline = MoviePipeline::new(
            Arc::new(client),
            Arc::new(FfmpegMediaTools::new()),
            pipeline_config,
        );

        Ok(Self {
            config,
            pipeline: Arc::new(pipeline),
            output_dir,
        })
    }
}
