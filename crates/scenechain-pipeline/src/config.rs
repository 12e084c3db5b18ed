//! Pipeline configuration.

use std::path::PathBuf;

/// Captioning model spec submitted with caption jobs.
pub const DEFAULT_CAPTION_MODEL: &str =
    "andreasjansson/blip-2:f677695e5e89f8b236e52ecd1d3f01beb44c34606419bcc19345e046d8f786f9";

/// Creation path of the video generation model.
pub const DEFAULT_VIDEO_MODEL_PATH: &str = "/models/google/veo-3.1/predictions";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Durable output directory for finished movies
    pub output_dir: PathBuf,
    /// Root under which run-scoped workspaces are created
    pub work_root: PathBuf,
    /// Captioning model version spec
    pub caption_model: String,
    /// Creation path for video generation jobs
    pub video_model_path: String,
    /// Duration of each scene in seconds
    pub scene_duration_secs: u64,
    /// Output resolution requested from the video model
    pub resolution: String,
    /// Whether the video model should generate audio
    pub generate_audio: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/generated"),
            work_root: PathBuf::from(".tmp"),
            caption_model: DEFAULT_CAPTION_MODEL.to_string(),
            video_model_path: DEFAULT_VIDEO_MODEL_PATH.to_string(),
            scene_duration_secs: 4,
            resolution: "720p".to_string(),
            generate_audio: true,
        }
    }
}

impl PipelineConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            output_dir: std::env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            work_root: std::env::var("WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.work_root),
            caption_model: std::env::var("CAPTION_MODEL").unwrap_or(defaults.caption_model),
            video_model_path: std::env::var("VIDEO_MODEL_PATH")
                .unwrap_or(defaults.video_model_path),
            scene_duration_secs: std::env::var("SCENE_DURATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.scene_duration_secs),
            resolution: std::env::var("SCENE_RESOLUTION").unwrap_or(defaults.resolution),
            generate_audio: defaults.generate_audio,
        }
    }
}
