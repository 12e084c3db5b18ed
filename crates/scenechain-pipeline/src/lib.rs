//! Sequential scene-chaining pipeline.
//!
//! This crate turns one seed image and a text scenario into a multi-scene
//! movie: each scene is captioned, prompted, generated and materialized in
//! order, with the last frame of scene `i` seeding scene `i + 1`. All
//! intermediate artifacts live in a run-scoped workspace that is reclaimed
//! on every exit path.

pub mod config;
pub mod error;
pub mod media;
pub mod orchestrator;
pub mod prompt;
pub mod workspace;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use media::{FfmpegMediaTools, MediaTools};
pub use orchestrator::{ContinuityState, MovieArtifact, MoviePipeline, PipelineRun};
pub use prompt::{build_scene_prompt, ScenePromptParams, DEFAULT_FRAME_DESCRIPTION};
pub use workspace::Workspace;
