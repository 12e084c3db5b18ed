//! Shared data models for the SceneChain backend.
//!
//! This crate provides Serde-serializable types for:
//! - Predictions (remote compute jobs) and their status lifecycle
//! - Output shape classification for prediction payloads
//! - Scenes, aspect ratios and run identifiers
//! - Generation request/response DTOs
//! - Inline (data URL) image payloads

pub mod image;
pub mod prediction;
pub mod run;
pub mod scene;

// Re-export common types
pub use image::InlineImage;
pub use prediction::{OutputShape, Prediction, PredictionStatus};
pub use run::{MovieRequest, MovieResponse, RunId};
pub use scene::{AspectRatio, AspectRatioParseError, Scene};
