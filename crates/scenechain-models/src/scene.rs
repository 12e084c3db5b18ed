//! Scene and aspect ratio definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Target aspect ratio for generated video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AspectRatio {
    /// Landscape 16:9
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    /// Portrait 9:16
    #[serde(rename = "9:16")]
    Portrait,
}

impl AspectRatio {
    /// The wire format expected by the video generation model.
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = AspectRatioParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            _ => Err(AspectRatioParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown aspect ratio: {0}")]
pub struct AspectRatioParseError(String);

/// One completed stage of a pipeline run.
///
/// Immutable once recorded by the orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Zero-based scene index
    pub index: usize,
    /// Prompt the video was generated from
    pub prompt: String,
    /// Caption of the scene's seed frame
    pub frame_description: String,
    /// Local path of the materialized scene video
    pub video_path: PathBuf,
}
