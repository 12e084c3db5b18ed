//! Run identifiers and generation request/response DTOs.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::AspectRatio;

/// Maximum scenario length accepted from callers, in characters.
pub const MAX_SCENARIO_CHARS: usize = 1000;

/// Valid range for the requested scene count.
pub const MIN_SCENES: usize = 1;
pub const MAX_SCENES: usize = 8;

/// Unique identifier for a pipeline run.
///
/// Also namespaces the durable output file, so concurrent runs never
/// collide in the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub String);

impl RunId {
    /// Generate a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the durable output for this run.
    pub fn movie_file_name(&self) -> String {
        format!("movie-{}.mp4", self.0)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated movie generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRequest {
    /// Text scenario driving every scene prompt
    pub scenario: String,
    /// Number of scenes to generate
    pub scenes: usize,
    /// Target aspect ratio
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
}

impl MovieRequest {
    /// Build a request from raw boundary input, clamping and truncating.
    ///
    /// The scenario is trimmed and cut to [`MAX_SCENARIO_CHARS`]; the scene
    /// count is clamped to `[MIN_SCENES, MAX_SCENES]`. An empty scenario
    /// after trimming is still representable here; the boundary rejects it.
    pub fn sanitized(scenario: &str, scenes: usize, aspect_ratio: AspectRatio) -> Self {
        let scenario: String = scenario.chars().take(MAX_SCENARIO_CHARS).collect();
        Self {
            scenario: scenario.trim().to_string(),
            scenes: scenes.clamp(MIN_SCENES, MAX_SCENES),
            aspect_ratio,
        }
    }
}

/// Successful generation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResponse {
    /// Public URL of the concatenated movie
    pub movie_url: String,
    /// Prompt used for each scene, in order
    pub prompts: Vec<String>,
}
