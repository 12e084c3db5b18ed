//! Prediction records returned by the remote compute service.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Status of a prediction on the compute service.
///
/// Only `Succeeded`, `Failed` and `Canceled` are terminal; the service
/// never transitions a prediction out of a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    /// Prediction accepted, not yet running
    Starting,
    /// Prediction is actively running
    Processing,
    /// Prediction completed successfully
    Succeeded,
    /// Prediction failed with an error
    Failed,
    /// Prediction was canceled
    Canceled,
}

impl PredictionStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Starting => "starting",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
            PredictionStatus::Canceled => "canceled",
        }
    }

    /// Check if this is a terminal state (no more transitions expected).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PredictionStatus::Succeeded | PredictionStatus::Failed | PredictionStatus::Canceled
        )
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A prediction record as returned by the compute service.
///
/// The client only reads these; all mutation happens on the remote side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique prediction ID assigned by the service
    pub id: String,
    /// Current status
    pub status: PredictionStatus,
    /// Opaque output payload, populated on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
    /// Error message, populated on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Prediction {
    /// Check if the prediction reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Classify the output payload into a recognized shape.
    pub fn output_shape(&self) -> OutputShape {
        OutputShape::classify(self.output.as_ref())
    }
}

/// Recognized shapes for prediction output payloads.
///
/// Models on the compute service return either a plain string or an array
/// of strings; anything else is tagged `Unexpected` and callers branch on
/// the tag instead of probing the JSON themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputShape {
    /// Output is a plain string
    Text(String),
    /// Output is an array of strings; carries the first element
    TextArray(String),
    /// Output is absent or of an unrecognized shape
    Unexpected,
}

impl OutputShape {
    /// Classify a raw output payload.
    pub fn classify(output: Option<&Value>) -> Self {
        match output {
            Some(Value::String(s)) => OutputShape::Text(s.clone()),
            Some(Value::Array(items)) => match items.first() {
                Some(Value::String(s)) => OutputShape::TextArray(s.clone()),
                _ => OutputShape::Unexpected,
            },
            _ => OutputShape::Unexpected,
        }
    }

    /// Extract the carried text, if the shape was recognized.
    pub fn into_text(self) -> Option<String> {
        match self {
            OutputShape::Text(s) | OutputShape::TextArray(s) => Some(s),
            OutputShape::Unexpected => None,
        }
    }
}
