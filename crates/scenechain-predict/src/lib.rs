//! Async prediction client for the remote compute service.
//!
//! This crate provides:
//! - A thin HTTP client over the predictions API (create, poll)
//! - A bounded wait-until-terminal loop driven by an injectable clock
//! - The [`PredictionRunner`] seam consumed by the pipeline and by tests

pub mod client;
pub mod clock;
pub mod config;
pub mod error;

pub use client::{PredictClient, PredictionRunner};
pub use clock::{Clock, TokioClock};
pub use config::PredictConfig;
pub use error::{PredictError, PredictResult};
