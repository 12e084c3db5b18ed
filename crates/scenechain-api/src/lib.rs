//! Axum HTTP API server.
//!
//! This crate provides:
//! - `POST /generate` — multipart movie generation requests
//! - `POST /delete` — scoped deletion of finished movies
//! - `GET /health` — liveness probe
//! - Static delivery of finished movies under `/generated/`

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
