//! Request handlers.

pub mod delete;
pub mod generate;

use axum::Json;
use serde_json::{json, Value};

pub use delete::delete_movie;
pub use generate::generate_movie;

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
