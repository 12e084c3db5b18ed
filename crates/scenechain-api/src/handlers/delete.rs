//! `POST /delete` — scoped deletion of finished movies.
//!
//! Not a general file API: only URLs rooted under the public output scope
//! are honored, and the file is matched by basename alone, so no request
//! can reach outside the output directory.

use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::routes::GENERATED_PREFIX;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub movie_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub ok: bool,
}

pub async fn delete_movie(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> ApiResult<Json<DeleteResponse>> {
    let movie_url = request.movie_url.unwrap_or_default();

    let path = resolve_movie_path(&state.output_dir, &movie_url)
        .ok_or_else(|| ApiError::bad_request("Invalid movieUrl."))?;

    match fs::remove_file(&path).await {
        Ok(()) => info!(path = %path.display(), "Movie deleted"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(ApiError::internal(format!("Delete failed: {e}"))),
    }

    Ok(Json(DeleteResponse { ok: true }))
}

/// Resolve a public movie URL to a path inside the output directory.
///
/// Returns `None` for anything not rooted under the public prefix. Only
/// the basename of the remainder is used, so traversal segments never
/// reach the filesystem.
fn resolve_movie_path(output_dir: &Path, movie_url: &str) -> Option<PathBuf> {
    let rest = movie_url
        .strip_prefix(GENERATED_PREFIX)?
        .strip_prefix('/')?;
    let name = Path::new(rest).file_name()?;
    Some(output_dir.join(name))
}
