//! API routes.

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{delete_movie, generate_movie, health};
use crate::state::AppState;

/// Public URL prefix under which finished movies are served.
pub const GENERATED_PREFIX: &str = "/generated";

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/generate", post(generate_movie))
        .route("/delete", post(delete_movie))
        .route("/health", get(health))
        .nest_service(GENERATED_PREFIX, ServeDir::new(&state.output_dir))
        .layer(DefaultBodyLimit::max(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

/// Build the CORS layer from configured origins; `*` allows any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any);

    if origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}
