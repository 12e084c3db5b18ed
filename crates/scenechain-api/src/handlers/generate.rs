//! `POST /generate` — multipart movie generation.

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::info;

use scenechain_models::{AspectRatio, InlineImage, MovieRequest, MovieResponse};

use crate::error::{ApiError, ApiResult};
use crate::routes::GENERATED_PREFIX;
use crate::state::AppState;

/// Raw multipart fields before sanitization.
#[derive(Default)]
struct GenerateForm {
    scenario: Option<String>,
    scenes: Option<usize>,
    aspect_ratio: Option<AspectRatio>,
    image: Option<(String, Vec<u8>)>,
}

/// Parse and validate the form, run the pipeline, return the movie URL.
pub async fn generate_movie(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<MovieResponse>> {
    let form = read_form(multipart).await?;

    let request = MovieRequest::sanitized(
        form.scenario.as_deref().unwrap_or(""),
        form.scenes.unwrap_or(1),
        form.aspect_ratio.unwrap_or_default(),
    );

    if request.scenario.is_empty() {
        return Err(ApiError::bad_request("Scenario is required."));
    }

    let (mime, bytes) = form
        .image
        .ok_or_else(|| ApiError::bad_request("A frame-0 image upload is required."))?;
    let seed = InlineImage::from_bytes(&mime, &bytes);

    info!(
        scenes = request.scenes,
        aspect_ratio = %request.aspect_ratio,
        image_bytes = bytes.len(),
        "Generation requested"
    );

    let artifact = state.pipeline.generate(&request, seed).await?;

    Ok(Json(MovieResponse {
        movie_url: format!("{}/{}", GENERATED_PREFIX, artifact.file_name),
        prompts: artifact.prompts,
    }))
}

async fn read_form(mut multipart: Multipart) -> ApiResult<GenerateForm> {
    let mut form = GenerateForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("scenario") => {
                form.scenario = Some(read_text(field).await?);
            }
            Some("scenes") => {
                // Unparseable counts fall back to a single scene, matching
                // the clamp-rather-than-reject policy for this field.
                form.scenes = Some(read_text(field).await?.trim().parse().unwrap_or(1));
            }
            Some("aspectRatio") => {
                form.aspect_ratio = Some(read_text(field).await?.parse().unwrap_or_default());
            }
            Some("image") => {
                let mime = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "image/png".to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(format!("Failed to read image: {e}")))?;
                form.image = Some((mime, bytes.to_vec()));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {e}")))
}
