//! Debug overlay handler
//!
//! Handles POST /overlay requests: renders the block geometry as visible
//! rectangles for diagnostic inspection. Never part of the mark/verify path.

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::multipart::MultipartFields;
use crate::state::AppState;
use crate::validation::DEFAULT_MAX_FILE_SIZE;

/// Render the block geometry onto a copy of the uploaded image
///
/// Accepts multipart/form-data with:
/// - **file** (required): The image to inspect
///
/// Returns a PNG with each block window outlined in green.
#[utoipa::path(
    post,
    path = "/overlay",
    tag = "Diagnostics",
    request_body(
        content_type = "multipart/form-data",
        description = "Image file to render the geometry on"
    ),
    responses(
        (status = 200, description = "Overlay PNG bytes", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Invalid request (missing file, undecodable image)"),
        (status = 422, description = "Image below the size floor")
    )
)]
pub async fn overlay_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let fields = MultipartFields::parse(&mut multipart, DEFAULT_MAX_FILE_SIZE).await?;
    let file = fields.require_file()?;

    let overlay = state.watermarker.debug_overlay(&file.data)?;

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"overlay.png\"".to_string(),
        ),
    ];

    Ok((StatusCode::OK, headers, overlay).into_response())
}
