//! Mark creation handler
//!
//! Handles POST /mark requests: embeds a freshly generated payload into the
//! uploaded image and returns the marked PNG. The integrity gate runs first
//! and nothing is persisted unless it accepts.

use axum::{
    extract::{Multipart, State},
    http::{header, header::HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use lumark_core::GateOutcome;

use crate::error::ApiError;
use crate::multipart::MultipartFields;
use crate::payload::generate_payload;
use crate::state::AppState;
use crate::validation::DEFAULT_MAX_FILE_SIZE;

/// Create an invisibly marked copy of an uploaded image
///
/// Accepts multipart/form-data with:
/// - **file** (required): The image to mark (PNG, JPEG, BMP, TIFF or WebP, max 25MB)
/// - **purpose** (required): What the marked copy is being released for
///
/// The server derives a fresh payload from the purpose, runs the embed →
/// extract integrity gate, persists the payload/purpose record and streams
/// the marked image back as a lossless PNG. The payload is echoed in the
/// `X-Payload` response header.
#[utoipa::path(
    post,
    path = "/mark",
    tag = "Marking",
    request_body(
        content_type = "multipart/form-data",
        description = "Image file and purpose to mark it for"
    ),
    responses(
        (status = 200, description = "Marked PNG bytes", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Invalid request (missing file/purpose, undecodable image)"),
        (status = 422, description = "Image rejected: too small or insufficient capacity"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn mark_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let fields = MultipartFields::parse(&mut multipart, DEFAULT_MAX_FILE_SIZE).await?;
    let file = fields.require_file()?;
    let purpose = fields
        .get_text("purpose")
        .ok_or_else(|| ApiError::bad_request("No purpose provided. Use 'purpose' form field."))?;

    let payload = generate_payload(purpose);

    // The gate must pass before any record exists; it returns the marked
    // bytes on acceptance so the embedder runs exactly once.
    let marked = match state.watermarker.gate(&file.data, &payload)? {
        GateOutcome::Accepted(marked) => marked,
        GateOutcome::Rejected { reason } => return Err(ApiError::rejected(reason)),
    };

    if let Some(store) = &state.store {
        let record = store.store(&payload, purpose).await?;
        tracing::info!(
            payload = %record.payload_hex,
            purpose = %record.purpose,
            bits = marked.bits_embedded,
            "Marking record stored"
        );
    } else {
        tracing::warn!(
            payload = %payload,
            "No mark store configured; marking record not persisted"
        );
    }

    let download_name = file
        .file_name
        .as_deref()
        .and_then(|name| name.rsplit_once('.').map(|(stem, _)| stem.to_string()))
        .map(|stem| format!("{}.marked.png", stem))
        .unwrap_or_else(|| "marked.png".to_string());

    let headers = [
        (header::CONTENT_TYPE, "image/png".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download_name),
        ),
        (HeaderName::from_static("x-payload"), payload),
        (
            HeaderName::from_static("x-bits-embedded"),
            marked.bits_embedded.to_string(),
        ),
    ];

    Ok((StatusCode::OK, headers, marked.png).into_response())
}
