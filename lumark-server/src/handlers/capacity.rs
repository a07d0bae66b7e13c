//! Capacity testing handler
//!
//! Handles POST /capacity requests: runs the full integrity gate against an
//! uploaded image without persisting anything, so unsuitable images can be
//! rejected before committing resources.

use axum::extract::{Multipart, State};
use axum::Json;
use lumark_core::GateOutcome;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::multipart::MultipartFields;
use crate::payload::generate_payload;
use crate::state::AppState;
use crate::validation::DEFAULT_MAX_FILE_SIZE;

/// Response for a capacity test
#[derive(Serialize, ToSchema)]
pub struct CapacityResponse {
    /// Whether the integrity gate accepted the image
    #[schema(example = true)]
    pub accepted: bool,
    /// Bits embedded during the trial run (accepted images only)
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 256)]
    pub bits_embedded: Option<usize>,
    /// Why the gate rejected the image (rejected images only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// The trial payload used for the round trip
    pub payload: String,
}

/// Test whether an image can reliably carry a full payload
///
/// Accepts multipart/form-data with:
/// - **file** (required): The candidate image
/// - **payload** (optional): 64-hex payload to trial; a fresh one is
///   generated when omitted
///
/// The marked trial image is discarded; nothing is persisted either way.
#[utoipa::path(
    post,
    path = "/capacity",
    tag = "Marking",
    request_body(
        content_type = "multipart/form-data",
        description = "Candidate image and optional trial payload"
    ),
    responses(
        (status = 200, description = "Gate verdict", body = CapacityResponse),
        (status = 400, description = "Invalid request (missing file, undecodable image, malformed payload)")
    )
)]
pub async fn capacity_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<CapacityResponse>, ApiError> {
    let fields = MultipartFields::parse(&mut multipart, DEFAULT_MAX_FILE_SIZE).await?;
    let file = fields.require_file()?;

    let payload = match fields.get_text("payload") {
        Some(hex) => hex.to_ascii_lowercase(),
        None => generate_payload("capacity-test"),
    };

    let response = match state.watermarker.gate(&file.data, &payload)? {
        GateOutcome::Accepted(marked) => CapacityResponse {
            accepted: true,
            bits_embedded: Some(marked.bits_embedded),
            reason: None,
            payload,
        },
        GateOutcome::Rejected { reason } => CapacityResponse {
            accepted: false,
            bits_embedded: None,
            reason: Some(reason),
            payload,
        },
    };

    Ok(Json(response))
}
