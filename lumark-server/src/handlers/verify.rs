//! Mark verification handler
//!
//! Handles POST /verify requests: recovers the payload from an uploaded
//! image and resolves it against the mark store.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::multipart::MultipartFields;
use crate::state::AppState;
use crate::validation::DEFAULT_MAX_FILE_SIZE;

/// Response for a successfully resolved mark
#[derive(Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Resolution status; always "found" on 200 responses
    #[schema(example = "found")]
    pub status: &'static str,
    /// Purpose the image was originally marked for
    #[schema(example = "press kit 2026")]
    pub purpose: String,
    /// When the marking record was created
    pub created_at: DateTime<Utc>,
    /// The recovered 64-hex-character payload
    #[schema(example = "9b2f45c1d8a7e630...")]
    pub payload: String,
}

/// Recover and resolve the payload embedded in an uploaded image
///
/// Accepts multipart/form-data with:
/// - **file** (required): The image to verify
///
/// Extraction always yields a 64-hex identifier; the all-zero sentinel
/// means no valid mark was recoverable and resolves to 404, as does a
/// payload with no stored record.
#[utoipa::path(
    post,
    path = "/verify",
    tag = "Verification",
    request_body(
        content_type = "multipart/form-data",
        description = "Image file to verify"
    ),
    responses(
        (status = 200, description = "Mark recovered and resolved", body = VerifyResponse),
        (status = 400, description = "Invalid request (missing file, undecodable image)"),
        (status = 404, description = "No valid mark recovered, or no record for the payload"),
        (status = 503, description = "Mark store not configured")
    )
)]
pub async fn verify_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VerifyResponse>, ApiError> {
    let fields = MultipartFields::parse(&mut multipart, DEFAULT_MAX_FILE_SIZE).await?;
    let file = fields.require_file()?;

    let recovered = state.watermarker.verify_image(&file.data)?;
    tracing::info!(
        payload = %recovered.hex,
        bits_read = recovered.bits_read,
        complete = recovered.complete,
        "Payload recovered"
    );

    if recovered.is_sentinel() {
        return Err(ApiError::not_found(
            "Image does not contain a recoverable mark",
        ));
    }

    let store = state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Mark store not configured"))?;

    let record = store
        .find_by_payload(&recovered.hex)
        .await?
        .ok_or_else(|| ApiError::not_found("No marking record for the recovered payload"))?;

    Ok(Json(VerifyResponse {
        status: "found",
        purpose: record.purpose,
        created_at: record.created_at,
        payload: record.payload_hex,
    }))
}
