//! Marking history handler
//!
//! Handles GET /history requests: lists recent marking records.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::state::AppState;

/// Default number of history entries returned
const DEFAULT_LIMIT: i64 = 10;
/// Upper bound on the requested history size
const MAX_LIMIT: i64 = 100;

/// Query parameters for the history listing
#[derive(Deserialize, IntoParams)]
pub struct HistoryQuery {
    /// Maximum entries to return (default 10, max 100)
    pub limit: Option<i64>,
}

/// One marking record in the history listing
#[derive(Serialize, ToSchema)]
pub struct HistoryEntry {
    /// The embedded payload
    pub payload: String,
    /// Purpose the image was marked for
    pub purpose: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// List recent marking records, newest first
#[utoipa::path(
    get,
    path = "/history",
    tag = "Marking",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Recent marking records", body = [HistoryEntry]),
        (status = 503, description = "Mark store not configured")
    )
)]
pub async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let store = state
        .store
        .as_ref()
        .ok_or_else(|| ApiError::service_unavailable("Mark store not configured"))?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let records = store.list_recent(limit).await?;

    let entries = records
        .into_iter()
        .map(|record| HistoryEntry {
            payload: record.payload_hex,
            purpose: record.purpose,
            created_at: record.created_at,
        })
        .collect();

    Ok(Json(entries))
}
