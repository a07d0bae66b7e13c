//! Mark store module for persisting payload-to-purpose marking records.
//!
//! A marking record associates an embedded payload with the purpose it was
//! marked for. Records are keyed by the payload itself with a uniqueness
//! constraint, and are written strictly after the integrity gate has
//! accepted the marked image, never before.

pub mod error;
pub mod postgres;

pub use error::StoreError;
pub use postgres::PostgresMarkStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A marking record stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkRecord {
    /// Unique database identifier
    pub id: Uuid,
    /// 64-character hex payload embedded in the image (unique)
    pub payload_hex: String,
    /// Caller-supplied purpose the image was marked for
    pub purpose: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
