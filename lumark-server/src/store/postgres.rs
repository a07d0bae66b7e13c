//! PostgreSQL implementation of the mark store.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{MarkRecord, StoreError};

/// PostgreSQL-backed mark store.
#[derive(Clone)]
pub struct PostgresMarkStore {
    pool: PgPool,
}

/// Row type for database queries.
#[derive(FromRow)]
struct MarkRow {
    id: Uuid,
    payload_hex: String,
    purpose: String,
    created_at: DateTime<Utc>,
}

impl From<MarkRow> for MarkRecord {
    fn from(row: MarkRow) -> Self {
        Self {
            id: row.id,
            payload_hex: row.payload_hex,
            purpose: row.purpose,
            created_at: row.created_at,
        }
    }
}

impl PostgresMarkStore {
    /// Create a new mark store with the given database URL.
    ///
    /// Runs migrations automatically on connection.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Migration(e.to_string()))?;

        tracing::info!("Mark store connected and migrations applied");

        Ok(Self { pool })
    }

    /// Create a mark store from an existing pool (for testing).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new marking record.
    ///
    /// The payload column carries a uniqueness constraint; inserting a
    /// payload that already exists is a [`StoreError::DuplicatePayload`].
    pub async fn store(&self, payload_hex: &str, purpose: &str) -> Result<MarkRecord, StoreError> {
        let row: MarkRow = sqlx::query_as(
            r#"
            INSERT INTO marks (payload_hex, purpose)
            VALUES ($1, $2)
            RETURNING id, payload_hex, purpose, created_at
            "#,
        )
        .bind(payload_hex)
        .bind(purpose)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicatePayload(payload_hex.to_string())
            }
            _ => StoreError::Query(e.to_string()),
        })?;

        tracing::debug!(payload = %row.payload_hex, "Stored marking record");

        Ok(row.into())
    }

    /// Look up a marking record by its payload.
    pub async fn find_by_payload(
        &self,
        payload_hex: &str,
    ) -> Result<Option<MarkRecord>, StoreError> {
        let row: Option<MarkRow> = sqlx::query_as(
            r#"
            SELECT id, payload_hex, purpose, created_at
            FROM marks
            WHERE payload_hex = $1
            "#,
        )
        .bind(payload_hex)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// List the most recent marking records, newest first.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<MarkRecord>, StoreError> {
        let rows: Vec<MarkRow> = sqlx::query_as(
            r#"
            SELECT id, payload_hex, purpose, created_at
            FROM marks
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Count total marking records in the store.
    pub async fn count(&self) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM marks")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
