//! Application state module
//!
//! Defines shared state accessible across all request handlers.

use std::sync::Arc;

use lumark_core::Watermarker;

use crate::store::PostgresMarkStore;

/// Application state containing shared resources.
#[derive(Clone)]
pub struct AppState {
    /// Mark store for payload-to-purpose records; `None` disables persistence
    pub store: Option<Arc<PostgresMarkStore>>,
    /// The watermark codec; stateless and shared across requests
    pub watermarker: Arc<Watermarker>,
}

impl AppState {
    /// State with no persistence (tests, stateless deployments).
    pub fn without_store() -> Self {
        Self {
            store: None,
            watermarker: Arc::new(Watermarker::default()),
        }
    }
}
