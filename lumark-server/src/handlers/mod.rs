//! HTTP request handlers
//!
//! This module contains all the request handlers for the API endpoints.

pub mod capacity;
pub mod health;
pub mod history;
pub mod mark;
pub mod overlay;
pub mod verify;

pub use capacity::{capacity_handler, CapacityResponse};
pub use health::{health, ready, HealthResponse, ReadyResponse};
pub use history::{history_handler, HistoryEntry, HistoryQuery};
pub use mark::mark_handler;
pub use overlay::overlay_handler;
pub use verify::{verify_handler, VerifyResponse};
