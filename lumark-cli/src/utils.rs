//! Common utility functions shared across CLI commands.

use std::path::{Path, PathBuf};

use sha3::{Digest, Sha3_256};
use uuid::Uuid;

/// Build the marked-image output path from the original file path.
///
/// Transforms `image.ext` into `image.marked.png`.
pub fn build_marked_path(file: &Path) -> PathBuf {
    file.with_extension("marked.png")
}

/// Build the overlay output path from the original file path.
pub fn build_overlay_path(file: &Path) -> PathBuf {
    file.with_extension("overlay.png")
}

/// Derive a fresh 64-hex payload from a purpose string and a random nonce.
pub fn generate_payload(purpose: &str) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(purpose.as_bytes());
    hasher.update(Uuid::new_v4().simple().to_string().as_bytes());
    hex::encode(hasher.finalize())
}
