//! Payload generation.
//!
//! The codec treats payloads as opaque identifiers; producing one that is
//! unlikely to collide is the surrounding system's job. A payload is the
//! SHA3-256 digest of the caller's purpose string plus a random UUID nonce,
//! rendered as 64 lowercase hex characters.

use sha3::{Digest, Sha3_256};
use uuid::Uuid;

/// Derive a fresh 64-hex-character payload for `purpose`.
pub fn generate_payload(purpose: &str) -> String {
    let mut hasher = Sha3_256::new();
    hasher.update(purpose.as_bytes());
    hasher.update(Uuid::new_v4().simple().to_string().as_bytes());
    hex::encode(hasher.finalize())
}
