//! Lumark Core - invisible provenance marking for raster images.
//!
//! This crate embeds a short identifying payload into pixel data such that
//! it survives lossless re-encoding, stays imperceptible, and can later be
//! recovered to prove the image passed through the marking system.
//!
//! # How it works
//!
//! - A 256-bit payload (64 hex characters) becomes an ordered bit sequence
//! - A deterministic geometry picks 8x8 block origins in the image center
//! - Each block's mid-frequency DCT coefficient is driven past +/-50 to
//!   encode one bit; extraction thresholds the same coefficient at 25
//! - An integrity gate replays the full embed/extract round trip and
//!   accepts a marked image only on exact payload equality
//!
//! # Example
//!
//! ```no_run
//! use lumark_core::{GateOutcome, Watermarker};
//!
//! # fn example() -> lumark_core::Result<()> {
//! let image_bytes = std::fs::read("photo.png").unwrap();
//! let payload = "a3f0917bd24c8e5600ffeedd1289ab4575310c0d0e0f9f8e7d6c5b4a39281706";
//!
//! let wm = Watermarker::default();
//! match wm.gate(&image_bytes, payload)? {
//!     GateOutcome::Accepted(marked) => {
//!         std::fs::write("photo.marked.png", &marked.png).unwrap();
//!         let recovered = wm.verify_image(&marked.png)?;
//!         assert_eq!(recovered.hex, payload);
//!     }
//!     GateOutcome::Rejected { reason } => eprintln!("unusable image: {reason}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dct;
pub mod embed;
pub mod error;
pub mod extract;
pub mod gate;
pub mod geometry;
pub mod payload;
pub mod plane;
pub mod watermark;

// Re-export main types for convenience
pub use config::CodecConfig;
pub use embed::EmbedReport;
pub use error::{Result, WatermarkError};
pub use extract::RecoveredPayload;
pub use gate::{GateOutcome, MarkedImage};
pub use payload::{PAYLOAD_BITS, PAYLOAD_HEX_LEN, ZERO_PAYLOAD};
pub use watermark::Watermarker;
