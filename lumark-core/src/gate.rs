//! Integrity gate: the mandatory embed → extract round trip.
//!
//! Before any marking record may be persisted, the candidate image must
//! prove it can carry the payload through a full encode/decode pass. The
//! gate embeds, re-encodes, re-decodes the produced bytes, extracts, and
//! accepts only on exact payload equality. Everything that can go wrong
//! during the round trip (capacity shortfall, sub-minimum geometry, a
//! mismatching recovery) folds into a single `Rejected` outcome so the
//! caller has one place to decide user-facing messaging.

use tracing::{info, warn};

use crate::config::CodecConfig;
use crate::dct::Dct;
use crate::embed::embed;
use crate::error::{Result, WatermarkError};
use crate::extract::extract;
use crate::payload;
use crate::plane::LumaImage;

/// A marked image: losslessly encoded PNG bytes carrying an embedded payload.
#[derive(Debug, Clone)]
pub struct MarkedImage {
    /// PNG-encoded image bytes.
    pub png: Vec<u8>,
    /// Bits actually embedded (diagnostics).
    pub bits_embedded: usize,
}

/// Result of the round-trip check.
#[derive(Debug)]
pub enum GateOutcome {
    /// Recovered payload matched exactly. Carries the marked image so the
    /// caller does not run the embedder a second time.
    Accepted(MarkedImage),
    /// Round trip failed; the image must not be committed.
    Rejected { reason: String },
}

impl GateOutcome {
    pub fn accepted(&self) -> bool {
        matches!(self, GateOutcome::Accepted(_))
    }
}

/// Run the gate for `image_bytes` and `payload_hex`.
///
/// `MalformedImage` and `MalformedPayload` are input errors and propagate;
/// `ImageTooSmall` is an image-quality verdict and becomes `Rejected`.
pub fn run(cfg: &CodecConfig, dct: &Dct, image_bytes: &[u8], payload_hex: &str) -> Result<GateOutcome> {
    let bits = payload::encode(payload_hex, cfg.payload_bits)?;
    let expected = payload_hex.to_ascii_lowercase();

    let mut plane = LumaImage::from_bytes(image_bytes)?;
    let report = match embed(cfg, dct, &mut plane, &bits) {
        Ok(report) => report,
        Err(err @ WatermarkError::ImageTooSmall { .. }) => {
            warn!(%err, "gate rejected image below size floor");
            return Ok(GateOutcome::Rejected {
                reason: err.to_string(),
            });
        }
        Err(err) => return Err(err),
    };

    let png = plane.to_png()?;

    // Extract from the re-decoded bytes, not the in-memory plane, so the
    // check covers the quantization of the full encode path.
    let reread = LumaImage::from_bytes(&png)?;
    let recovered = extract(cfg, dct, &reread)?;

    if recovered.hex == expected {
        info!(bits = report.bits_embedded, "gate accepted marked image");
        Ok(GateOutcome::Accepted(MarkedImage {
            png,
            bits_embedded: report.bits_embedded,
        }))
    } else {
        warn!(
            embedded = report.bits_embedded,
            requested = report.bits_requested,
            "gate rejected image, recovered payload mismatch"
        );
        Ok(GateOutcome::Rejected {
            reason: format!(
                "recovered payload does not match ({} of {} bits embedded)",
                report.bits_embedded, report.bits_requested
            ),
        })
    }
}
