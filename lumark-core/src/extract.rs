//! Coefficient extractor: mirrors the embedder's geometry exactly.

use tracing::debug;

use crate::config::CodecConfig;
use crate::dct::Dct;
use crate::error::Result;
use crate::geometry::block_positions;
use crate::payload;
use crate::plane::LumaImage;

/// A payload recovered from an image.
#[derive(Debug, Clone)]
pub struct RecoveredPayload {
    /// 64-character hex identifier; the all-zero sentinel when nothing
    /// valid was recoverable.
    pub hex: String,
    /// Bits read from real block positions before zero-filling.
    pub bits_read: usize,
    /// True when every payload bit came from a real block position. This is
    /// an observability signal only; the sentinel contract of the hex value
    /// is what external lookups key on.
    pub complete: bool,
}

impl RecoveredPayload {
    /// True when only the all-zero sentinel was recovered.
    pub fn is_sentinel(&self) -> bool {
        self.hex == payload::ZERO_PAYLOAD
    }
}

/// Read one bit per geometry position and decode the payload.
///
/// Always produces exactly `payload_bits` bits, zero-filling any shortfall
/// before decoding. The decision threshold sits strictly inside the
/// embedding margin, tolerating transform rounding and the 8-bit
/// quantization of intermediate encode/decode steps.
pub fn extract(cfg: &CodecConfig, dct: &Dct, plane: &LumaImage) -> Result<RecoveredPayload> {
    let positions = block_positions(cfg, plane.rows(), plane.cols(), cfg.payload_bits)?;
    let n = cfg.block_size;
    let carrier = cfg.carrier.0 * n + cfg.carrier.1;

    let mut samples = vec![0.0f32; n * n];
    let mut coeffs = vec![0.0f32; n * n];
    let mut bits = Vec::with_capacity(cfg.payload_bits);

    for &(row, col) in &positions {
        plane.copy_block(row, col, n, &mut samples);
        for s in samples.iter_mut() {
            *s -= 128.0;
        }
        dct.forward(&samples, &mut coeffs);
        bits.push(u8::from(coeffs[carrier] > cfg.threshold));
    }

    let bits_read = bits.len();
    bits.resize(cfg.payload_bits, 0);

    let recovered = RecoveredPayload {
        hex: payload::decode(&bits, cfg.payload_bits),
        bits_read,
        complete: bits_read == cfg.payload_bits,
    };
    debug!(
        bits_read = recovered.bits_read,
        complete = recovered.complete,
        "payload extracted"
    );
    Ok(recovered)
}
