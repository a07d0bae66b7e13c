//! Coefficient embedder: one payload bit per block.
//!
//! Each block window is centered, transformed, and its carrier coefficient
//! driven past the configured offset in the direction encoding the bit.
//! Quantization-style encoding: the pre-existing coefficient value is
//! irrelevant, only the resulting sign/magnitude class matters, which is
//! what survives the later inverse transform and 8-bit requantization.

use tracing::{debug, warn};

use crate::config::CodecConfig;
use crate::dct::Dct;
use crate::error::Result;
use crate::geometry::block_positions;
use crate::plane::LumaImage;

/// Outcome of an embed pass.
#[derive(Debug, Clone, Copy)]
pub struct EmbedReport {
    /// Bits actually written; fewer than requested when the scan region is
    /// exhausted first.
    pub bits_embedded: usize,
    /// Bits the caller asked for.
    pub bits_requested: usize,
}

impl EmbedReport {
    /// True when every requested bit found a block position.
    pub fn complete(&self) -> bool {
        self.bits_embedded == self.bits_requested
    }
}

/// Embed `bits` into `plane`, one bit per geometry position, in order.
///
/// Bits beyond the available positions are silently dropped; that capacity
/// shortfall is logged here and caught later by the integrity gate.
pub fn embed(
    cfg: &CodecConfig,
    dct: &Dct,
    plane: &mut LumaImage,
    bits: &[u8],
) -> Result<EmbedReport> {
    let positions = block_positions(cfg, plane.rows(), plane.cols(), bits.len())?;
    let n = cfg.block_size;
    let carrier = cfg.carrier.0 * n + cfg.carrier.1;

    let mut samples = vec![0.0f32; n * n];
    let mut coeffs = vec![0.0f32; n * n];

    for (&(row, col), &bit) in positions.iter().zip(bits) {
        plane.copy_block(row, col, n, &mut samples);
        for s in samples.iter_mut() {
            *s -= 128.0;
        }
        dct.forward(&samples, &mut coeffs);

        let value = coeffs[carrier];
        coeffs[carrier] = if bit == 1 {
            value.abs() + cfg.offset
        } else {
            -value.abs() - cfg.offset
        };

        dct.inverse(&coeffs, &mut samples);
        for s in samples.iter_mut() {
            *s = (*s + 128.0).clamp(0.0, 255.0);
        }
        plane.write_block(row, col, n, &samples);
    }

    let report = EmbedReport {
        bits_embedded: positions.len().min(bits.len()),
        bits_requested: bits.len(),
    };

    if report.complete() {
        debug!(bits = report.bits_embedded, "payload embedded");
    } else {
        warn!(
            embedded = report.bits_embedded,
            requested = report.bits_requested,
            "capacity shortfall, trailing bits dropped"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn gray_plane(size: u32) -> LumaImage {
        LumaImage::from_rgb(&RgbImage::from_pixel(size, size, Rgb([128, 128, 128])))
    }

    fn carrier_coefficient(cfg: &CodecConfig, dct: &Dct, plane: &LumaImage, pos: (usize, usize)) -> f32 {
        let n = cfg.block_size;
        let mut samples = vec![0.0f32; n * n];
        let mut coeffs = vec![0.0f32; n * n];
        plane.copy_block(pos.0, pos.1, n, &mut samples);
        for s in samples.iter_mut() {
            *s -= 128.0;
        }
        dct.forward(&samples, &mut coeffs);
        coeffs[cfg.carrier.0 * n + cfg.carrier.1]
    }

    #[test]
    fn drives_carrier_past_offset_in_bit_direction() {
        let cfg = CodecConfig::default();
        let dct = Dct::new(cfg.block_size);
        let mut plane = gray_plane(640);

        let bits: Vec<u8> = (0..256).map(|i| (i % 2) as u8).collect();
        let report = embed(&cfg, &dct, &mut plane, &bits).unwrap();
        assert_eq!(report.bits_embedded, 256);
        assert!(report.complete());

        let positions = block_positions(&cfg, plane.rows(), plane.cols(), bits.len()).unwrap();
        for (pos, &bit) in positions.iter().zip(&bits) {
            let value = carrier_coefficient(&cfg, &dct, &plane, *pos);
            if bit == 1 {
                assert!(value >= cfg.offset - 1.0, "bit 1 carrier at {}", value);
            } else {
                assert!(value <= -cfg.offset + 1.0, "bit 0 carrier at {}", value);
            }
        }
    }

    #[test]
    fn reports_shortfall_on_small_region() {
        let cfg = CodecConfig::default();
        let dct = Dct::new(cfg.block_size);
        let mut plane = gray_plane(200);

        let bits = vec![1u8; 256];
        let report = embed(&cfg, &dct, &mut plane, &bits).unwrap();
        assert_eq!(report.bits_embedded, 25);
        assert_eq!(report.bits_requested, 256);
        assert!(!report.complete());
    }

    #[test]
    fn too_small_plane_fails_before_any_transform() {
        let cfg = CodecConfig::default();
        let dct = Dct::new(cfg.block_size);
        let mut plane = gray_plane(64);
        assert!(embed(&cfg, &dct, &mut plane, &[1, 0, 1]).is_err());
    }

    #[test]
    fn samples_stay_in_range() {
        let cfg = CodecConfig::default();
        let dct = Dct::new(cfg.block_size);
        // Near-white plane: the positive lobe of the carrier basis must clamp.
        let mut plane =
            LumaImage::from_rgb(&RgbImage::from_pixel(640, 640, Rgb([250, 250, 250])));
        let bits = vec![1u8; 256];
        embed(&cfg, &dct, &mut plane, &bits).unwrap();
        for r in 0..plane.rows() {
            for c in 0..plane.cols() {
                let s = plane.luma_at(r, c);
                assert!((0.0..=255.0).contains(&s));
            }
        }
    }
}
