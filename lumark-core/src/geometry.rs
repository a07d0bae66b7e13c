//! Deterministic block geometry shared by embedder, extractor and overlay.
//!
//! Positions are a pure function of `(rows, cols, bit_count)` and the codec
//! configuration. Embed-time and extract-time geometry must agree bit for
//! bit with no side channel carrying positions, so both sides call this one
//! generator; any divergence silently corrupts recovery.

use crate::config::CodecConfig;
use crate::error::{Result, WatermarkError};

/// `(row, col)` origin of a block window fully inside the scan region.
pub type BlockPos = (usize, usize);

/// Compute the ordered block origins for a `rows` × `cols` plane.
///
/// The scan region is the central portion of the image left after insetting
/// `dim / inset_divisor` on each side; it is raster-scanned in steps of
/// `block_stride`, emitting an origin wherever the whole block window still
/// fits (`origin + block_size <= region_end`). Emission stops after
/// `bit_count` positions; a region yielding fewer is not an error here,
/// the integrity gate is what catches under-capacity images.
pub fn block_positions(
    cfg: &CodecConfig,
    rows: usize,
    cols: usize,
    bit_count: usize,
) -> Result<Vec<BlockPos>> {
    if rows < cfg.min_dimension || cols < cfg.min_dimension {
        return Err(WatermarkError::ImageTooSmall {
            rows,
            cols,
            min: cfg.min_dimension,
        });
    }

    let row_start = rows / cfg.inset_divisor;
    let row_end = rows - rows / cfg.inset_divisor;
    let col_start = cols / cfg.inset_divisor;
    let col_end = cols - cols / cfg.inset_divisor;

    let mut positions = Vec::new();
    let mut r = row_start;
    while r + cfg.block_size <= row_end && positions.len() < bit_count {
        let mut c = col_start;
        while c + cfg.block_size <= col_end && positions.len() < bit_count {
            positions.push((r, c));
            c += cfg.block_stride;
        }
        r += cfg.block_stride;
    }

    Ok(positions)
}

/// Number of positions the region yields regardless of any bit count.
pub fn capacity(cfg: &CodecConfig, rows: usize, cols: usize) -> Result<usize> {
    let per_axis = |dim: usize| {
        let start = dim / cfg.inset_divisor;
        let end = dim - dim / cfg.inset_divisor;
        if end >= start + cfg.block_size {
            (end - cfg.block_size - start) / cfg.block_stride + 1
        } else {
            0
        }
    };

    if rows < cfg.min_dimension || cols < cfg.min_dimension {
        return Err(WatermarkError::ImageTooSmall {
            rows,
            cols,
            min: cfg.min_dimension,
        });
    }

    Ok(per_axis(rows) * per_axis(cols))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs_give_identical_sequences() {
        let cfg = CodecConfig::default();
        let a = block_positions(&cfg, 513, 771, 256).unwrap();
        let b = block_positions(&cfg, 513, 771, 256).unwrap();
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn rejects_below_minimum_dimension() {
        let cfg = CodecConfig::default();
        let err = block_positions(&cfg, 64, 64, 256).unwrap_err();
        assert!(matches!(err, WatermarkError::ImageTooSmall { .. }));
        assert!(block_positions(&cfg, 127, 512, 256).is_err());
        assert!(block_positions(&cfg, 512, 127, 256).is_err());
    }

    #[test]
    fn windows_stay_inside_region() {
        let cfg = CodecConfig::default();
        let rows = 640;
        let cols = 640;
        let positions = block_positions(&cfg, rows, cols, 10_000).unwrap();
        let row_end = rows - rows / cfg.inset_divisor;
        let col_end = cols - cols / cfg.inset_divisor;
        for (r, c) in positions {
            assert!(r >= rows / cfg.inset_divisor);
            assert!(c >= cols / cfg.inset_divisor);
            assert!(r + cfg.block_size <= row_end);
            assert!(c + cfg.block_size <= col_end);
        }
    }

    #[test]
    fn truncates_at_bit_count() {
        let cfg = CodecConfig::default();
        let positions = block_positions(&cfg, 640, 640, 100).unwrap();
        assert_eq!(positions.len(), 100);
    }

    #[test]
    fn short_region_yields_fewer_positions_without_error() {
        let cfg = CodecConfig::default();
        // 200x200: the central half spans 100 samples, good for 5 origins
        // per axis at stride 20.
        let positions = block_positions(&cfg, 200, 200, 256).unwrap();
        assert_eq!(positions.len(), 25);
    }

    #[test]
    fn minimum_size_capacity_is_scarce() {
        let cfg = CodecConfig::default();
        // The 128x128 floor admits only a 3x3 grid of origins; full payloads
        // must be caught by the gate, not silently accepted.
        assert_eq!(capacity(&cfg, 128, 128).unwrap(), 9);
    }

    #[test]
    fn capacity_matches_enumeration() {
        let cfg = CodecConfig::default();
        for (rows, cols) in [(128, 128), (200, 200), (512, 512), (640, 640), (613, 901)] {
            let enumerated = block_positions(&cfg, rows, cols, usize::MAX).unwrap().len();
            assert_eq!(capacity(&cfg, rows, cols).unwrap(), enumerated, "{rows}x{cols}");
        }
    }

    #[test]
    fn full_payload_needs_640() {
        let cfg = CodecConfig::default();
        assert!(capacity(&cfg, 512, 512).unwrap() < 256);
        assert!(capacity(&cfg, 640, 640).unwrap() >= 256);
    }

    #[test]
    fn custom_geometry_is_honored() {
        let cfg = CodecConfig {
            block_stride: 8,
            inset_divisor: 8,
            ..CodecConfig::default()
        };
        let dense = block_positions(&cfg, 256, 256, usize::MAX).unwrap().len();
        let sparse = block_positions(&CodecConfig::default(), 256, 256, usize::MAX)
            .unwrap()
            .len();
        assert!(dense > sparse);
    }
}
