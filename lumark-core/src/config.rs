//! Codec configuration.
//!
//! Every geometric and signal-domain constant of the codec lives here and is
//! injected at [`Watermarker`](crate::Watermarker) construction, so tests can
//! exercise boundary geometries without touching the algorithm code. The
//! default values are the canonical production geometry; embedder and
//! extractor must be driven by the same configuration or recovery silently
//! corrupts.

/// Tuning parameters for the watermark codec.
#[derive(Debug, Clone)]
pub struct CodecConfig {
    /// Denominator of the region inset. The scan region along each axis
    /// starts at `dim / inset_divisor` and ends at `dim - dim / inset_divisor`,
    /// keeping marks away from croppable borders.
    pub inset_divisor: usize,
    /// Step in samples between consecutive block origins along both axes.
    pub block_stride: usize,
    /// Side length of the square sample window carrying one bit.
    pub block_size: usize,
    /// `(row, col)` index of the carrier coefficient inside a transformed
    /// block. A mid-frequency position trades imperceptibility against
    /// robustness to transform rounding.
    pub carrier: (usize, usize),
    /// Magnitude the carrier coefficient is driven to (at least) when a bit
    /// is written.
    pub offset: f32,
    /// Decision threshold at extraction time. Must sit strictly inside the
    /// embedding margin to tolerate rounding and 8-bit requantization.
    pub threshold: f32,
    /// Number of payload bits carried by an image.
    pub payload_bits: usize,
    /// Minimum rows and columns an image must have before a usable central
    /// region exists.
    pub min_dimension: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            inset_divisor: 4,
            block_stride: 20,
            block_size: 8,
            carrier: (4, 4),
            offset: 50.0,
            threshold: 25.0,
            payload_bits: 256,
            min_dimension: 128,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_inside_margin() {
        let cfg = CodecConfig::default();
        assert!(cfg.threshold > 0.0);
        assert!(cfg.threshold < cfg.offset);
    }

    #[test]
    fn default_carrier_inside_block() {
        let cfg = CodecConfig::default();
        assert!(cfg.carrier.0 < cfg.block_size);
        assert!(cfg.carrier.1 < cfg.block_size);
    }
}
