//! Public byte-level surface of the watermark codec.

use image::Rgb;
use tracing::debug;

use crate::config::CodecConfig;
use crate::dct::Dct;
use crate::embed::embed;
use crate::error::Result;
use crate::extract::{extract, RecoveredPayload};
use crate::gate::{self, GateOutcome, MarkedImage};
use crate::geometry::block_positions;
use crate::payload;
use crate::plane::{decode_rgb, encode_png, LumaImage};

/// Stroke color for the diagnostic overlay rectangles.
const OVERLAY_STROKE: Rgb<u8> = Rgb([0, 255, 0]);

/// The watermark codec, bound to one [`CodecConfig`].
///
/// Stateless across calls: every operation is a pure function of its inputs,
/// so a single `Watermarker` may be shared freely between threads.
pub struct Watermarker {
    config: CodecConfig,
    dct: Dct,
}

impl Watermarker {
    pub fn new(config: CodecConfig) -> Self {
        let dct = Dct::new(config.block_size);
        Self { config, dct }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Embed `payload_hex` into the image and return it losslessly
    /// re-encoded as PNG.
    ///
    /// This is the raw embed operation; it does not gate. Run
    /// [`Watermarker::gate`] before committing the result anywhere.
    pub fn mark_image(&self, image_bytes: &[u8], payload_hex: &str) -> Result<MarkedImage> {
        let bits = payload::encode(payload_hex, self.config.payload_bits)?;
        let mut plane = LumaImage::from_bytes(image_bytes)?;
        let report = embed(&self.config, &self.dct, &mut plane, &bits)?;
        let png = plane.to_png()?;
        debug!(bits = report.bits_embedded, "image marked");
        Ok(MarkedImage {
            png,
            bits_embedded: report.bits_embedded,
        })
    }

    /// Recover the payload carried by the image.
    ///
    /// The returned hex may be the all-zero sentinel, which callers must
    /// treat as "no valid payload recovered".
    pub fn verify_image(&self, image_bytes: &[u8]) -> Result<RecoveredPayload> {
        let plane = LumaImage::from_bytes(image_bytes)?;
        extract(&self.config, &self.dct, &plane)
    }

    /// Run the full integrity gate without committing anything.
    pub fn gate(&self, image_bytes: &[u8], payload_hex: &str) -> Result<GateOutcome> {
        gate::run(&self.config, &self.dct, image_bytes, payload_hex)
    }

    /// Whether the gate accepts this image for this payload.
    pub fn test_capacity(&self, image_bytes: &[u8], payload_hex: &str) -> Result<bool> {
        Ok(self.gate(image_bytes, payload_hex)?.accepted())
    }

    /// Draw the block geometry as visible rectangles on a copy of the
    /// image. Diagnostic only; never part of the embed or verify path.
    pub fn debug_overlay(&self, image_bytes: &[u8]) -> Result<Vec<u8>> {
        let mut img = decode_rgb(image_bytes)?;
        let rows = img.height() as usize;
        let cols = img.width() as usize;
        let n = self.config.block_size;

        let positions = block_positions(&self.config, rows, cols, self.config.payload_bits)?;
        for &(row, col) in &positions {
            for x in col..=col + n {
                img.put_pixel(x as u32, row as u32, OVERLAY_STROKE);
                img.put_pixel(x as u32, (row + n) as u32, OVERLAY_STROKE);
            }
            for y in row..=row + n {
                img.put_pixel(col as u32, y as u32, OVERLAY_STROKE);
                img.put_pixel((col + n) as u32, y as u32, OVERLAY_STROKE);
            }
        }
        debug!(blocks = positions.len(), "overlay rendered");
        encode_png(&img)
    }
}

impl Default for Watermarker {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}
