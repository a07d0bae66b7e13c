//! Luma plane extraction and lossless re-encoding.
//!
//! Images enter the codec as encoded bytes and are split into a floating
//! point BT.601 luma plane plus untouched chroma planes, so the mark only
//! ever perturbs luminance. Marked output is always re-encoded as PNG;
//! a lossy output format would destroy the embedded coefficients.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Result, WatermarkError};

/// A decoded image carried as separate luma and chroma planes.
///
/// Planes are value data: the codec never retains image state across calls.
#[derive(Debug)]
pub struct LumaImage {
    rows: usize,
    cols: usize,
    luma: Vec<f32>,
    cb: Vec<f32>,
    cr: Vec<f32>,
}

impl LumaImage {
    /// Decode image bytes (PNG, JPEG, BMP, TIFF, WebP) into planes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| WatermarkError::MalformedImage(e.to_string()))?;
        Ok(Self::from_rgb(&decoded.to_rgb8()))
    }

    /// Split an RGB image into BT.601 YCbCr planes.
    pub fn from_rgb(img: &RgbImage) -> Self {
        let cols = img.width() as usize;
        let rows = img.height() as usize;
        let mut luma = Vec::with_capacity(rows * cols);
        let mut cb = Vec::with_capacity(rows * cols);
        let mut cr = Vec::with_capacity(rows * cols);

        for pixel in img.pixels() {
            let [r, g, b] = pixel.0;
            let (r, g, b) = (r as f32, g as f32, b as f32);
            luma.push(0.299 * r + 0.587 * g + 0.114 * b);
            cb.push(128.0 - 0.168_736 * r - 0.331_264 * g + 0.5 * b);
            cr.push(128.0 + 0.5 * r - 0.418_688 * g - 0.081_312 * b);
        }

        Self {
            rows,
            cols,
            luma,
            cb,
            cr,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Luma sample at `(row, col)`.
    pub fn luma_at(&self, row: usize, col: usize) -> f32 {
        self.luma[row * self.cols + col]
    }

    /// Copy the `n`×`n` window at `(row, col)` into `out` (row-major).
    pub fn copy_block(&self, row: usize, col: usize, n: usize, out: &mut [f32]) {
        debug_assert!(row + n <= self.rows && col + n <= self.cols);
        debug_assert_eq!(out.len(), n * n);
        for i in 0..n {
            let base = (row + i) * self.cols + col;
            out[i * n..(i + 1) * n].copy_from_slice(&self.luma[base..base + n]);
        }
    }

    /// Write the `n`×`n` window at `(row, col)` back from `block`.
    pub fn write_block(&mut self, row: usize, col: usize, n: usize, block: &[f32]) {
        debug_assert!(row + n <= self.rows && col + n <= self.cols);
        debug_assert_eq!(block.len(), n * n);
        for i in 0..n {
            let base = (row + i) * self.cols + col;
            self.luma[base..base + n].copy_from_slice(&block[i * n..(i + 1) * n]);
        }
    }

    /// Recombine planes into an RGB image, clamping color-space round-off.
    pub fn to_rgb(&self) -> RgbImage {
        let mut img = RgbImage::new(self.cols as u32, self.rows as u32);
        for (idx, pixel) in img.pixels_mut().enumerate() {
            let y = self.luma[idx];
            let cb = self.cb[idx] - 128.0;
            let cr = self.cr[idx] - 128.0;
            let r = y + 1.402 * cr;
            let g = y - 0.344_136 * cb - 0.714_136 * cr;
            let b = y + 1.772 * cb;
            *pixel = Rgb([clamp_u8(r), clamp_u8(g), clamp_u8(b)]);
        }
        img
    }

    /// Encode the recombined image losslessly as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.to_rgb())
    }
}

/// Encode an RGB image as PNG bytes.
pub fn encode_png(img: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| WatermarkError::ImageEncode(e.to_string()))?;
    Ok(bytes)
}

/// Decode image bytes into RGB without a luma split (overlay path).
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| WatermarkError::MalformedImage(e.to_string()))?;
    Ok(decoded.to_rgb8())
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(width: u32, height: u32, level: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([level, level, level]))
    }

    #[test]
    fn rejects_undecodable_bytes() {
        let err = LumaImage::from_bytes(&[0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, WatermarkError::MalformedImage(_)));
    }

    #[test]
    fn png_roundtrip_preserves_dimensions() {
        let img = gray_image(40, 24, 128);
        let png = encode_png(&img).unwrap();
        let plane = LumaImage::from_bytes(&png).unwrap();
        assert_eq!(plane.rows(), 24);
        assert_eq!(plane.cols(), 40);
    }

    #[test]
    fn gray_luma_matches_level() {
        let plane = LumaImage::from_rgb(&gray_image(16, 16, 200));
        // BT.601 weights sum to one, so neutral gray maps straight through.
        assert!((plane.luma_at(8, 8) - 200.0).abs() < 0.5);
    }

    #[test]
    fn recombination_stays_near_original() {
        let mut img = RgbImage::new(32, 32);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = Rgb([(x * 8) as u8, (y * 8) as u8, ((x + y) * 4) as u8]);
        }
        let plane = LumaImage::from_rgb(&img);
        let back = plane.to_rgb();
        for (orig, round) in img.pixels().zip(back.pixels()) {
            for ch in 0..3 {
                let delta = (orig.0[ch] as i16 - round.0[ch] as i16).abs();
                assert!(delta <= 2, "channel drifted by {}", delta);
            }
        }
    }

    #[test]
    fn block_copy_writeback() {
        let mut plane = LumaImage::from_rgb(&gray_image(32, 32, 100));
        let mut block = vec![0.0f32; 64];
        plane.copy_block(4, 4, 8, &mut block);
        assert!(block.iter().all(|&s| (s - 100.0).abs() < 0.5));

        for s in block.iter_mut() {
            *s = 37.0;
        }
        plane.write_block(4, 4, 8, &block);
        assert!((plane.luma_at(4, 4) - 37.0).abs() < f32::EPSILON);
        assert!((plane.luma_at(11, 11) - 37.0).abs() < f32::EPSILON);
        // Neighbours outside the window untouched
        assert!((plane.luma_at(3, 4) - 100.0).abs() < 0.5);
        assert!((plane.luma_at(12, 4) - 100.0).abs() < 0.5);
    }
}
