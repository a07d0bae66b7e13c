//! End-to-end tests for the watermark codec.
//!
//! These tests exercise the byte-level surface: images go in as encoded
//! PNG bytes, come back marked, and the payload must survive the full
//! color-split / transform / requantize / re-encode pipeline.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};
use lumark_core::dct::Dct;
use lumark_core::geometry::block_positions;
use lumark_core::plane::LumaImage;
use lumark_core::{CodecConfig, GateOutcome, WatermarkError, Watermarker, ZERO_PAYLOAD};

const PAYLOAD: &str = "9b2f45c1d8a7e6301122deadbeefcafe5566778899aabbccddeeff0143578f6a";

/// Mid-range gradient with block-scale structure, far from the clamp
/// rails so coefficient displacement never clips.
fn create_test_image(width: u32, height: u32) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let base = 64.0 + 96.0 * (x as f32 / width as f32);
        let wave = 16.0 * ((y / 16) % 2) as f32;
        let level = (base + wave) as u8;
        *pixel = Rgb([level, level.saturating_add(10), level.saturating_sub(10)]);
    }
    img
}

fn to_png(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("PNG encoding failed");
    bytes
}

fn gray_png(size: u32, level: u8) -> Vec<u8> {
    to_png(&RgbImage::from_pixel(size, size, Rgb([level, level, level])))
}

// ============================================================================
// Round-trip law
// ============================================================================

#[test]
fn roundtrip_through_encoded_bytes() {
    let wm = Watermarker::default();
    let original = to_png(&create_test_image(640, 640));

    let marked = wm.mark_image(&original, PAYLOAD).expect("mark failed");
    assert_eq!(marked.bits_embedded, 256);

    let recovered = wm.verify_image(&marked.png).expect("verify failed");
    assert_eq!(recovered.hex, PAYLOAD);
    assert!(recovered.complete);
}

#[test]
fn roundtrip_on_non_square_image() {
    let wm = Watermarker::default();
    let original = to_png(&create_test_image(1024, 640));

    let marked = wm.mark_image(&original, PAYLOAD).unwrap();
    let recovered = wm.verify_image(&marked.png).unwrap();
    assert_eq!(recovered.hex, PAYLOAD);
}

#[test]
fn reverification_is_idempotent() {
    let wm = Watermarker::default();
    let marked = wm
        .mark_image(&to_png(&create_test_image(640, 640)), PAYLOAD)
        .unwrap();

    let first = wm.verify_image(&marked.png).unwrap();
    let second = wm.verify_image(&marked.png).unwrap();
    assert_eq!(first.hex, second.hex);
    assert_eq!(first.bits_read, second.bits_read);
}

// ============================================================================
// Decision margin
// ============================================================================

#[test]
fn carrier_classification_survives_requantization() {
    let cfg = CodecConfig::default();
    let dct = Dct::new(cfg.block_size);
    let wm = Watermarker::default();

    let marked = wm
        .mark_image(&to_png(&create_test_image(640, 640)), PAYLOAD)
        .unwrap();

    // Re-decode the marked bytes: one full transform/inverse pass plus the
    // 8-bit quantization of the PNG round trip has already happened.
    let plane = LumaImage::from_bytes(&marked.png).unwrap();
    let positions = block_positions(&cfg, plane.rows(), plane.cols(), 256).unwrap();
    let bits = lumark_core::payload::encode(PAYLOAD, 256).unwrap();

    let n = cfg.block_size;
    let mut samples = vec![0.0f32; n * n];
    let mut coeffs = vec![0.0f32; n * n];
    let mut worst_margin = f32::MAX;

    for (&(row, col), &bit) in positions.iter().zip(&bits) {
        plane.copy_block(row, col, n, &mut samples);
        for s in samples.iter_mut() {
            *s -= 128.0;
        }
        dct.forward(&samples, &mut coeffs);
        let value = coeffs[cfg.carrier.0 * n + cfg.carrier.1];

        if bit == 1 {
            assert!(value > cfg.threshold, "bit 1 read {} at ({row},{col})", value);
            worst_margin = worst_margin.min(value - cfg.threshold);
        } else {
            assert!(value < cfg.threshold, "bit 0 read {} at ({row},{col})", value);
            worst_margin = worst_margin.min(cfg.threshold - value);
        }
    }
    println!("worst classification margin: {worst_margin:.2}");
}

#[test]
fn marking_is_visually_subtle() {
    let wm = Watermarker::default();
    let original_img = create_test_image(640, 640);
    let marked = wm.mark_image(&to_png(&original_img), PAYLOAD).unwrap();
    let marked_img = image::load_from_memory(&marked.png).unwrap().to_rgb8();

    let mut max_delta = 0u8;
    let mut sum_delta = 0u64;
    for (orig, new) in original_img.pixels().zip(marked_img.pixels()) {
        for ch in 0..3 {
            let delta = orig.0[ch].abs_diff(new.0[ch]);
            max_delta = max_delta.max(delta);
            sum_delta += delta as u64;
        }
    }
    let mean = sum_delta as f64 / (640.0 * 640.0 * 3.0);
    println!("pixel delta: max {max_delta}, mean {mean:.3}");
    assert!(max_delta <= 32, "peak distortion too high: {max_delta}");
    assert!(mean < 1.0, "mean distortion too high: {mean:.3}");
}

// ============================================================================
// Capacity and size boundaries
// ============================================================================

#[test]
fn all_zero_payload_roundtrips_on_512() {
    // 512x512 yields 169 positions, short of 256, but the all-zero payload
    // is indistinguishable from zero fill and must still round-trip.
    let wm = Watermarker::default();
    let zero = "00".repeat(32);

    let marked = wm.mark_image(&gray_png(512, 128), &zero).unwrap();
    assert_eq!(marked.bits_embedded, 169);

    let recovered = wm.verify_image(&marked.png).unwrap();
    assert_eq!(recovered.hex, zero);
    assert_eq!(recovered.hex, ZERO_PAYLOAD);
}

#[test]
fn capacity_test_rejects_200_pixel_image() {
    let wm = Watermarker::default();
    let accepted = wm
        .test_capacity(&gray_png(200, 128), &"ff".repeat(32))
        .unwrap();
    assert!(!accepted);
}

#[test]
fn capacity_boundary_at_minimum_size() {
    // Exactly 128x128 decodes but cannot carry a full payload; the gate
    // must reject rather than silently accept an unrecoverable mark.
    let wm = Watermarker::default();
    let outcome = wm.gate(&gray_png(128, 128), &"ff".repeat(32)).unwrap();
    assert!(!outcome.accepted());
}

#[test]
fn mark_fails_fast_below_size_floor() {
    let wm = Watermarker::default();
    let err = wm.mark_image(&gray_png(64, 128), &"ff".repeat(32)).unwrap_err();
    assert!(matches!(err, WatermarkError::ImageTooSmall { .. }));
}

// ============================================================================
// Gate behavior
// ============================================================================

#[test]
fn gate_accepts_and_returns_marked_bytes() {
    let wm = Watermarker::default();
    let outcome = wm
        .gate(&to_png(&create_test_image(640, 640)), PAYLOAD)
        .unwrap();

    let marked = match outcome {
        GateOutcome::Accepted(marked) => marked,
        GateOutcome::Rejected { reason } => panic!("gate rejected: {reason}"),
    };
    assert_eq!(marked.bits_embedded, 256);

    // The returned bytes are the committed artifact; they must verify.
    let recovered = wm.verify_image(&marked.png).unwrap();
    assert_eq!(recovered.hex, PAYLOAD);
}

#[test]
fn unmarked_image_verifies_to_sentinel() {
    let wm = Watermarker::default();
    let recovered = wm.verify_image(&gray_png(640, 128)).unwrap();
    assert_eq!(recovered.hex, ZERO_PAYLOAD);
    assert!(recovered.is_sentinel());
}

// ============================================================================
// Custom geometry
// ============================================================================

#[test]
fn denser_stride_marks_smaller_images() {
    // With a tighter stride the 320x320 central region carries a full
    // payload; the default geometry needs 640 pixels for the same job.
    let cfg = CodecConfig {
        block_stride: 9,
        ..CodecConfig::default()
    };
    let wm = Watermarker::new(cfg);
    let original = to_png(&create_test_image(320, 320));

    let marked = wm.mark_image(&original, PAYLOAD).unwrap();
    assert_eq!(marked.bits_embedded, 256);
    let recovered = wm.verify_image(&marked.png).unwrap();
    assert_eq!(recovered.hex, PAYLOAD);
}
