//! Per-pixel color-space transforms.
//!
//! Every function here is a pure transform: it takes the input image by
//! reference and returns a newly allocated RGB result of the same
//! dimensions. Arithmetic that leaves the [0,255] channel range is always
//! clamped, never treated as an error.

use crate::luminance::luma_u8;
use crate::raster::Image;

/// Fixed sepia tint coefficients applied to the gray value, one per output
/// channel. Clamped to 255 after scaling.
const SEPIA_R: f32 = 1.07;
const SEPIA_G: f32 = 0.74;
const SEPIA_B: f32 = 0.43;

#[inline]
fn clamp_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Convert to grayscale, keeping three-channel mode.
///
/// BT.601 luma is computed per pixel and broadcast to all three channels,
/// so the result renders as gray but stays RGB for the caller.
pub fn grayscale(img: &Image) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    for px in pixels.chunks_exact_mut(3) {
        let y = luma_u8(px[0], px[1], px[2]);
        px.copy_from_slice(&[y, y, y]);
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Apply a sepia tone.
///
/// Grayscale-first strategy: each pixel collapses to its luma, then the
/// gray value is scaled by the fixed per-channel tint coefficients.
pub fn sepia(img: &Image) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    for px in pixels.chunks_exact_mut(3) {
        let gray = luma_u8(px[0], px[1], px[2]) as f32;
        px[0] = clamp_u8(gray * SEPIA_R);
        px[1] = clamp_u8(gray * SEPIA_G);
        px[2] = clamp_u8(gray * SEPIA_B);
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Invert every channel: `255 - v`. Self-inverse.
pub fn invert(img: &Image) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    for v in pixels.iter_mut() {
        *v = 255 - *v;
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Scale brightness by `factor`.
///
/// `factor = 0.0` yields black, `1.0` is the identity, values above 1.0
/// brighten toward white (clamped).
pub fn brighten(img: &Image, factor: f32) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    for v in pixels.iter_mut() {
        *v = clamp_u8(*v as f32 * factor);
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Scale contrast by `factor` around the image's mean luma.
///
/// Deviation from the mean gray value is multiplied by `factor`:
/// `1.0` is the identity, below 1.0 flattens toward the mean, above 1.0
/// pushes values apart.
pub fn contrast(img: &Image, factor: f32) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    let mean = mean_luma(&pixels);
    for v in pixels.iter_mut() {
        *v = clamp_u8(mean + (*v as f32 - mean) * factor);
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Scale color saturation by `factor`.
///
/// Each pixel is blended away from its own luma: `0.0` fully desaturates
/// to gray, `1.0` is the identity, larger values intensify color.
pub fn saturate(img: &Image, factor: f32) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    for px in pixels.chunks_exact_mut(3) {
        let gray = luma_u8(px[0], px[1], px[2]) as f32;
        for v in px.iter_mut() {
            *v = clamp_u8(gray + (*v as f32 - gray) * factor);
        }
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Solarize: invert all channel values at or above `threshold`.
pub fn solarize(img: &Image, threshold: u8) -> Image {
    let mut pixels = img.to_rgb().into_pixels();
    for v in pixels.iter_mut() {
        if *v >= threshold {
            *v = 255 - *v;
        }
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Posterize: reduce each channel to `2^bits` levels evenly spaced over
/// [0,255]. `bits` is clamped to 1..=8; 8 bits is the identity.
pub fn posterize(img: &Image, bits: u8) -> Image {
    let bits = bits.clamp(1, 8);
    if bits == 8 {
        return img.to_rgb();
    }
    let levels = (1u32 << bits) - 1;
    let step = 255.0 / levels as f32;
    let mut pixels = img.to_rgb().into_pixels();
    for v in pixels.iter_mut() {
        let level = (*v as f32 / step).round();
        *v = clamp_u8(level * step);
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

/// Mean BT.601 luma over an RGB buffer, as f32.
fn mean_luma(pixels: &[u8]) -> f32 {
    if pixels.is_empty() {
        return 0.0;
    }
    let sum: f64 = pixels
        .chunks_exact(3)
        .map(|px| luma_u8(px[0], px[1], px[2]) as f64)
        .sum();
    (sum / (pixels.len() / 3) as f64) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorMode;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Image {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Image::new(width, height, ColorMode::Rgb, pixels).unwrap()
    }

    // ===== Grayscale =====

    #[test]
    fn test_grayscale_channels_equal() {
        let img = Image::new(2, 2, ColorMode::Rgb, vec![10, 200, 30, 0, 255, 0, 5, 5, 5, 90, 1, 250]).unwrap();
        let result = grayscale(&img);
        for px in result.pixels().chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_grayscale_stays_rgb() {
        let result = grayscale(&solid(3, 3, [255, 0, 0]));
        assert_eq!(result.mode(), ColorMode::Rgb);
        assert_eq!(result.pixels()[0], 76);
    }

    // ===== Sepia =====

    #[test]
    fn test_sepia_golden_pure_red() {
        // gray = round(0.299 * 255) = 76
        // (round(76 * 1.07), round(76 * 0.74), round(76 * 0.43)) = (81, 56, 33)
        let result = sepia(&solid(100, 100, [255, 0, 0]));
        for px in result.pixels().chunks_exact(3) {
            assert_eq!(px, &[81, 56, 33]);
        }
    }

    #[test]
    fn test_sepia_clamps_bright_red_channel() {
        // White: gray = 255, 255 * 1.07 clamps to 255
        let result = sepia(&solid(1, 1, [255, 255, 255]));
        assert_eq!(result.pixels(), &[255, 189, 110]);
    }

    #[test]
    fn test_sepia_black_stays_black() {
        let result = sepia(&solid(2, 2, [0, 0, 0]));
        assert!(result.pixels().iter().all(|&v| v == 0));
    }

    // ===== Invert =====

    #[test]
    fn test_invert_values() {
        let img = Image::new(1, 1, ColorMode::Rgb, vec![0, 128, 255]).unwrap();
        assert_eq!(invert(&img).pixels(), &[255, 127, 0]);
    }

    #[test]
    fn test_invert_is_self_inverse() {
        let img = Image::new(2, 2, ColorMode::Rgb, vec![3, 141, 59, 26, 53, 58, 97, 93, 238, 46, 26, 43]).unwrap();
        assert_eq!(invert(&invert(&img)), img);
    }

    // ===== Brightness =====

    #[test]
    fn test_brighten_identity() {
        let img = solid(2, 2, [10, 100, 200]);
        assert_eq!(brighten(&img, 1.0), img);
    }

    #[test]
    fn test_brighten_zero_is_black() {
        let result = brighten(&solid(2, 2, [10, 100, 200]), 0.0);
        assert!(result.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_brighten_clamps_at_white() {
        let result = brighten(&solid(1, 1, [200, 200, 200]), 1.5);
        assert_eq!(result.pixels(), &[255, 255, 255]);
    }

    // ===== Contrast =====

    #[test]
    fn test_contrast_identity() {
        let img = Image::new(2, 1, ColorMode::Rgb, vec![10, 100, 200, 90, 14, 3]).unwrap();
        assert_eq!(contrast(&img, 1.0), img);
    }

    #[test]
    fn test_contrast_boost_spreads_values() {
        // Two gray pixels, one dark one bright; boosting contrast should
        // push them further apart.
        let img = Image::new(2, 1, ColorMode::Rgb, vec![80, 80, 80, 180, 180, 180]).unwrap();
        let result = contrast(&img, 1.5);
        assert!(result.pixels()[0] < 80, "dark pixel should get darker");
        assert!(result.pixels()[3] > 180, "bright pixel should get brighter");
    }

    #[test]
    fn test_contrast_reduce_flattens_toward_mean() {
        let img = Image::new(2, 1, ColorMode::Rgb, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let result = contrast(&img, 0.5);
        assert!(result.pixels()[0] > 0);
        assert!(result.pixels()[3] < 255);
    }

    // ===== Saturation =====

    #[test]
    fn test_saturate_zero_is_grayscale() {
        let result = saturate(&solid(2, 2, [200, 128, 100]), 0.0);
        for px in result.pixels().chunks_exact(3) {
            assert_eq!(px[0], px[1]);
            assert_eq!(px[1], px[2]);
        }
    }

    #[test]
    fn test_saturate_identity() {
        let img = solid(2, 2, [200, 128, 100]);
        assert_eq!(saturate(&img, 1.0), img);
    }

    #[test]
    fn test_saturate_boost_increases_spread() {
        let result = saturate(&solid(1, 1, [200, 128, 100]), 1.5);
        let px = result.pixels();
        assert!(px[0] as i32 - px[2] as i32 > 100);
    }

    // ===== Solarize =====

    #[test]
    fn test_solarize_inverts_above_threshold() {
        let img = Image::new(1, 1, ColorMode::Rgb, vec![127, 128, 255]).unwrap();
        let result = solarize(&img, 128);
        assert_eq!(result.pixels(), &[127, 127, 0]);
    }

    #[test]
    fn test_solarize_leaves_dark_values() {
        let img = solid(2, 2, [10, 64, 100]);
        assert_eq!(solarize(&img, 128), img);
    }

    // ===== Posterize =====

    #[test]
    fn test_posterize_one_bit_two_levels() {
        let img = Image::new(2, 2, ColorMode::Rgb, vec![0, 30, 127, 128, 200, 255, 64, 191, 192, 1, 254, 100]).unwrap();
        let result = posterize(&img, 1);
        for &v in result.pixels() {
            assert!(v == 0 || v == 255, "expected 0 or 255, got {}", v);
        }
    }

    #[test]
    fn test_posterize_default_bits_level_count() {
        // 2 bits: 4 evenly spaced levels 0, 85, 170, 255
        let img = Image::new(2, 2, ColorMode::Rgb, (0..12).map(|i| (i * 23) as u8).collect()).unwrap();
        let result = posterize(&img, 2);
        for &v in result.pixels() {
            assert!(
                [0, 85, 170, 255].contains(&v),
                "expected a quantized level, got {}",
                v
            );
        }
    }

    #[test]
    fn test_posterize_eight_bits_identity() {
        let img = solid(3, 3, [13, 77, 201]);
        assert_eq!(posterize(&img, 8), img);
    }

    #[test]
    fn test_posterize_preserves_extremes() {
        let img = Image::new(2, 1, ColorMode::Rgb, vec![0, 0, 0, 255, 255, 255]).unwrap();
        let result = posterize(&img, 3);
        assert_eq!(&result.pixels()[..3], &[0, 0, 0]);
        assert_eq!(&result.pixels()[3..], &[255, 255, 255]);
    }
}
