//! Vignette: radial darkening toward the image edges.
//!
//! A single-channel byte mask is synthesized from each pixel's distance to
//! the image center, then multiplied into the RGB samples. The mask never
//! leaves this module; it exists only for the duration of one call.

use rayon::prelude::*;

use crate::raster::Image;

/// Default attenuation level: corners lose 30% of their brightness.
pub const DEFAULT_LEVEL: f32 = 0.3;

/// Synthesize the radial attenuation mask.
///
/// For each pixel: Euclidean distance from the center, normalized by
/// `min(width, height) / 2` and clamped to [0,1], then
/// `255 * (1 - distance * level)` clamped to the byte range. Rows are
/// computed in parallel; this is the hottest per-pixel loop in the engine.
fn radial_mask(width: usize, height: usize, level: f32) -> Vec<u8> {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let limit = (width.min(height) as f32) / 2.0;

    let mut mask = vec![0u8; width * height];
    mask.par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            let dy = y as f32 - cy;
            for (x, m) in row.iter_mut().enumerate() {
                let dx = x as f32 - cx;
                let dist = ((dx * dx + dy * dy).sqrt() / limit).min(1.0);
                *m = (255.0 * (1.0 - dist * level)).clamp(0.0, 255.0).round() as u8;
            }
        });
    mask
}

/// Apply a vignette at the given level.
///
/// `level` is clamped to [0,1]: 0 leaves the image untouched, 1 fades the
/// corners fully to black. The result stays in three-channel mode; the
/// mask is folded into the RGB samples rather than kept as transparency.
pub fn vignette(img: &Image, level: f32) -> Image {
    let rgb = img.to_rgb();
    let level = level.clamp(0.0, 1.0);
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let mask = radial_mask(width, height, level);

    let mut pixels = rgb.into_pixels();
    pixels
        .par_chunks_exact_mut(width * 3)
        .enumerate()
        .for_each(|(y, row)| {
            let mask_row = &mask[y * width..(y + 1) * width];
            for (x, px) in row.chunks_exact_mut(3).enumerate() {
                let m = mask_row[x] as f32 / 255.0;
                for v in px.iter_mut() {
                    *v = (*v as f32 * m).round() as u8;
                }
            }
        });
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::ColorMode;

    fn white(width: u32, height: u32) -> Image {
        Image::new(
            width,
            height,
            ColorMode::Rgb,
            vec![255; width as usize * height as usize * 3],
        )
        .unwrap()
    }

    fn pixel_at(img: &Image, x: u32, y: u32) -> [u8; 3] {
        let idx = (y * img.width() + x) as usize * 3;
        let px = &img.pixels()[idx..idx + 3];
        [px[0], px[1], px[2]]
    }

    #[test]
    fn test_mask_full_at_center() {
        let mask = radial_mask(11, 11, 0.5);
        assert_eq!(mask[5 * 11 + 5], 255, "center distance is ~0");
    }

    #[test]
    fn test_mask_darkest_at_corners() {
        let mask = radial_mask(10, 10, 0.3);
        // Corner distance clamps to 1.0: 255 * (1 - 0.3) = 178.5
        assert!((mask[0] as i32 - 178).abs() <= 1, "got {}", mask[0]);
        let center = mask[5 * 10 + 5];
        assert!(mask[0] < center);
    }

    #[test]
    fn test_center_not_darker_than_corners() {
        for level in [0.1, 0.3, 0.7, 1.0] {
            let result = vignette(&white(20, 12), level);
            let center = pixel_at(&result, 10, 6)[0];
            for (x, y) in [(0, 0), (19, 0), (0, 11), (19, 11)] {
                let corner = pixel_at(&result, x, y)[0];
                assert!(
                    center >= corner,
                    "center {} should be >= corner {} at level {}",
                    center,
                    corner,
                    level
                );
            }
        }
    }

    #[test]
    fn test_level_zero_is_identity() {
        let img = white(8, 8);
        assert_eq!(vignette(&img, 0.0), img);
    }

    #[test]
    fn test_level_one_blacks_out_corners() {
        let result = vignette(&white(16, 16), 1.0);
        assert_eq!(pixel_at(&result, 0, 0), [0, 0, 0]);
        assert_eq!(pixel_at(&result, 15, 15), [0, 0, 0]);
    }

    #[test]
    fn test_out_of_range_level_is_clamped() {
        let img = white(8, 8);
        assert_eq!(vignette(&img, -2.0), vignette(&img, 0.0));
        assert_eq!(vignette(&img, 5.0), vignette(&img, 1.0));
    }

    #[test]
    fn test_preserves_dimensions_nonsquare() {
        let result = vignette(&white(30, 7), 0.3);
        assert_eq!(result.width(), 30);
        assert_eq!(result.height(), 7);
        assert_eq!(result.mode(), ColorMode::Rgb);
    }

    #[test]
    fn test_darkening_is_radially_monotonic() {
        let result = vignette(&white(21, 21), 0.8);
        // Walking right from the center, brightness never increases
        let mut prev = pixel_at(&result, 10, 10)[0];
        for x in 11..21 {
            let v = pixel_at(&result, x, 10)[0];
            assert!(v <= prev, "brightness should fall off from the center");
            prev = v;
        }
    }
}
