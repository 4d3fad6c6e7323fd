//! Separable Gaussian blur.
//!
//! The 2D Gaussian is separable, so the blur runs as two 1D passes
//! (horizontal then vertical) over the same normalized kernel. Rows are
//! processed in parallel; samples past the image border clamp to the edge
//! pixel.

use rayon::prelude::*;

use crate::raster::Image;

/// Build a normalized 1D Gaussian kernel for the given radius.
///
/// The radius is interpreted as the standard deviation, with taps out to
/// three sigma. Weights sum to 1 and are symmetric about the center.
fn gaussian_kernel(radius: f32) -> Vec<f32> {
    let sigma = radius.max(0.01);
    let half = (sigma * 3.0).ceil().max(1.0) as i64;
    let denom = 2.0 * sigma * sigma;

    let mut weights: Vec<f32> = (-half..=half)
        .map(|i| (-(i * i) as f32 / denom).exp())
        .collect();
    let sum: f32 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= sum;
    }
    weights
}

/// One horizontal convolution pass with a 1D kernel, row-parallel.
fn horizontal_pass(src: &[u8], width: usize, kernel: &[f32]) -> Vec<u8> {
    let half = (kernel.len() / 2) as i64;
    let row_bytes = width * 3;

    let mut out = vec![0u8; src.len()];
    out.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            let src_row = &src[y * row_bytes..(y + 1) * row_bytes];
            for x in 0..width {
                for c in 0..3 {
                    let mut acc = 0.0f32;
                    for (k, &w) in kernel.iter().enumerate() {
                        let sx = (x as i64 + k as i64 - half).clamp(0, width as i64 - 1) as usize;
                        acc += w * src_row[sx * 3 + c] as f32;
                    }
                    out_row[x * 3 + c] = acc.clamp(0.0, 255.0).round() as u8;
                }
            }
        });
    out
}

/// One vertical convolution pass with a 1D kernel, row-parallel.
fn vertical_pass(src: &[u8], width: usize, height: usize, kernel: &[f32]) -> Vec<u8> {
    let half = (kernel.len() / 2) as i64;
    let row_bytes = width * 3;

    let mut out = vec![0u8; src.len()];
    out.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width {
                for c in 0..3 {
                    let mut acc = 0.0f32;
                    for (k, &w) in kernel.iter().enumerate() {
                        let sy = (y as i64 + k as i64 - half).clamp(0, height as i64 - 1) as usize;
                        acc += w * src[sy * row_bytes + x * 3 + c] as f32;
                    }
                    out_row[x * 3 + c] = acc.clamp(0.0, 255.0).round() as u8;
                }
            }
        });
    out
}

/// Gaussian-blur an image with the given radius.
///
/// Radius at or below zero is the identity. The dispatch layer maps
/// intensity into [1, 6] and falls back to radius 2 when no intensity is
/// supplied.
pub fn gaussian_blur(img: &Image, radius: f32) -> Image {
    let rgb = img.to_rgb();
    if radius <= 0.0 {
        return rgb;
    }
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let kernel = gaussian_kernel(radius);

    let tmp = horizontal_pass(rgb.pixels(), width, &kernel);
    let out = vertical_pass(&tmp, width, height, &kernel);
    Image::rgb_unchecked(rgb.width(), rgb.height(), out)
}
