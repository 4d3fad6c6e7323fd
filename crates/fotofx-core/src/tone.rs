//! Tone recipes: vintage, cool and warm.
//!
//! Each recipe splits the image into its three channel planes, applies a
//! fixed brightness/contrast enhancement per plane, and merges the planes
//! back in the original order. The coefficients are part of the recipe —
//! no intensity parameter.

use crate::raster::Image;

#[inline]
fn clamp_u8(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Scale a single plane's brightness by `factor`, in place.
fn plane_brighten(plane: &mut [u8], factor: f32) {
    for v in plane.iter_mut() {
        *v = clamp_u8(*v as f32 * factor);
    }
}

/// Scale a single plane's contrast by `factor` around the plane's own
/// mean, in place.
fn plane_contrast(plane: &mut [u8], factor: f32) {
    if plane.is_empty() {
        return;
    }
    let mean = (plane.iter().map(|&v| v as u64).sum::<u64>() as f64 / plane.len() as f64) as f32;
    for v in plane.iter_mut() {
        *v = clamp_u8(mean + (*v as f32 - mean) * factor);
    }
}

/// Vintage recipe: warm faded look.
///
/// R: contrast x1.1 then brightness x1.1; G: contrast x0.9 then
/// brightness x0.9; B: contrast x0.9 then brightness x0.8.
pub fn vintage(img: &Image) -> Image {
    let [mut r, mut g, mut b] = img.split_planes();
    plane_contrast(&mut r, 1.1);
    plane_brighten(&mut r, 1.1);
    plane_contrast(&mut g, 0.9);
    plane_brighten(&mut g, 0.9);
    plane_contrast(&mut b, 0.9);
    plane_brighten(&mut b, 0.8);
    // Plane lengths are untouched, merge cannot fail
    Image::merge_planes(img.width(), img.height(), [r, g, b])
        .unwrap_or_else(|_| img.to_rgb())
}

/// Cool recipe: blue brightness x1.2, red and green unchanged.
pub fn cool(img: &Image) -> Image {
    let [r, g, mut b] = img.split_planes();
    plane_brighten(&mut b, 1.2);
    Image::merge_planes(img.width(), img.height(), [r, g, b])
        .unwrap_or_else(|_| img.to_rgb())
}

/// Warm recipe: red brightness x1.2, green brightness x1.1, blue
/// unchanged.
pub fn warm(img: &Image) -> Image {
    let [mut r, mut g, b] = img.split_planes();
    plane_brighten(&mut r, 1.2);
    plane_brighten(&mut g, 1.1);
    Image::merge_planes(img.width(), img.height(), [r, g, b])
        .unwrap_or_else(|_| img.to_rgb())
}
