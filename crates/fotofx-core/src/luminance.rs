//! Luminance calculation utilities using ITU-R BT.601 coefficients.
//!
//! The effect pipeline uses the BT.601 weights throughout (grayscale,
//! sepia, contrast pivot), matching the conversion the legacy editor
//! applied to every upload.

/// ITU-R BT.601 coefficient for red channel in luminance calculation.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel in luminance calculation.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel in luminance calculation.
pub const LUMA_B: f32 = 0.114;

/// Calculate luminance from normalized RGB values (0.0 to 1.0).
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// Calculate luminance from u8 RGB values (0 to 255), rounded.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let lum = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    lum.clamp(0.0, 255.0).round() as u8
}
