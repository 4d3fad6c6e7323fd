//! Core raster types for the effect pipeline.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for effect pipeline operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EffectError {
    /// The input raster is structurally malformed: zero dimensions or a
    /// pixel buffer whose length does not match the declared mode.
    #[error("invalid image ({width}x{height}, {bytes} bytes): {reason}")]
    InvalidImage {
        /// Declared width in pixels.
        width: u32,
        /// Declared height in pixels.
        height: u32,
        /// Actual pixel buffer length in bytes.
        bytes: usize,
        /// What was wrong with the raster.
        reason: &'static str,
    },
}

/// Channel layout of a raster image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Single luminance channel.
    Gray,
    /// Three channels, red/green/blue.
    #[default]
    Rgb,
    /// Four channels, red/green/blue/alpha.
    Rgba,
}

impl ColorMode {
    /// Number of byte samples per pixel for this mode.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Gray => 1,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }
}

/// A decoded raster image: dimensions, channel layout and pixel samples
/// in row-major order.
///
/// The buffer always holds exactly `width * height * channels` bytes; the
/// constructor rejects anything else, so every `Image` in circulation is
/// structurally valid. Effects never mutate an input in place — each one
/// allocates and returns a new `Image`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    mode: ColorMode,
    pixels: Vec<u8>,
}

impl Image {
    /// Create a new image, validating dimensions and buffer length.
    ///
    /// # Errors
    /// Returns [`EffectError::InvalidImage`] if either dimension is zero or
    /// `pixels.len() != width * height * mode.channels()`.
    pub fn new(width: u32, height: u32, mode: ColorMode, pixels: Vec<u8>) -> Result<Self, EffectError> {
        if width == 0 || height == 0 {
            return Err(EffectError::InvalidImage {
                width,
                height,
                bytes: pixels.len(),
                reason: "zero width or height",
            });
        }
        let expected = width as usize * height as usize * mode.channels();
        if pixels.len() != expected {
            return Err(EffectError::InvalidImage {
                width,
                height,
                bytes: pixels.len(),
                reason: "pixel buffer length does not match dimensions",
            });
        }
        Ok(Self {
            width,
            height,
            mode,
            pixels,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel layout of the pixel buffer.
    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Pixel samples in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image and return the pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Build an RGB image from an already-validated buffer.
    ///
    /// Internal shortcut for effect implementations, which always produce
    /// buffers of exactly the right size.
    pub(crate) fn rgb_unchecked(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
        Self {
            width,
            height,
            mode: ColorMode::Rgb,
            pixels,
        }
    }

    /// Convert to three-channel RGB mode.
    ///
    /// Gray pixels are broadcast to all three channels. RGBA pixels drop
    /// the alpha channel without compositing, matching the behavior of the
    /// upload pipeline this engine serves.
    pub fn to_rgb(&self) -> Image {
        match self.mode {
            ColorMode::Rgb => self.clone(),
            ColorMode::Gray => {
                let mut out = Vec::with_capacity(self.pixels.len() * 3);
                for &v in &self.pixels {
                    out.extend_from_slice(&[v, v, v]);
                }
                Image::rgb_unchecked(self.width, self.height, out)
            }
            ColorMode::Rgba => {
                let mut out = Vec::with_capacity(self.pixel_count() * 3);
                for px in self.pixels.chunks_exact(4) {
                    out.extend_from_slice(&px[..3]);
                }
                Image::rgb_unchecked(self.width, self.height, out)
            }
        }
    }

    /// Convert to single-channel grayscale using BT.601 luma weights.
    pub fn to_gray(&self) -> Image {
        let pixels = match self.mode {
            ColorMode::Gray => self.pixels.clone(),
            ColorMode::Rgb => self
                .pixels
                .chunks_exact(3)
                .map(|px| crate::luminance::luma_u8(px[0], px[1], px[2]))
                .collect(),
            ColorMode::Rgba => self
                .pixels
                .chunks_exact(4)
                .map(|px| crate::luminance::luma_u8(px[0], px[1], px[2]))
                .collect(),
        };
        Self {
            width: self.width,
            height: self.height,
            mode: ColorMode::Gray,
            pixels,
        }
    }

    /// Split an RGB image into its three single-channel planes.
    ///
    /// Returns `[red, green, blue]` byte planes, each `width * height` long.
    /// Non-RGB images are converted first.
    pub fn split_planes(&self) -> [Vec<u8>; 3] {
        let rgb = self.to_rgb();
        let n = rgb.pixel_count();
        let mut r = Vec::with_capacity(n);
        let mut g = Vec::with_capacity(n);
        let mut b = Vec::with_capacity(n);
        for px in rgb.pixels.chunks_exact(3) {
            r.push(px[0]);
            g.push(px[1]);
            b.push(px[2]);
        }
        [r, g, b]
    }

    /// Recombine three single-channel planes into an RGB image.
    ///
    /// # Errors
    /// Returns [`EffectError::InvalidImage`] if any plane length does not
    /// match `width * height`.
    pub fn merge_planes(width: u32, height: u32, planes: [Vec<u8>; 3]) -> Result<Image, EffectError> {
        let n = width as usize * height as usize;
        let [r, g, b] = planes;
        if r.len() != n || g.len() != n || b.len() != n {
            return Err(EffectError::InvalidImage {
                width,
                height,
                bytes: r.len() + g.len() + b.len(),
                reason: "plane length does not match dimensions",
            });
        }
        let mut pixels = Vec::with_capacity(n * 3);
        for i in 0..n {
            pixels.extend_from_slice(&[r[i], g[i], b[i]]);
        }
        Image::new(width, height, ColorMode::Rgb, pixels)
    }

    /// Create an RGB image from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Result<Image, EffectError> {
        let (width, height) = img.dimensions();
        Image::new(width, height, ColorMode::Rgb, img.into_raw())
    }

    /// Convert to an `image::RgbImage` for re-encoding by the caller.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        let rgb = self.to_rgb();
        image::RgbImage::from_raw(rgb.width, rgb.height, rgb.pixels)
    }
}
