//! 3x3 convolution filters: sharpen, edge enhance, emboss, contour.
//!
//! All filters run through a single kernel engine with clamp-to-edge
//! sampling, so a filter is just a weight table plus a divisor and an
//! additive offset. The fixed kernels reproduce the classic filter bank
//! the legacy editor shipped with.

use rayon::prelude::*;

use crate::raster::Image;

/// A 3x3 convolution kernel.
///
/// Output for each channel is `sum(weights * samples) / scale + offset`,
/// clamped to [0,255]. Out-of-bounds samples clamp to the nearest edge
/// pixel, so dimensions are always preserved.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Kernel3 {
    pub weights: [f32; 9],
    pub scale: f32,
    pub offset: f32,
}

/// Standard edge-enhance kernel (moderate strength).
const EDGE_ENHANCE: Kernel3 = Kernel3 {
    weights: [-1.0, -1.0, -1.0, -1.0, 10.0, -1.0, -1.0, -1.0, -1.0],
    scale: 2.0,
    offset: 0.0,
};

/// Stronger edge-enhance kernel, the variant the legacy editor used by
/// default.
const EDGE_ENHANCE_MORE: Kernel3 = Kernel3 {
    weights: [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0],
    scale: 1.0,
    offset: 0.0,
};

/// Directional gradient kernel with a mid-gray offset, producing the
/// relief look.
const EMBOSS: Kernel3 = Kernel3 {
    weights: [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
    scale: 1.0,
    offset: 128.0,
};

/// Laplacian edge-detect kernel offset to white, rendering luminance
/// discontinuities as thin dark lines on a light ground.
const CONTOUR: Kernel3 = Kernel3 {
    weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
    scale: 1.0,
    offset: 255.0,
};

/// Run a 3x3 kernel over an RGB image, row-parallel.
pub(crate) fn filter3x3(img: &Image, kernel: &Kernel3) -> Image {
    let rgb = img.to_rgb();
    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    let src = rgb.pixels();
    let row_bytes = width * 3;

    let mut out = vec![0u8; src.len()];
    out.par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            for x in 0..width {
                for c in 0..3 {
                    let mut acc = 0.0f32;
                    for (k, &w) in kernel.weights.iter().enumerate() {
                        let sx = (x as i64 + (k % 3) as i64 - 1).clamp(0, width as i64 - 1) as usize;
                        let sy = (y as i64 + (k / 3) as i64 - 1).clamp(0, height as i64 - 1) as usize;
                        acc += w * src[(sy * width + sx) * 3 + c] as f32;
                    }
                    let v = acc / kernel.scale + kernel.offset;
                    out_row[x * 3 + c] = v.clamp(0.0, 255.0).round() as u8;
                }
            }
        });

    Image::rgb_unchecked(rgb.width(), rgb.height(), out)
}

/// Sharpen via unsharp masking over the 3x3 neighborhood.
///
/// Each channel moves away from its local mean: `v + (factor - 1)(v - mean)`.
/// `factor = 1.0` is the identity; the dispatch layer maps intensity into
/// [1, 3] and falls back to 2.0 when no intensity is supplied.
pub fn sharpen(img: &Image, factor: f32) -> Image {
    let amount = factor - 1.0;
    // Kernel form of v + amount * (v - box_mean(v))
    let edge = -amount / 9.0;
    let mut weights = [edge; 9];
    weights[4] = 1.0 + amount * (8.0 / 9.0);
    filter3x3(
        img,
        &Kernel3 {
            weights,
            scale: 1.0,
            offset: 0.0,
        },
    )
}

/// High-pass edge enhancement.
///
/// `strong` selects the heavier kernel; the dispatch layer picks it for
/// intensity >= 50 and when no intensity is given.
pub fn edge_enhance(img: &Image, strong: bool) -> Image {
    if strong {
        filter3x3(img, &EDGE_ENHANCE_MORE)
    } else {
        filter3x3(img, &EDGE_ENHANCE)
    }
}

/// Emboss relief effect.
pub fn emboss(img: &Image) -> Image {
    filter3x3(img, &EMBOSS)
}

/// Contour edge-detect rendering.
pub fn contour(img: &Image) -> Image {
    filter3x3(img, &CONTOUR)
}
