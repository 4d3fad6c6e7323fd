//! Median-cut color quantization, used by the cartoon effect.

use std::collections::HashMap;

use crate::raster::Image;

/// A box of unique colors with their populations.
struct ColorBox {
    colors: Vec<([u8; 3], u32)>,
}

impl ColorBox {
    /// Widest channel range in the box and which channel it is.
    fn widest_channel(&self) -> (usize, u8) {
        let mut best = (0, 0u8);
        for c in 0..3 {
            let min = self.colors.iter().map(|(px, _)| px[c]).min().unwrap_or(0);
            let max = self.colors.iter().map(|(px, _)| px[c]).max().unwrap_or(0);
            let range = max - min;
            if range > best.1 {
                best = (c, range);
            }
        }
        best
    }

    /// Split at the population median along the widest channel.
    fn split(mut self) -> (ColorBox, ColorBox) {
        let (channel, _) = self.widest_channel();
        self.colors.sort_unstable_by_key(|(px, _)| px[channel]);

        let total: u64 = self.colors.iter().map(|(_, n)| *n as u64).sum();
        let mut seen = 0u64;
        let mut cut = self.colors.len() / 2;
        for (i, (_, n)) in self.colors.iter().enumerate() {
            seen += *n as u64;
            if seen * 2 >= total {
                cut = i + 1;
                break;
            }
        }
        // Both halves must be non-empty
        let cut = cut.clamp(1, self.colors.len() - 1);

        let right = self.colors.split_off(cut);
        (self, ColorBox { colors: right })
    }

    /// Population-weighted mean color of the box.
    fn mean_color(&self) -> [u8; 3] {
        let total: u64 = self.colors.iter().map(|(_, n)| *n as u64).sum();
        if total == 0 {
            return [0, 0, 0];
        }
        let mut acc = [0u64; 3];
        for (px, n) in &self.colors {
            for c in 0..3 {
                acc[c] += px[c] as u64 * *n as u64;
            }
        }
        [
            (acc[0] / total) as u8,
            (acc[1] / total) as u8,
            (acc[2] / total) as u8,
        ]
    }
}

/// Quantize an image's palette to at most `colors` colors via median cut.
///
/// Every pixel is remapped to the population-weighted mean of the box its
/// color lands in. Images that already use `colors` or fewer distinct
/// colors come back unchanged.
pub fn quantize(img: &Image, colors: usize) -> Image {
    let rgb = img.to_rgb();
    let colors = colors.max(1);

    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    for px in rgb.pixels().chunks_exact(3) {
        *counts.entry([px[0], px[1], px[2]]).or_insert(0) += 1;
    }
    if counts.len() <= colors {
        return rgb;
    }

    let mut boxes = vec![ColorBox {
        colors: counts.into_iter().collect(),
    }];
    while boxes.len() < colors {
        // Split the box with the widest channel range
        let candidate = boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.colors.len() > 1)
            .max_by_key(|(_, b)| b.widest_channel().1);
        let Some((idx, _)) = candidate else {
            break;
        };
        let (left, right) = boxes.swap_remove(idx).split();
        boxes.push(left);
        boxes.push(right);
    }

    // Map every unique color to its box's representative
    let mut palette_map: HashMap<[u8; 3], [u8; 3]> = HashMap::new();
    for b in &boxes {
        let rep = b.mean_color();
        for (px, _) in &b.colors {
            palette_map.insert(*px, rep);
        }
    }

    let mut pixels = rgb.into_pixels();
    for px in pixels.chunks_exact_mut(3) {
        let rep = palette_map[&[px[0], px[1], px[2]]];
        px.copy_from_slice(&rep);
    }
    Image::rgb_unchecked(img.width(), img.height(), pixels)
}
