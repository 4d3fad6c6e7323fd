//! Effect catalog and dispatch.
//!
//! The engine's single entry point is [`apply_effect`]: validate the
//! input, normalize it to RGB, look the effect up in the closed catalog
//! and run it. Unknown effect names are not an error — the normalized
//! input comes back unchanged, reproducing the legacy editor's permissive
//! behavior (which forgives client typos at the cost of masking them).

use serde::{Deserialize, Serialize};

use crate::raster::{EffectError, Image};
use crate::{blur, color, convolve, quantize, tone, vignette};

/// Solarize inversion threshold.
const SOLARIZE_THRESHOLD: u8 = 128;

/// Posterize channel depth in bits.
const POSTERIZE_BITS: u8 = 2;

/// Cartoon palette size.
const CARTOON_COLORS: usize = 8;

/// Cartoon post-quantization contrast boost.
const CARTOON_CONTRAST: f32 = 1.5;

/// The fixed effect catalog.
///
/// Serialized names are the exact identifier strings the web layer and UI
/// exchange with the engine (`edge_enhance`, not `edgeEnhance`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectId {
    Grayscale,
    Sepia,
    Blur,
    Sharpen,
    Contour,
    EdgeEnhance,
    Brightness,
    Contrast,
    Invert,
    Solarize,
    Emboss,
    Posterize,
    Cartoon,
    Vignette,
    Vintage,
    Cool,
    Warm,
    Original,
}

impl EffectId {
    /// Every catalog entry, in the order the legacy editor listed them.
    pub const ALL: [EffectId; 18] = [
        EffectId::Grayscale,
        EffectId::Sepia,
        EffectId::Blur,
        EffectId::Sharpen,
        EffectId::Contour,
        EffectId::EdgeEnhance,
        EffectId::Brightness,
        EffectId::Contrast,
        EffectId::Invert,
        EffectId::Solarize,
        EffectId::Emboss,
        EffectId::Posterize,
        EffectId::Cartoon,
        EffectId::Vignette,
        EffectId::Vintage,
        EffectId::Cool,
        EffectId::Warm,
        EffectId::Original,
    ];

    /// The catalog identifier string for this effect.
    pub fn as_str(self) -> &'static str {
        match self {
            EffectId::Grayscale => "grayscale",
            EffectId::Sepia => "sepia",
            EffectId::Blur => "blur",
            EffectId::Sharpen => "sharpen",
            EffectId::Contour => "contour",
            EffectId::EdgeEnhance => "edge_enhance",
            EffectId::Brightness => "brightness",
            EffectId::Contrast => "contrast",
            EffectId::Invert => "invert",
            EffectId::Solarize => "solarize",
            EffectId::Emboss => "emboss",
            EffectId::Posterize => "posterize",
            EffectId::Cartoon => "cartoon",
            EffectId::Vignette => "vignette",
            EffectId::Vintage => "vintage",
            EffectId::Cool => "cool",
            EffectId::Warm => "warm",
            EffectId::Original => "original",
        }
    }

    /// Look an identifier string up in the catalog.
    pub fn parse(name: &str) -> Option<EffectId> {
        EffectId::ALL.iter().copied().find(|id| id.as_str() == name)
    }
}

/// An effect application request as received from the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRequest {
    /// Requested effect identifier; unrecognized names fall back to the
    /// identity transform.
    pub effect: String,
    /// Effect strength, 0-100. Out-of-range values are clamped. Effects
    /// with a fixed-factor legacy form use that form when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<u8>,
}

impl EffectRequest {
    /// Request an effect with no intensity override.
    pub fn new(effect: impl Into<String>) -> Self {
        Self {
            effect: effect.into(),
            intensity: None,
        }
    }

    /// Request an effect at a given strength (0-100).
    pub fn with_intensity(effect: impl Into<String>, intensity: u8) -> Self {
        Self {
            effect: effect.into(),
            intensity: Some(intensity),
        }
    }
}

/// Clamp a 0-100 intensity and normalize it to [0.0, 1.0].
#[inline]
fn normalize_intensity(intensity: u8) -> f32 {
    intensity.min(100) as f32 / 100.0
}

/// Apply a named effect to an image.
///
/// The input is validated, normalized to three-channel RGB, then handed
/// to the catalog entry matching `effect`. The result always has the same
/// dimensions as the input and is always RGB. Unknown effect names return
/// the normalized input unchanged.
///
/// `intensity` (0-100, clamped) scales the parametric effects:
///
/// | effect      | with intensity `t` in [0,1] | without  |
/// |-------------|------------------------------|----------|
/// | blur        | radius `1 + 5t`              | radius 2 |
/// | sharpen     | factor `1 + 2t`              | 2.0      |
/// | brightness  | factor `0.5 + t`             | 1.5      |
/// | contrast    | factor `0.5 + t`             | 1.5      |
/// | edge_enhance| strong kernel for `t >= 0.5` | strong   |
///
/// All other effects ignore it.
///
/// # Errors
/// Returns [`EffectError::InvalidImage`] for a structurally malformed
/// input. No structurally valid image can fail.
pub fn apply_effect(img: &Image, effect: &str, intensity: Option<u8>) -> Result<Image, EffectError> {
    let rgb = img.to_rgb();
    let t = intensity.map(normalize_intensity);

    let Some(id) = EffectId::parse(effect) else {
        // Permissive fallback: unrecognized names are a no-op, not an error
        return Ok(rgb);
    };

    let result = match id {
        EffectId::Grayscale => color::grayscale(&rgb),
        EffectId::Sepia => color::sepia(&rgb),
        EffectId::Blur => blur::gaussian_blur(&rgb, t.map_or(2.0, |t| 1.0 + t * 5.0)),
        EffectId::Sharpen => convolve::sharpen(&rgb, t.map_or(2.0, |t| 1.0 + t * 2.0)),
        EffectId::Contour => convolve::contour(&rgb),
        EffectId::EdgeEnhance => convolve::edge_enhance(&rgb, t.map_or(true, |t| t >= 0.5)),
        EffectId::Brightness => color::brighten(&rgb, t.map_or(1.5, |t| 0.5 + t)),
        EffectId::Contrast => color::contrast(&rgb, t.map_or(1.5, |t| 0.5 + t)),
        EffectId::Invert => color::invert(&rgb),
        EffectId::Solarize => color::solarize(&rgb, SOLARIZE_THRESHOLD),
        EffectId::Emboss => convolve::emboss(&rgb),
        EffectId::Posterize => color::posterize(&rgb, POSTERIZE_BITS),
        EffectId::Cartoon => {
            color::contrast(&quantize::quantize(&rgb, CARTOON_COLORS), CARTOON_CONTRAST)
        }
        EffectId::Vignette => vignette::vignette(&rgb, vignette::DEFAULT_LEVEL),
        EffectId::Vintage => tone::vintage(&rgb),
        EffectId::Cool => tone::cool(&rgb),
        EffectId::Warm => tone::warm(&rgb),
        EffectId::Original => rgb,
    };
    Ok(result)
}

/// Apply an [`EffectRequest`] to an image.
pub fn apply(img: &Image, request: &EffectRequest) -> Result<Image, EffectError> {
    apply_effect(img, &request.effect, request.intensity)
}
