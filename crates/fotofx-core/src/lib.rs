//! Fotofx Core - Image effect pipeline
//!
//! This crate implements the effect engine behind the Fotofx photo
//! editor: a pure, stateless library that takes a decoded raster image
//! plus an effect name and optional intensity, and returns a transformed
//! RGB image of the same dimensions. Decoding, encoding, storage and
//! transport all belong to the caller.
//!
//! ## Usage
//!
//! The single entry point is [`apply_effect`] (or [`apply`] with an
//! [`EffectRequest`]). The catalog of recognized effect names lives in
//! [`EffectId::ALL`]; unknown names fall back to the identity transform.
//!
//! ## Concurrency
//!
//! Every call is a pure function over its inputs with no shared state, so
//! the engine is safe to invoke from any number of threads. The heavy
//! per-pixel loops (blur, vignette, convolution) are row-parallel
//! internally via rayon.

pub mod blur;
pub mod color;
pub mod convolve;
pub mod effect;
pub mod luminance;
pub mod quantize;
pub mod raster;
pub mod tone;
pub mod vignette;

pub use effect::{apply, apply_effect, EffectId, EffectRequest};
pub use raster::{ColorMode, EffectError, Image};
