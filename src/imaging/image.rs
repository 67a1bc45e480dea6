//! The [`Image`] sum type and its variant dispatch.
//!
//! An `Image` holds exactly one raster layout. Transforms that make sense
//! for every layout (rotate, resize, mirror) dispatch to the generic code in
//! [`transform`](super::transform); inversion and equalization are defined
//! per variant and report [`Effect::Skipped`] where they do not apply.
//!
//! Changing layout is always a consuming call (`into_rgb`, `into_grayscale`,
//! `into_luma_chroma`): the old value is moved in and cannot be used again.

use super::convert::{
    GrayPolicy, SAMPLE_CEILING, gray_to_rgb, luma_chroma_to_rgb, rgb_to_gray, rgb_to_luma_chroma,
};
use super::pixel::{Gray, LumaChroma, Rgb};
use super::raster::Raster;
use super::transform::{self, TransformError};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Grayscale(Raster<Gray>),
    Rgb(Raster<Rgb>),
    LumaChroma(Raster<LumaChroma>),
}

/// Which layout an [`Image`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Grayscale,
    Rgb,
    LumaChroma,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Grayscale => "grayscale",
            Variant::Rgb => "rgb",
            Variant::LumaChroma => "luma-chroma",
        })
    }
}

/// Whether a per-variant operation changed the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Applied,
    /// The operation is defined as a no-op for this variant.
    Skipped,
}

impl Default for Image {
    fn default() -> Self {
        Image::Grayscale(Raster::empty(SAMPLE_CEILING))
    }
}

impl From<Raster<Gray>> for Image {
    fn from(r: Raster<Gray>) -> Self {
        Image::Grayscale(r)
    }
}

impl From<Raster<Rgb>> for Image {
    fn from(r: Raster<Rgb>) -> Self {
        Image::Rgb(r)
    }
}

impl From<Raster<LumaChroma>> for Image {
    fn from(r: Raster<LumaChroma>) -> Self {
        Image::LumaChroma(r)
    }
}

impl Image {
    pub fn variant(&self) -> Variant {
        match self {
            Image::Grayscale(_) => Variant::Grayscale,
            Image::Rgb(_) => Variant::Rgb,
            Image::LumaChroma(_) => Variant::LumaChroma,
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Image::Grayscale(r) => r.width(),
            Image::Rgb(r) => r.width(),
            Image::LumaChroma(r) => r.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            Image::Grayscale(r) => r.height(),
            Image::Rgb(r) => r.height(),
            Image::LumaChroma(r) => r.height(),
        }
    }

    pub fn max_luminosity(&self) -> u8 {
        match self {
            Image::Grayscale(r) => r.max_luminosity(),
            Image::Rgb(r) => r.max_luminosity(),
            Image::LumaChroma(r) => r.max_luminosity(),
        }
    }

    /// True for the zero-sized image a malformed stream produces.
    pub fn is_empty(&self) -> bool {
        match self {
            Image::Grayscale(r) => r.is_empty(),
            Image::Rgb(r) => r.is_empty(),
            Image::LumaChroma(r) => r.is_empty(),
        }
    }

    pub fn rotate(&mut self, times: i64) {
        match self {
            Image::Grayscale(r) => transform::rotate(r, times),
            Image::Rgb(r) => transform::rotate(r, times),
            Image::LumaChroma(r) => transform::rotate(r, times),
        }
    }

    pub fn resize(&mut self, factor: f64) -> Result<(), TransformError> {
        match self {
            Image::Grayscale(r) => transform::resize(r, factor),
            Image::Rgb(r) => transform::resize(r, factor),
            Image::LumaChroma(r) => transform::resize(r, factor),
        }
    }

    pub fn mirror(&mut self) {
        match self {
            Image::Grayscale(r) => transform::mirror(r),
            Image::Rgb(r) => transform::mirror(r),
            Image::LumaChroma(r) => transform::mirror(r),
        }
    }

    /// Invert brightness. A no-op for luma-chroma images.
    pub fn invert(&mut self) -> Effect {
        match self {
            Image::Grayscale(r) => transform::invert(r),
            Image::Rgb(r) => transform::invert(r),
            Image::LumaChroma(_) => return Effect::Skipped,
        }
        Effect::Applied
    }

    /// Equalize the luminance histogram. A no-op for RGB images; convert
    /// them with [`Image::into_luma_chroma`] first.
    pub fn equalize(&mut self) -> Effect {
        match self {
            Image::Grayscale(r) => transform::equalize_channel(r, 0),
            Image::LumaChroma(r) => transform::equalize_channel(r, 0),
            Image::Rgb(_) => return Effect::Skipped,
        }
        Effect::Applied
    }

    pub fn into_rgb(self) -> Raster<Rgb> {
        match self {
            Image::Grayscale(r) => gray_to_rgb(&r),
            Image::Rgb(r) => r,
            Image::LumaChroma(r) => luma_chroma_to_rgb(&r),
        }
    }

    /// Luma-chroma input goes through RGB first.
    pub fn into_grayscale(self, policy: GrayPolicy) -> Raster<Gray> {
        match self {
            Image::Grayscale(r) => r,
            other => rgb_to_gray(&other.into_rgb(), policy),
        }
    }

    /// Grayscale input goes through RGB first.
    pub fn into_luma_chroma(self) -> Raster<LumaChroma> {
        match self {
            Image::LumaChroma(r) => r,
            other => rgb_to_luma_chroma(&other.into_rgb()),
        }
    }
}
