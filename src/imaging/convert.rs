//! Conversions between pixel layouts.
//!
//! Every function borrows its source and returns a brand-new raster; the
//! consuming wrappers on [`Image`](super::Image) decide when the source is
//! dropped.
//!
//! | From → To | Rule | Ceiling |
//! |---|---|---|
//! | RGB → Gray | [`GrayPolicy`] | source ceiling |
//! | RGB → LumaChroma | BT.601 integer forward | 235 |
//! | LumaChroma → RGB | BT.601 integer inverse, clamped | 255 |
//! | Gray → RGB | replicate sample | source ceiling |

use super::calculations::{perceptual_luma, rgb_to_yuv, yuv_to_rgb};
use super::pixel::{Gray, LumaChroma, Rgb};
use super::raster::Raster;
use serde::{Deserialize, Serialize};

/// Ceiling of the luma channel in a luma-chroma raster.
pub const LUMA_CEILING: u8 = 235;

/// Ceiling of every channel in 8-bit colour and grayscale.
pub const SAMPLE_CEILING: u8 = 255;

/// How an RGB pixel collapses to a single gray sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrayPolicy {
    /// `0.3R + 0.59G + 0.11B`, truncated.
    #[default]
    Luma,
    /// Keep the red channel only.
    Red,
}

impl GrayPolicy {
    pub fn apply(self, p: Rgb) -> Gray {
        match self {
            GrayPolicy::Luma => Gray(perceptual_luma(p.r, p.g, p.b)),
            GrayPolicy::Red => Gray(p.r),
        }
    }
}

pub fn rgb_to_gray(src: &Raster<Rgb>, policy: GrayPolicy) -> Raster<Gray> {
    src.map(src.max_luminosity(), |p| policy.apply(p))
}

pub fn rgb_to_luma_chroma(src: &Raster<Rgb>) -> Raster<LumaChroma> {
    src.map(LUMA_CEILING, |p| {
        let (y, u, v) = rgb_to_yuv(p.r, p.g, p.b);
        LumaChroma::new(y, u, v)
    })
}

pub fn luma_chroma_to_rgb(src: &Raster<LumaChroma>) -> Raster<Rgb> {
    src.map(SAMPLE_CEILING, |p| {
        let (r, g, b) = yuv_to_rgb(p.y, p.u, p.v);
        Rgb::new(r, g, b)
    })
}

pub fn gray_to_rgb(src: &Raster<Gray>) -> Raster<Rgb> {
    src.map(src.max_luminosity(), |Gray(v)| Rgb::new(v, v, v))
}
