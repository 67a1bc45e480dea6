//! Image model and transformation engine.
//!
//! | Operation | Function |
//! |---|---|
//! | **Rotate** | quarter turns, sign = direction |
//! | **Resize** | 2×2 box filter over floor/ceil source coordinates |
//! | **Mirror** | left-right flip |
//! | **Invert** | `ceiling - sample` per channel |
//! | **Equalize** | luminance histogram → CDF lookup table |
//!
//! The module is split into:
//! - **Pixel / Raster**: value types and the row-major grid
//! - **Calculations**: pure arithmetic (unit testable)
//! - **Transform**: generic in-place operations on one raster layout
//! - **Convert**: layout-to-layout colour math
//! - **Image**: the [`Image`] sum type that dispatches on layout

pub mod calculations;
pub mod convert;
mod image;
pub mod pixel;
mod raster;
pub mod transform;

pub use convert::{GrayPolicy, LUMA_CEILING, SAMPLE_CEILING};
pub use image::{Effect, Image, Variant};
pub use pixel::{Gray, LumaChroma, Pixel, Rgb};
pub use raster::Raster;
pub use transform::TransformError;
