//! # pnm-shell
//!
//! A small command interpreter for plain-text Netpbm images. Images are
//! imported under `$handle` names, transformed in place, and exported back
//! to disk:
//!
//! ```text
//! i photo.ppm as $p
//! r $p clockwise 1
//! s $p by 0.5
//! z $p
//! e $p as small.ppm
//! q
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | Pixel types, rasters, the [`Image`](imaging::Image) sum type, transforms, and colour conversion |
//! | [`netpbm`] | `P2`/`P3` parsing and no-overwrite export |
//! | [`registry`] | Handle → image ownership |
//! | [`shell`] | Command parsing and execution |
//! | [`output`] | Status-line formatting |
//! | [`config`] | `pnm-shell.toml` loading and validation |
//!
//! # Design Decisions
//!
//! ## One Image Type, Three Layouts
//!
//! An image is grayscale, RGB, or luma-chroma (Y'UV), and a conversion
//! consumes the old layout and produces a new one. Geometry operations are
//! generic over the pixel type, so rotate, resize, and mirror behave the
//! same for every layout. Only inversion (undefined for luma-chroma) and
//! equalization (needs a luminance channel) differ per layout, and those
//! report [`Effect::Skipped`](imaging::Effect) instead of failing.
//!
//! ## Malformed Input Is Empty, Not Fatal
//!
//! A file with a recognised header but a bad body parses to a 0×0 image.
//! The interpreter refuses to register it and keeps going.
//!
//! ## Exports Never Overwrite
//!
//! Export opens with `create_new`, so an existing file is left untouched
//! and reported as an error.

pub mod config;
pub mod imaging;
pub mod netpbm;
pub mod output;
pub mod registry;
pub mod shell;

#[cfg(test)]
pub(crate) mod test_helpers;
