//! Plain-text Netpbm import and export.
//!
//! ## Formats
//!
//! ```text
//! P3                 P2
//! 2 2 255            2 2 255
//! 255 0 0  0 255 0   0 128
//! 0 0 255  9 9 9     255 7
//! ```
//!
//! Header token, then `width height maxValue`, then `width * height`
//! samples (triples for `P3`) in row-major order. Any run of whitespace
//! separates tokens.
//!
//! Luma-chroma images have no import format. They export under the `P3`
//! header with `Y U V` in place of `R G B` and a fixed `255` ceiling.
//!
//! ## Failure model
//!
//! A stream whose header does not match the requested variant, or whose
//! body is truncated or out of range, parses to an empty raster rather
//! than an error; callers check [`Image::is_empty`]. Export never
//! overwrites: an existing destination is [`ExportError::AlreadyExists`].

use crate::imaging::{Gray, Image, Pixel, Raster, Rgb, SAMPLE_CEILING};
use log::{debug, warn};
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const COLOR_MAGIC: &str = "P3";
const GRAY_MAGIC: &str = "P2";

/// Upper bound on up-front allocation; larger bodies grow as they parse.
const MAX_PREALLOC: usize = 1 << 20;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid file format: {0:?}")]
    UnsupportedFormat(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("File exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error("Unable to create file: {0}")]
    Io(#[from] io::Error),
}

/// Parse a `P3` stream. Anything else yields an empty raster.
pub fn parse_rgb(text: &str) -> Raster<Rgb> {
    parse_raster(text, COLOR_MAGIC).unwrap_or_else(|| {
        warn!("malformed {COLOR_MAGIC} stream");
        Raster::empty(SAMPLE_CEILING)
    })
}

/// Parse a `P2` stream. Anything else yields an empty raster.
pub fn parse_grayscale(text: &str) -> Raster<Gray> {
    parse_raster(text, GRAY_MAGIC).unwrap_or_else(|| {
        warn!("malformed {GRAY_MAGIC} stream");
        Raster::empty(SAMPLE_CEILING)
    })
}

fn parse_raster<P: Pixel>(text: &str, magic: &str) -> Option<Raster<P>> {
    let mut tokens = text.split_ascii_whitespace();
    if tokens.next()? != magic {
        return None;
    }
    let width: usize = tokens.next()?.parse().ok()?;
    let height: usize = tokens.next()?.parse().ok()?;
    let max: u8 = tokens.next()?.parse().ok()?;
    if max == 0 {
        return None;
    }

    let count = width.checked_mul(height)?;
    let mut pixels = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        let mut pixel = P::default();
        for c in 0..P::CHANNELS {
            let sample: u8 = tokens.next()?.parse().ok()?;
            if sample > max {
                return None;
            }
            pixel.set_channel(c, sample);
        }
        pixels.push(pixel);
    }
    Raster::from_vec(width, height, max, pixels)
}

/// Read a whole stream and dispatch on its header.
///
/// `P3` becomes [`Image::Rgb`], `P2` becomes [`Image::Grayscale`]; the
/// image is empty if the body is malformed. Other headers are
/// [`LoadError::UnsupportedFormat`].
pub fn load_image(mut reader: impl Read) -> Result<Image, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    let magic = text.split_ascii_whitespace().next().unwrap_or_default();
    match magic {
        COLOR_MAGIC => Ok(Image::Rgb(parse_rgb(&text))),
        GRAY_MAGIC => Ok(Image::Grayscale(parse_grayscale(&text))),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

/// Open `path` and [`load_image`] it.
pub fn load_path(path: &Path) -> Result<Image, LoadError> {
    debug!("reading {}", path.display());
    load_image(fs::File::open(path)?)
}

/// Write `image` in its export layout.
pub fn encode(image: &Image, out: &mut impl Write) -> io::Result<()> {
    match image {
        Image::Grayscale(r) => write_raster(out, GRAY_MAGIC, r.max_luminosity(), r),
        Image::Rgb(r) => write_raster(out, COLOR_MAGIC, r.max_luminosity(), r),
        Image::LumaChroma(r) => write_raster(out, COLOR_MAGIC, SAMPLE_CEILING, r),
    }
}

fn write_raster<P: Pixel>(
    out: &mut impl Write,
    magic: &str,
    ceiling: u8,
    raster: &Raster<P>,
) -> io::Result<()> {
    writeln!(out, "{magic}")?;
    writeln!(out, "{} {} {}", raster.width(), raster.height(), ceiling)?;
    for pixel in raster.pixels() {
        let samples: Vec<String> = (0..P::CHANNELS)
            .map(|c| pixel.channel(c).to_string())
            .collect();
        writeln!(out, "{}", samples.join(" "))?;
    }
    Ok(())
}

/// Export to a new file at `path`.
///
/// Fails without touching the filesystem if `path` already exists. If
/// writing fails midway the partial file is removed.
pub fn export_image(image: &Image, path: &Path) -> Result<(), ExportError> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(ExportError::AlreadyExists(path.to_path_buf()));
        }
        Err(e) => return Err(ExportError::Io(e)),
    };

    let mut writer = BufWriter::new(file);
    let written = encode(image, &mut writer).and_then(|()| writer.flush());
    if let Err(e) = written {
        drop(writer);
        let _ = fs::remove_file(path);
        return Err(ExportError::Io(e));
    }
    debug!("wrote {}", path.display());
    Ok(())
}
