//! Shared raster fixtures for unit tests.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let gray = gray_raster(2, 2, &[0, 64, 128, 255]);
//! let colour = gradient_rgb(16, 16);
//! ```

use crate::imaging::{Gray, Raster, Rgb};

/// Row-major grayscale raster with a 255 ceiling.
///
/// Panics if `samples.len() != width * height`.
pub fn gray_raster(width: usize, height: usize, samples: &[u8]) -> Raster<Gray> {
    let pixels = samples.iter().copied().map(Gray).collect();
    Raster::from_vec(width, height, 255, pixels).unwrap()
}

/// Smooth RGB gradient: red grows left to right, green top to bottom, blue
/// along the diagonal. Every sample is distinct enough to catch index
/// mix-ups in rotate and mirror.
pub fn gradient_rgb(width: usize, height: usize) -> Raster<Rgb> {
    let span = |n: usize| n.saturating_sub(1).max(1);
    Raster::from_fn(width, height, 255, |row, col| {
        Rgb::new(
            (col * 255 / span(width)) as u8,
            (row * 255 / span(height)) as u8,
            ((row + col) * 255 / (width + height).saturating_sub(2).max(1)) as u8,
        )
    })
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert every channel of two same-sized rasters differs by at most `tol`.
#[track_caller]
pub fn assert_close(a: &Raster<Rgb>, b: &Raster<Rgb>, tol: u8) {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    for (i, (p, q)) in a.pixels().iter().zip(b.pixels()).enumerate() {
        let diff = [p.r.abs_diff(q.r), p.g.abs_diff(q.g), p.b.abs_diff(q.b)];
        assert!(
            diff.iter().all(|&d| d <= tol),
            "pixel {i}: {p:?} vs {q:?} exceeds tolerance {tol}"
        );
    }
}
