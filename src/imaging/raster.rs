//! Dense row-major pixel grid.

use super::pixel::Pixel;

/// A `width × height` grid of one pixel layout plus its luminosity ceiling.
///
/// `pixels.len() == width * height` always holds: every constructor checks
/// it and every transform swaps in a fully built buffer in one assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster<P: Pixel> {
    width: usize,
    height: usize,
    max_luminosity: u8,
    pixels: Vec<P>,
}

impl<P: Pixel> Raster<P> {
    /// Wrap an existing buffer. Returns `None` if the length does not match.
    pub fn from_vec(
        width: usize,
        height: usize,
        max_luminosity: u8,
        pixels: Vec<P>,
    ) -> Option<Self> {
        (width.checked_mul(height)? == pixels.len()).then_some(Self {
            width,
            height,
            max_luminosity,
            pixels,
        })
    }

    /// Build a raster by evaluating `f(row, col)` for every cell.
    pub fn from_fn(
        width: usize,
        height: usize,
        max_luminosity: u8,
        mut f: impl FnMut(usize, usize) -> P,
    ) -> Self {
        let mut pixels = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                pixels.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            max_luminosity,
            pixels,
        }
    }

    /// Zero-sized raster: what a malformed stream parses to.
    pub fn empty(max_luminosity: u8) -> Self {
        Self {
            width: 0,
            height: 0,
            max_luminosity,
            pixels: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_luminosity(&self) -> u8 {
        self.max_luminosity
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> P {
        self.pixels[row * self.width + col]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut P {
        &mut self.pixels[row * self.width + col]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [P] {
        let start = row * self.width;
        &mut self.pixels[start..start + self.width]
    }

    pub fn pixels(&self) -> &[P] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [P] {
        &mut self.pixels
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[P]> {
        // chunks(0) panics, and a zero-width raster has no samples anyway
        self.pixels.chunks(self.width.max(1))
    }

    /// Map every pixel into another layout, keeping dimensions.
    pub fn map<Q: Pixel>(&self, max_luminosity: u8, f: impl Fn(P) -> Q) -> Raster<Q> {
        Raster {
            width: self.width,
            height: self.height,
            max_luminosity,
            pixels: self.pixels.iter().map(|&p| f(p)).collect(),
        }
    }

    /// Replace the grid with a freshly built one of new dimensions.
    pub(crate) fn replace(&mut self, width: usize, height: usize, pixels: Vec<P>) {
        debug_assert_eq!(width * height, pixels.len());
        *self = Self {
            width,
            height,
            max_luminosity: self.max_luminosity,
            pixels,
        };
    }
}
