//! In-place transforms over a single pixel layout.
//!
//! Geometric operations are generic over [`Pixel`] and touch every channel
//! the same way. Operations that change dimensions build the complete new
//! buffer first and install it with [`Raster::replace`], so a raster is
//! never observed half-transformed.

use super::calculations::{
    MAX_PIXELS, box_average, equalization_table, normalize_quarter_turns, sample_span,
    scaled_dimensions,
};
use super::pixel::Pixel;
use super::raster::Raster;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TransformError {
    #[error("scale factor must be positive and finite, got {0}")]
    InvalidFactor(f64),
    #[error("scale factor {0} would exceed {max} pixels", max = MAX_PIXELS)]
    TooLarge(f64),
}

/// Rotate by `times` quarter turns; negative counts turn counter-clockwise.
pub fn rotate<P: Pixel>(raster: &mut Raster<P>, times: i64) {
    let turns = normalize_quarter_turns(times);
    for _ in 0..turns.unsigned_abs() {
        if turns > 0 {
            rotate_clockwise(raster);
        } else {
            rotate_counter_clockwise(raster);
        }
    }
}

fn rotate_clockwise<P: Pixel>(raster: &mut Raster<P>) {
    let (w, h) = (raster.width(), raster.height());
    let rotated = Raster::from_fn(h, w, raster.max_luminosity(), |i, j| {
        raster.get(h - 1 - j, i)
    });
    *raster = rotated;
}

fn rotate_counter_clockwise<P: Pixel>(raster: &mut Raster<P>) {
    let (w, h) = (raster.width(), raster.height());
    let rotated = Raster::from_fn(h, w, raster.max_luminosity(), |i, j| {
        raster.get(j, w - 1 - i)
    });
    *raster = rotated;
}

/// Box-filter resize by `factor`.
///
/// Each destination sample is the truncated mean of the 2×2 source
/// neighborhood spanned by `floor`/`ceil` of the back-projected
/// coordinate. When those coincide the same source pixel is counted more
/// than once; that weighting is part of the output format.
pub fn resize<P: Pixel>(raster: &mut Raster<P>, factor: f64) -> Result<(), TransformError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidFactor(factor));
    }

    let (w, h) = (raster.width(), raster.height());
    let (new_w, new_h) =
        scaled_dimensions((w, h), factor).ok_or(TransformError::TooLarge(factor))?;
    if w == 0 || h == 0 {
        raster.replace(0, 0, Vec::new());
        return Ok(());
    }

    let mut pixels = Vec::with_capacity(new_w * new_h);
    for i in 0..new_h {
        let (r1, r2) = sample_span(i, factor, h);
        for j in 0..new_w {
            let (c1, c2) = sample_span(j, factor, w);
            let corners = [
                raster.get(r1, c1),
                raster.get(r1, c2),
                raster.get(r2, c1),
                raster.get(r2, c2),
            ];
            pixels.push(P::from_fn(|c| box_average(corners.map(|p| p.channel(c)))));
        }
    }
    raster.replace(new_w, new_h, pixels);
    Ok(())
}

/// Left-right flip: column `j` swaps with `width - 1 - j`.
pub fn mirror<P: Pixel>(raster: &mut Raster<P>) {
    for row in 0..raster.height() {
        raster.row_mut(row).reverse();
    }
}

/// Photometric inversion of every channel against the luminosity ceiling.
pub fn invert<P: Pixel>(raster: &mut Raster<P>) {
    let max = raster.max_luminosity();
    for pixel in raster.pixels_mut() {
        let current = *pixel;
        *pixel = P::from_fn(|c| max.saturating_sub(current.channel(c)));
    }
}

/// Histogram-equalize one channel, leaving the others untouched.
///
/// Samples above the ceiling are counted in, and remapped through, the
/// ceiling bucket.
pub fn equalize_channel<P: Pixel>(raster: &mut Raster<P>, channel: usize) {
    let max = raster.max_luminosity();
    let bucket = |p: &P| p.channel(channel).min(max) as usize;

    let mut histogram = vec![0u32; usize::from(max) + 1];
    for pixel in raster.pixels() {
        histogram[bucket(pixel)] += 1;
    }

    let table = equalization_table(&histogram, raster.pixels().len(), max);
    for pixel in raster.pixels_mut() {
        let mapped = table[bucket(&*pixel)];
        pixel.set_channel(channel, mapped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::pixel::{Gray, LumaChroma, Rgb};
    use crate::test_helpers::{gradient_rgb, gray_raster};

    // =========================================================================
    // rotate
    // =========================================================================

    #[test]
    fn rotate_clockwise_moves_bottom_left_to_top_left() {
        // 1 2 3
        // 4 5 6
        let mut r = gray_raster(3, 2, &[1, 2, 3, 4, 5, 6]);
        rotate(&mut r, 1);
        assert_eq!((r.width(), r.height()), (2, 3));
        // 4 1
        // 5 2
        // 6 3
        assert_eq!(r, gray_raster(2, 3, &[4, 1, 5, 2, 6, 3]));
    }

    #[test]
    fn rotate_counter_clockwise_moves_top_right_to_top_left() {
        let mut r = gray_raster(3, 2, &[1, 2, 3, 4, 5, 6]);
        rotate(&mut r, -1);
        // 3 6
        // 2 5
        // 1 4
        assert_eq!(r, gray_raster(2, 3, &[3, 6, 2, 5, 1, 4]));
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let original = gradient_rgb(5, 3);
        let mut r = original.clone();
        for _ in 0..4 {
            rotate(&mut r, 1);
        }
        assert_eq!(r, original);
        rotate(&mut r, 4);
        assert_eq!(r, original);
        rotate(&mut r, 0);
        assert_eq!(r, original);
    }

    #[test]
    fn rotation_count_is_taken_mod_four() {
        let original = gradient_rgb(4, 3);
        for k in [-9i64, -6, -5, -1, 2, 5, 7, 11] {
            let mut a = original.clone();
            rotate(&mut a, k);
            let mut b = original.clone();
            rotate(&mut b, k % 4);
            assert_eq!(a, b, "k = {k}");
        }
    }

    #[test]
    fn clockwise_then_counter_clockwise_cancel() {
        let original = gradient_rgb(4, 7);
        let mut r = original.clone();
        rotate(&mut r, 3);
        rotate(&mut r, -3);
        assert_eq!(r, original);
    }

    // =========================================================================
    // resize
    // =========================================================================

    #[test]
    fn resize_identity_factor_reproduces_image() {
        let original = gradient_rgb(6, 4);
        let mut r = original.clone();
        resize(&mut r, 1.0).unwrap();
        assert_eq!(r, original);
    }

    #[test]
    fn resize_doubles_dimensions_with_box_filter() {
        // 0 100
        let mut r = gray_raster(2, 1, &[0, 100]);
        resize(&mut r, 2.0).unwrap();
        assert_eq!((r.width(), r.height()), (4, 2));
        // cols: j=0 → (0,0) 0; j=1 → (0,1) 50; j=2 → (1,1) 100; j=3 → (1,1) 100
        assert_eq!(r, gray_raster(4, 2, &[0, 50, 100, 100, 0, 50, 100, 100]));
    }

    #[test]
    fn resize_halves_by_sampling_even_cells() {
        let mut r = gray_raster(4, 2, &[10, 20, 30, 40, 50, 60, 70, 80]);
        resize(&mut r, 0.5).unwrap();
        assert_eq!(r, gray_raster(2, 1, &[10, 30]));
    }

    #[test]
    fn resize_averages_each_channel_independently() {
        let mut r = Raster::from_vec(
            2,
            1,
            235,
            vec![LumaChroma::new(16, 0, 200), LumaChroma::new(20, 100, 0)],
        )
        .unwrap();
        resize(&mut r, 2.0).unwrap();
        assert_eq!(r.get(0, 1), LumaChroma::new(18, 50, 100));
        assert_eq!(r.max_luminosity(), 235);
    }

    #[test]
    fn resize_rejects_non_positive_factor() {
        let mut r = gray_raster(2, 2, &[1, 2, 3, 4]);
        assert_eq!(resize(&mut r, 0.0), Err(TransformError::InvalidFactor(0.0)));
        assert!(resize(&mut r, -1.5).is_err());
        assert!(resize(&mut r, f64::NAN).is_err());
        assert_eq!(r, gray_raster(2, 2, &[1, 2, 3, 4]));
    }

    #[test]
    fn resize_rejects_oversized_result_untouched() {
        let mut r = gray_raster(4, 4, &[7; 16]);
        assert_eq!(resize(&mut r, 1e300), Err(TransformError::TooLarge(1e300)));
        assert_eq!(resize(&mut r, 1e9), Err(TransformError::TooLarge(1e9)));
        assert_eq!(r, gray_raster(4, 4, &[7; 16]));
    }

    #[test]
    fn resize_to_nothing_empties_grid() {
        let mut r = gray_raster(3, 3, &[0; 9]);
        resize(&mut r, 0.1).unwrap();
        assert!(r.is_empty());
        assert_eq!((r.width(), r.height()), (0, 0));
    }

    // =========================================================================
    // mirror
    // =========================================================================

    #[test]
    fn mirror_flips_columns() {
        let mut r = gray_raster(3, 2, &[1, 2, 3, 4, 5, 6]);
        mirror(&mut r);
        assert_eq!(r, gray_raster(3, 2, &[3, 2, 1, 6, 5, 4]));
    }

    #[test]
    fn mirror_is_an_involution() {
        let original = gradient_rgb(5, 4);
        let mut r = original.clone();
        mirror(&mut r);
        assert_ne!(r, original);
        mirror(&mut r);
        assert_eq!(r, original);
    }

    // =========================================================================
    // invert
    // =========================================================================

    #[test]
    fn invert_gray_against_ceiling() {
        let mut r = gray_raster(1, 1, &[10]);
        invert(&mut r);
        assert_eq!(r.get(0, 0), Gray(245));
        invert(&mut r);
        assert_eq!(r.get(0, 0), Gray(10));
    }

    #[test]
    fn invert_rgb_every_channel() {
        let mut r = Raster::from_vec(1, 1, 255, vec![Rgb::new(0, 100, 255)]).unwrap();
        invert(&mut r);
        assert_eq!(r.get(0, 0), Rgb::new(255, 155, 0));
    }

    #[test]
    fn invert_uses_stored_ceiling() {
        let mut r = Raster::from_vec(2, 1, 15, vec![Gray(0), Gray(15)]).unwrap();
        invert(&mut r);
        assert_eq!(r.pixels(), &[Gray(15), Gray(0)]);
    }

    // =========================================================================
    // equalize_channel
    // =========================================================================

    #[test]
    fn equalize_spreads_clustered_values() {
        let mut r = gray_raster(4, 1, &[0, 64, 128, 192]);
        equalize_channel(&mut r, 0);
        assert_eq!(r, gray_raster(4, 1, &[63, 127, 191, 255]));
    }

    #[test]
    fn equalize_second_pass_keeps_spread() {
        let mut r = gray_raster(4, 2, &[10, 10, 12, 12, 14, 15, 15, 16]);
        equalize_channel(&mut r, 0);
        let once = r.clone();
        equalize_channel(&mut r, 0);

        let spread = |r: &Raster<Gray>| {
            let min = r.pixels().iter().map(|p| p.0).min().unwrap();
            let max = r.pixels().iter().map(|p| p.0).max().unwrap();
            max - min
        };
        assert!(spread(&r) >= spread(&once));
        assert_eq!(r, once);
    }

    #[test]
    fn equalize_flat_image_at_ceiling_is_unchanged() {
        let mut r = gray_raster(3, 3, &[255; 9]);
        equalize_channel(&mut r, 0);
        assert_eq!(r, gray_raster(3, 3, &[255; 9]));
    }

    #[test]
    fn equalize_flat_image_lands_on_fixed_point() {
        // All mass in one bucket: CDF jumps to 1.0 there, so the single
        // value maps to the ceiling and further passes leave it alone.
        let mut r = gray_raster(2, 2, &[100; 4]);
        equalize_channel(&mut r, 0);
        assert_eq!(r, gray_raster(2, 2, &[255; 4]));
        equalize_channel(&mut r, 0);
        assert_eq!(r, gray_raster(2, 2, &[255; 4]));
    }

    #[test]
    fn equalize_luma_leaves_chroma_alone() {
        let mut r = Raster::from_vec(
            2,
            1,
            235,
            vec![LumaChroma::new(16, 90, 170), LumaChroma::new(235, 10, 20)],
        )
        .unwrap();
        equalize_channel(&mut r, 0);
        // CDF 0.5 → 117, 1.0 → 235
        assert_eq!(r.get(0, 0), LumaChroma::new(117, 90, 170));
        assert_eq!(r.get(0, 1), LumaChroma::new(235, 10, 20));
    }
}
