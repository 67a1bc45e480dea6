//! Pure calculation functions behind the image transforms.
//!
//! Nothing here touches a pixel grid; every function is plain arithmetic
//! so it can be unit tested in isolation.

/// Reduce a quarter-turn count to `-3..=3`, keeping its sign.
///
/// Positive counts turn clockwise, negative counts counter-clockwise.
///
/// ```
/// # use pnm_shell::imaging::calculations::normalize_quarter_turns;
/// assert_eq!(normalize_quarter_turns(5), 1);
/// assert_eq!(normalize_quarter_turns(-6), -2);
/// assert_eq!(normalize_quarter_turns(8), 0);
/// ```
pub fn normalize_quarter_turns(times: i64) -> i64 {
    times % 4
}

/// Largest pixel count a resize may produce.
pub const MAX_PIXELS: usize = 1 << 26;

/// Destination dimensions for a resize, truncating toward zero.
///
/// Returns `None` when the result would exceed [`MAX_PIXELS`].
///
/// # Arguments
/// * `source` - Original dimensions (width, height)
/// * `factor` - Scale factor, expected to be positive and finite
pub fn scaled_dimensions(source: (usize, usize), factor: f64) -> Option<(usize, usize)> {
    let scale = |n: usize| {
        let scaled = (n as f64 * factor).trunc();
        (scaled.is_finite() && scaled <= MAX_PIXELS as f64).then_some(scaled as usize)
    };
    let (w, h) = (scale(source.0)?, scale(source.1)?);
    w.checked_mul(h).filter(|&count| count <= MAX_PIXELS)?;
    Some((w, h))
}

/// Source coordinates sampled for destination index `dest`.
///
/// Returns `(floor(dest / factor), ceil(dest / factor))`, each clamped to
/// the last valid source index. The pair may coincide, in which case the
/// same source sample is counted twice by [`box_average`].
pub fn sample_span(dest: usize, factor: f64, source_len: usize) -> (usize, usize) {
    let last = source_len.saturating_sub(1);
    let pos = dest as f64 / factor;
    let lo = (pos.floor() as usize).min(last);
    let hi = (pos.ceil() as usize).min(last);
    (lo, hi)
}

/// Unweighted integer mean of the four neighborhood samples.
pub fn box_average(samples: [u8; 4]) -> u8 {
    let sum: u32 = samples.iter().map(|&s| u32::from(s)).sum();
    (sum / 4) as u8
}

/// Histogram-equalization lookup table of size `max + 1`.
///
/// `histogram[v]` is the pixel count at luminance `v`; `total` is
/// `width * height`. Each bucket becomes a probability `count / total`,
/// the CDF is the running sum of those probabilities, and each entry is
/// `CDF(v) * max`, truncated. Summing rounded probabilities can leave the
/// CDF just under `1.0`, so the top of the table may sit one below `max`.
pub fn equalization_table(histogram: &[u32], total: usize, max: u8) -> Vec<u8> {
    let len = usize::from(max) + 1;
    if total == 0 {
        return (0..len).map(|v| v as u8).collect();
    }

    let mut cdf = 0.0_f64;
    let mut table = Vec::with_capacity(len);
    for v in 0..len {
        let count = histogram.get(v).copied().unwrap_or(0);
        cdf += f64::from(count) / total as f64;
        table.push((cdf * f64::from(max)) as u8);
    }
    table
}

/// Perceptual luma, `0.3R + 0.59G + 0.11B`, truncated.
pub fn perceptual_luma(r: u8, g: u8, b: u8) -> u8 {
    (f64::from(r) * 0.3 + f64::from(g) * 0.59 + f64::from(b) * 0.11) as u8
}

/// Forward BT.601 integer transform: RGB → (Y, U, V).
///
/// Each result is cast to 8 bits without clamping; for 8-bit inputs Y
/// stays in 16–235 and U/V in 16–240.
pub fn rgb_to_yuv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (r, g, b) = (i32::from(r), i32::from(g), i32::from(b));
    let y = ((66 * r + 129 * g + 25 * b + 128) >> 8) + 16;
    let u = ((-38 * r - 74 * g + 112 * b + 128) >> 8) + 128;
    let v = ((112 * r - 94 * g - 18 * b + 128) >> 8) + 128;
    (y as u8, u as u8, v as u8)
}

/// Inverse BT.601 integer transform: (Y, U, V) → RGB, clamped to 0–255.
pub fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let c = i32::from(y) - 16;
    let d = i32::from(u) - 128;
    let e = i32::from(v) - 128;
    let r = (298 * c + 409 * e + 128) >> 8;
    let g = (298 * c - 100 * d - 208 * e + 128) >> 8;
    let b = (298 * c + 516 * d + 128) >> 8;
    (clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

fn clamp_u8(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
