//! Pixel value types.
//!
//! Three fixed-size sample layouts share one channel-access trait so the
//! geometric transforms can be written once:
//!
//! | Type | Channels | Range |
//! |---|---|---|
//! | [`Gray`] | 1 | 0–255 |
//! | [`Rgb`] | 3 | 0–255 each |
//! | [`LumaChroma`] | 3 | Y 16–235, U/V 0–255 |

/// Channel access shared by every pixel layout.
///
/// `CHANNELS` is fixed per type; `channel`/`set_channel` index into
/// `0..CHANNELS` and panic outside it, like slice indexing.
pub trait Pixel: Copy + Default + PartialEq + std::fmt::Debug {
    const CHANNELS: usize;

    fn channel(&self, index: usize) -> u8;

    fn set_channel(&mut self, index: usize, value: u8);

    /// Build a pixel by evaluating `f` once per channel.
    fn from_fn(mut f: impl FnMut(usize) -> u8) -> Self {
        let mut pixel = Self::default();
        for c in 0..Self::CHANNELS {
            pixel.set_channel(c, f(c));
        }
        pixel
    }
}

/// Single-sample grayscale pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Gray(pub u8);

impl Gray {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl Pixel for Gray {
    const CHANNELS: usize = 1;

    fn channel(&self, index: usize) -> u8 {
        match index {
            0 => self.0,
            _ => panic!("gray pixel has no channel {index}"),
        }
    }

    fn set_channel(&mut self, index: usize, value: u8) {
        match index {
            0 => self.0 = value,
            _ => panic!("gray pixel has no channel {index}"),
        }
    }
}

/// Full-colour pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl Pixel for Rgb {
    const CHANNELS: usize = 3;

    fn channel(&self, index: usize) -> u8 {
        match index {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => panic!("rgb pixel has no channel {index}"),
        }
    }

    fn set_channel(&mut self, index: usize, value: u8) {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            2 => self.b = value,
            _ => panic!("rgb pixel has no channel {index}"),
        }
    }
}

/// Luma/chroma pixel: brightness `y` plus colour differences `u` and `v`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LumaChroma {
    pub y: u8,
    pub u: u8,
    pub v: u8,
}

impl LumaChroma {
    pub fn new(y: u8, u: u8, v: u8) -> Self {
        Self { y, u, v }
    }
}

impl Pixel for LumaChroma {
    const CHANNELS: usize = 3;

    fn channel(&self, index: usize) -> u8 {
        match index {
            0 => self.y,
            1 => self.u,
            2 => self.v,
            _ => panic!("luma-chroma pixel has no channel {index}"),
        }
    }

    fn set_channel(&mut self, index: usize, value: u8) {
        match index {
            0 => self.y = value,
            1 => self.u = value,
            2 => self.v = value,
            _ => panic!("luma-chroma pixel has no channel {index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_channels_are_ordered_r_g_b() {
        let p = Rgb::new(1, 2, 3);
        assert_eq!(
            (p.channel(0), p.channel(1), p.channel(2)),
            (1, 2, 3)
        );
    }

    #[test]
    fn from_fn_fills_every_channel() {
        let p = LumaChroma::from_fn(|c| (c as u8 + 1) * 10);
        assert_eq!(p, LumaChroma::new(10, 20, 30));
        assert_eq!(Gray::from_fn(|_| 7), Gray(7));
    }

    #[test]
    fn set_channel_overwrites_only_target() {
        let mut p = Rgb::new(5, 5, 5);
        p.set_channel(1, 200);
        assert_eq!(p, Rgb::new(5, 200, 5));
    }

    #[test]
    #[should_panic(expected = "no channel 1")]
    fn gray_rejects_out_of_range_channel() {
        Gray(0).channel(1);
    }
}
