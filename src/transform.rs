//! Per-pixel transforms.
//!
//! Every transform is a pure `Pixel -> Pixel` function of the pixel and the
//! image's maxval, so a grid is transformed by mapping each pixel
//! independently. Results that can leave `0..=maxval` (greyscale,
//! brightness) saturate at the bounds.

use enough::Stop;

use crate::error::PpmError;
use crate::grid::Grid;
use crate::pixel::{Channel, Pixel};

/// A fully parameterized transform.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    /// Each channel `c` becomes `maxval - c`.
    Invert,
    /// All channels become `floor(sqrt(r² + g² + b²))`, saturated at maxval.
    Greyscale,
    /// The given channel becomes 0; the others are kept.
    RemoveChannel(Channel),
    /// Each channel moves by `percent`% of the pixel's average brightness.
    Brightness(i32),
    /// Each channel maps by `c % 3` to 0, 3/5 of maxval, or maxval.
    ///
    /// Uncovers pictures hidden in the low-order residue of the samples.
    Reveal,
}

/// Transform choice as named by a user, before parameters are attached.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selector {
    Invert,
    Greyscale,
    RemoveRed,
    RemoveGreen,
    RemoveBlue,
    Brightness,
    Reveal,
}

impl Selector {
    /// Attach parameters. `percent` is required for [`Selector::Brightness`]
    /// and ignored otherwise.
    pub fn resolve(self, percent: Option<i32>) -> Result<Transform, PpmError> {
        Ok(match self {
            Self::Invert => Transform::Invert,
            Self::Greyscale => Transform::Greyscale,
            Self::RemoveRed => Transform::RemoveChannel(Channel::Red),
            Self::RemoveGreen => Transform::RemoveChannel(Channel::Green),
            Self::RemoveBlue => Transform::RemoveChannel(Channel::Blue),
            Self::Brightness => {
                Transform::Brightness(percent.ok_or(PpmError::MissingParameter("percent"))?)
            }
            Self::Reveal => Transform::Reveal,
        })
    }
}

impl Transform {
    /// Apply to one pixel.
    pub fn apply(self, p: Pixel, maxval: u16) -> Pixel {
        match self {
            Self::Invert => invert(p, maxval),
            Self::Greyscale => greyscale(p, maxval),
            Self::RemoveChannel(channel) => remove_channel(p, channel),
            Self::Brightness(percent) => brightness(p, percent, maxval),
            Self::Reveal => reveal(p, maxval),
        }
    }

    /// Apply to every pixel of `grid`, keeping its shape and order.
    pub fn apply_grid(self, grid: &Grid, maxval: u16, stop: impl Stop) -> Result<Grid, PpmError> {
        apply_grid(self, grid, maxval, &stop)
    }
}

pub(crate) fn apply_grid(
    transform: Transform,
    grid: &Grid,
    maxval: u16,
    stop: &dyn Stop,
) -> Result<Grid, PpmError> {
    let w = grid.width();
    let mut pixels = Vec::with_capacity(grid.pixels().len());
    for (i, &p) in grid.pixels().iter().enumerate() {
        if i % w.saturating_mul(16).max(1) == 0 {
            stop.check()?;
        }
        let out = transform.apply(p, maxval);
        if cfg!(debug_assertions) {
            check_range(out, maxval)?;
        }
        pixels.push(out);
    }
    Grid::new(pixels, w, grid.height())
}

/// Reject a pixel with any channel above `maxval`.
pub(crate) fn check_range(p: Pixel, maxval: u16) -> Result<(), PpmError> {
    match p.channels().into_iter().find(|&c| c > maxval) {
        Some(c) => Err(PpmError::ChannelOutOfRange {
            value: i64::from(c),
            maxval,
        }),
        None => Ok(()),
    }
}

/// Complement every channel against `maxval`.
///
/// Channels already above `maxval` map to 0.
pub fn invert(p: Pixel, maxval: u16) -> Pixel {
    p.map(|c| maxval.saturating_sub(c))
}

/// Grey level `floor(sqrt(r² + g² + b²))`, saturated at `maxval`.
///
/// The floor is exact (integer square root), which equals truncating the
/// floating-point root for every representable input.
pub fn greyscale(p: Pixel, maxval: u16) -> Pixel {
    let sum: u64 = p.channels().iter().map(|&c| u64::from(c) * u64::from(c)).sum();
    let g = sum.isqrt().min(u64::from(maxval));
    Pixel::gray(g as u16)
}

/// Zero one channel.
pub fn remove_channel(p: Pixel, channel: Channel) -> Pixel {
    p.with(channel, 0)
}

/// Shift every channel by `percent`% of the pixel's mean `(r + g + b) / 3`.
///
/// The mean is taken from the input pixel once and shared by all three
/// channels. Results are clamped to `0..=maxval` and truncated toward zero.
pub fn brightness(p: Pixel, percent: i32, maxval: u16) -> Pixel {
    let avg = (f64::from(p.r) + f64::from(p.g) + f64::from(p.b)) / 3.0;
    let delta = avg * (f64::from(percent) / 100.0);
    let max = f64::from(maxval);
    p.map(|c| (f64::from(c) + delta).clamp(0.0, max) as u16)
}

/// Map every channel by its residue mod 3: 0, 3/5 of maxval, maxval.
pub fn reveal(p: Pixel, maxval: u16) -> Pixel {
    let mid = (u32::from(maxval) * 3 / 5) as u16;
    p.map(|c| match c % 3 {
        0 => 0,
        1 => mid,
        _ => maxval,
    })
}
