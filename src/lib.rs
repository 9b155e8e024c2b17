//! # zenplain
//!
//! Plain (ASCII, `P3`) PPM decoder, per-pixel transformer, and encoder.
//!
//! Input is parsed once into a typed [`Grid`] of RGB [`Pixel`]s. A
//! [`Transform`] maps every pixel independently. The result is written back
//! as plain PPM with dimensions taken from the grid.
//!
//! ## Format
//!
//! ```text
//! P3
//! <width> <height>
//! <maxval>
//! <width*height*3 whitespace-separated samples, R G B per pixel, row-major>
//! ```
//!
//! Body line breaks are not significant. The sample count must match the
//! header exactly; missing or extra samples are errors.
//!
//! ## Transforms
//!
//! - [`Transform::Invert`]: `c -> maxval - c`
//! - [`Transform::Greyscale`]: `floor(sqrt(r² + g² + b²))`, saturated
//! - [`Transform::RemoveChannel`]: zero one channel
//! - [`Transform::Brightness`]: shift by a percentage of the pixel mean
//! - [`Transform::Reveal`]: map samples by residue mod 3
//!
//! ## Non-Goals
//!
//! - Binary PNM variants (P5, P6, P7)
//! - Streaming or partial decoding
//! - Color management, resizing, geometric transforms
//!
//! ## Usage
//!
//! ```
//! use zenplain::{Selector, TransformRequest, Unstoppable};
//!
//! let input = b"P3\n2 1\n255\n10 20 30 40 50 60\n";
//! let transform = Selector::RemoveGreen.resolve(None)?;
//! let output = TransformRequest::new(transform).transform_bytes(input, Unstoppable)?;
//! assert_eq!(output, b"P3\n2 1\n255\n10 0 30 40 0 60\n");
//! # Ok::<(), zenplain::PpmError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod grid;
mod info;
mod limits;
mod pixel;

pub mod ppm;
pub mod transform;

mod decode;
mod pipeline;

use std::io::{Read, Write};

// Re-exports
pub use decode::{DecodeOutput, DecodeRequest};
pub use enough::{Stop, Unstoppable};
pub use error::PpmError;
pub use grid::Grid;
pub use info::ImageInfo;
pub use limits::Limits;
pub use pipeline::TransformRequest;
pub use pixel::{Channel, Pixel};
pub use ppm::PpmHeader;
pub use transform::{Selector, Transform};

/// Decode plain PPM bytes with no limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput, PpmError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a grid as plain PPM bytes.
pub fn encode_ppm(grid: &Grid, maxval: u16, stop: impl Stop) -> Result<Vec<u8>, PpmError> {
    ppm::encode::encode_grid(grid, maxval, &stop)
}

/// Read plain PPM from `source`, apply the selected transform, and write
/// the result to `sink`.
///
/// `percent` is required when `selector` is [`Selector::Brightness`].
pub fn run(
    selector: Selector,
    percent: Option<i32>,
    source: impl Read,
    sink: impl Write,
) -> Result<(), PpmError> {
    let transform = selector.resolve(percent)?;
    TransformRequest::new(transform).run(source, sink, Unstoppable)
}
