//! Plain PPM (P3): three text header lines, then whitespace-separated
//! decimal samples, R G B per pixel, row-major.
//!
//! Physical line breaks in the body carry no meaning. Only the total
//! sample count has to match the header.

pub(crate) mod decode;
pub(crate) mod encode;

use crate::error::PpmError;
use crate::grid::Grid;
use crate::limits::Limits;
use enough::Stop;

/// Format tag on the first header line.
pub const MAGIC: &str = "P3";

/// Largest max-channel-value the Netpbm family allows.
pub const MAX_MAXVAL: u32 = 65535;

/// Samples per pixel.
pub(crate) const CHANNELS: usize = 3;

/// Parsed plain PPM header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PpmHeader {
    pub width: u32,
    pub height: u32,
    pub maxval: u16,
    /// Index of the first body line (always 3: the header is three lines).
    pub body_line: usize,
    /// Byte offset of the first body line in the source text.
    pub body_offset: usize,
}

impl PpmHeader {
    /// Number of samples the body must hold (`width * height * 3`).
    pub fn expected_samples(&self) -> Result<usize, PpmError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|wh| wh.checked_mul(CHANNELS))
            .ok_or(PpmError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Parse the header, then decode the body into a grid.
pub(crate) fn decode(
    text: &str,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<(PpmHeader, Grid), PpmError> {
    let header = decode::parse_header(text)?;

    if let Some(limits) = limits {
        limits.check(header.width, header.height)?;
        let bytes = (header.width as usize)
            .saturating_mul(header.height as usize)
            .saturating_mul(core::mem::size_of::<crate::Pixel>());
        limits.check_memory(bytes)?;
    }

    stop.check()?;

    let body = text
        .get(header.body_offset..)
        .ok_or_else(|| PpmError::MalformedHeader("header offset past end of input".into()))?;
    let grid = decode::decode_body(body, &header, stop)?;
    Ok((header, grid))
}
