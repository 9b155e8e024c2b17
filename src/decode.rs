use std::borrow::Cow;

use enough::Stop;

use crate::error::PpmError;
use crate::grid::Grid;
use crate::limits::Limits;
use crate::ppm::{self, PpmHeader};

/// Decoded image: the parsed header and the pixel grid.
#[derive(Clone, Debug)]
pub struct DecodeOutput {
    header: PpmHeader,
    grid: Grid,
}

impl DecodeOutput {
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn maxval(&self) -> u16 {
        self.header.maxval
    }

    pub fn header(&self) -> &PpmHeader {
        &self.header
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Builder for decoding plain PPM input.
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: Cow<'a, str>,
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    /// Decode from raw bytes.
    ///
    /// Invalid UTF-8 is replaced before parsing, so stray bytes surface as
    /// a malformed header or an invalid sample rather than a separate error.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data: String::from_utf8_lossy(data),
            limits: None,
        }
    }

    /// Decode from text.
    pub fn from_text(text: &'a str) -> Self {
        Self {
            data: Cow::Borrowed(text),
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn decode(&self, stop: impl Stop) -> Result<DecodeOutput, PpmError> {
        self.decode_dyn(&stop)
    }

    pub(crate) fn decode_dyn(&self, stop: &dyn Stop) -> Result<DecodeOutput, PpmError> {
        let (header, grid) = ppm::decode(&self.data, self.limits, stop)?;
        Ok(DecodeOutput { header, grid })
    }
}
