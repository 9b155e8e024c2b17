use crate::error::PpmError;
use crate::ppm;

/// Header facts available without decoding the body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub maxval: u16,
    /// Zero-based index of the first body line.
    pub body_line: usize,
}

impl ImageInfo {
    /// Read a plain PPM header.
    pub fn from_text(text: &str) -> Result<Self, PpmError> {
        let header = ppm::decode::parse_header(text)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            maxval: header.maxval,
            body_line: header.body_line,
        })
    }

    /// Read the header from raw bytes. Non-ASCII bytes in the header fail as malformed.
    pub fn from_bytes(data: &[u8]) -> Result<Self, PpmError> {
        Self::from_text(&String::from_utf8_lossy(data))
    }

    /// Samples the body must contain.
    pub fn expected_samples(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(ppm::CHANNELS)
    }
}
