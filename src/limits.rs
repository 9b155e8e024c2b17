use crate::error::PpmError;

/// Resource limits for decode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for the decoded grid.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check header dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PpmError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(PpmError::LimitExceeded(format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(PpmError::LimitExceeded(format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(PpmError::LimitExceeded(format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that a grid allocation is within memory limits.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), PpmError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(PpmError::LimitExceeded(format!(
                    "grid of {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
