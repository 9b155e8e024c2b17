use enough::StopReason;

/// Errors from plain PPM decoding, transforming, and encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PpmError {
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    #[error("truncated pixel data: expected {expected} samples, got {actual}")]
    TruncatedData { expected: usize, actual: usize },

    #[error("trailing pixel data: expected {expected} samples, got {actual}")]
    TrailingData { expected: usize, actual: usize },

    #[error("invalid sample {token:?} at position {index}")]
    InvalidSample { index: usize, token: String },

    #[error("channel value {value} outside 0..={maxval}")]
    ChannelOutOfRange { value: i64, maxval: u16 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("missing transform parameter: {0}")]
    MissingParameter(&'static str),

    #[error("rows have unequal lengths")]
    RaggedRows,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PpmError {
    fn from(r: StopReason) -> Self {
        PpmError::Cancelled(r)
    }
}
