//! Decode, transform, and encode in one pass.
//!
//! The whole output is produced in memory before anything is written, so a
//! failed run never leaves partial output behind.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use enough::Stop;
use tracing::{debug, info};

use crate::decode::DecodeRequest;
use crate::error::PpmError;
use crate::limits::Limits;
use crate::ppm::encode::encode_grid;
use crate::transform::{self, Transform};

/// One transform run over plain PPM input.
#[derive(Clone, Debug)]
pub struct TransformRequest<'a> {
    transform: Transform,
    limits: Option<&'a Limits>,
}

impl<'a> TransformRequest<'a> {
    pub fn new(transform: Transform) -> Self {
        Self {
            transform,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Transform PPM bytes into new PPM bytes.
    pub fn transform_bytes(&self, input: &[u8], stop: impl Stop) -> Result<Vec<u8>, PpmError> {
        self.transform_dyn(input, &stop)
    }

    /// Read all of `source`, transform it, and write the result to `sink`.
    ///
    /// Nothing is written to `sink` unless decoding and transforming
    /// succeeded.
    pub fn run(
        &self,
        mut source: impl Read,
        mut sink: impl Write,
        stop: impl Stop,
    ) -> Result<(), PpmError> {
        let mut input = Vec::new();
        source.read_to_end(&mut input)?;
        let output = self.transform_dyn(&input, &stop)?;
        sink.write_all(&output)?;
        sink.flush()?;
        Ok(())
    }

    /// Transform the file at `input` into the file at `output`.
    ///
    /// The result is written to a temporary file next to `output` and only
    /// renamed into place once complete. An existing `output` is replaced.
    pub fn run_files(
        &self,
        input: &Path,
        output: &Path,
        stop: impl Stop,
    ) -> Result<(), PpmError> {
        let data = fs::read(input)?;
        let encoded = self.transform_dyn(&data, &stop)?;

        let dir = match output.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        // not visible at `output` until persisted
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&encoded)?;
        file.as_file().sync_all()?;
        file.persist(output).map_err(|e| e.error)?;

        info!(
            input = %input.display(),
            output = %output.display(),
            bytes = encoded.len(),
            "wrote transformed image"
        );
        Ok(())
    }

    fn transform_dyn(&self, input: &[u8], stop: &dyn Stop) -> Result<Vec<u8>, PpmError> {
        let mut request = DecodeRequest::new(input);
        if let Some(limits) = self.limits {
            request = request.with_limits(limits);
        }
        let decoded = request.decode_dyn(stop)?;
        debug!(
            width = decoded.width(),
            height = decoded.height(),
            maxval = decoded.maxval(),
            "decoded input"
        );

        let maxval = decoded.maxval();
        let grid = transform::apply_grid(self.transform, decoded.grid(), maxval, stop)?;
        debug!(transform = ?self.transform, "applied transform");

        encode_grid(&grid, maxval, stop)
    }
}
