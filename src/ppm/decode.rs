//! Plain PPM header parser and body decoder.

use enough::Stop;

use super::{CHANNELS, MAGIC, MAX_MAXVAL, PpmHeader};
use crate::error::PpmError;
use crate::grid::Grid;
use crate::pixel::Pixel;

/// Shortest possible text for one pixel: `"0 0 0 "`.
const MIN_BYTES_PER_PIXEL: usize = 6;

/// Parse the three header lines: tag, `width height`, maxval.
pub(crate) fn parse_header(text: &str) -> Result<PpmHeader, PpmError> {
    let mut lines = text.split_inclusive('\n');
    let mut offset = 0usize;
    let mut next_line = |what: &str| next_header_line(&mut lines, &mut offset, what);

    let tag = next_line("format tag")?;
    if tag != MAGIC {
        return Err(PpmError::MalformedHeader(format!(
            "expected format tag {MAGIC:?}, got {tag:?}"
        )));
    }

    let dims = next_line("dimensions")?;
    let mut fields = dims.split_ascii_whitespace();
    let (Some(w), Some(h), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(PpmError::MalformedHeader(format!(
            "expected \"<width> <height>\", got {dims:?}"
        )));
    };
    let width = parse_positive(w, "width")?;
    let height = parse_positive(h, "height")?;

    let max_line = next_line("maxval")?;
    let maxval = parse_positive(max_line, "maxval")?;
    if maxval > MAX_MAXVAL {
        return Err(PpmError::MalformedHeader(format!(
            "maxval {maxval} exceeds {MAX_MAXVAL}"
        )));
    }

    Ok(PpmHeader {
        width,
        height,
        maxval: maxval as u16,
        body_line: 3,
        body_offset: offset,
    })
}

fn next_header_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    offset: &mut usize,
    what: &str,
) -> Result<&'a str, PpmError> {
    let line = lines
        .next()
        .ok_or_else(|| PpmError::MalformedHeader(format!("missing {what} line")))?;
    *offset += line.len();
    Ok(line.trim())
}

fn parse_positive(field: &str, what: &str) -> Result<u32, PpmError> {
    match parse_decimal(field) {
        Some(v) if v > 0 => Ok(v),
        _ => Err(PpmError::MalformedHeader(format!(
            "{what} must be a positive integer, got {field:?}"
        ))),
    }
}

/// Strict unsigned decimal: digits only, no sign, no overflow.
fn parse_decimal(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

/// Decode the whitespace-separated sample stream into a `width x height` grid.
///
/// The body is treated as one token stream, so rows may wrap across
/// physical lines at any point.
pub(crate) fn decode_body(
    body: &str,
    header: &PpmHeader,
    stop: &dyn Stop,
) -> Result<Grid, PpmError> {
    let expected = header.expected_samples()?;
    let w = header.width as usize;
    let h = header.height as usize;
    let maxval = u32::from(header.maxval);

    // A lying header must not drive the allocation size.
    let capacity = (w * h).min(body.len() / MIN_BYTES_PER_PIXEL + 1);
    let mut pixels = Vec::with_capacity(capacity);

    let mut tokens = body.split_ascii_whitespace();
    let mut triple = [0u16; CHANNELS];
    let mut index = 0usize;

    while index < expected {
        let Some(token) = tokens.next() else {
            return Err(PpmError::TruncatedData {
                expected,
                actual: index,
            });
        };
        let value = parse_decimal(token)
            .filter(|&v| v <= maxval)
            .ok_or_else(|| PpmError::InvalidSample {
                index,
                token: token.into(),
            })?;
        triple[index % CHANNELS] = value as u16;
        if index % CHANNELS == CHANNELS - 1 {
            if pixels.len() % w.saturating_mul(16).max(1) == 0 {
                stop.check()?;
            }
            pixels.push(Pixel::from(triple));
        }
        index += 1;
    }

    let extra = tokens.count();
    if extra > 0 {
        return Err(PpmError::TrailingData {
            expected,
            actual: expected + extra,
        });
    }

    tracing::debug!(width = w, height = h, maxval, "decoded plain PPM body");
    Grid::new(pixels, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn header_fields_and_offset() {
        let text = "P3\n4 2\n255\n1 2 3";
        let header = parse_header(text).unwrap();
        assert_eq!((header.width, header.height, header.maxval), (4, 2, 255));
        assert_eq!(header.body_line, 3);
        assert_eq!(&text[header.body_offset..], "1 2 3");
    }

    #[test]
    fn header_tolerates_crlf() {
        let header = parse_header("P3\r\n1 1\r\n15\r\n0 0 0\r\n").unwrap();
        assert_eq!((header.width, header.height, header.maxval), (1, 1, 15));
    }

    #[test]
    fn header_rejects_bad_fields() {
        for text in [
            "P6\n1 1\n255\n",
            "P3\n1\n255\n",
            "P3\n1 1 1\n255\n",
            "P3\n0 1\n255\n",
            "P3\n1 -1\n255\n",
            "P3\n1 x\n255\n",
            "P3\n1 1\n0\n",
            "P3\n1 1\n65536\n",
            "P3\n1 1\n255 255\n",
            "P3\n1 1\n",
            "",
        ] {
            assert!(
                matches!(parse_header(text), Err(PpmError::MalformedHeader(_))),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn body_ignores_line_breaks() {
        let header = parse_header("P3\n2 2\n255\n").unwrap();
        let grid = decode_body("1 2\n3 4 5 6 7\n8\n9 10 11 12\n", &header, &Unstoppable).unwrap();
        assert_eq!(grid.get(0, 0), Some(Pixel::new(1, 2, 3)));
        assert_eq!(grid.get(1, 0), Some(Pixel::new(4, 5, 6)));
        assert_eq!(grid.get(0, 1), Some(Pixel::new(7, 8, 9)));
        assert_eq!(grid.get(1, 1), Some(Pixel::new(10, 11, 12)));
    }

    #[test]
    fn body_rejects_sample_above_maxval() {
        let header = parse_header("P3\n1 1\n15\n").unwrap();
        let err = decode_body("1 16 2", &header, &Unstoppable).unwrap_err();
        match err {
            PpmError::InvalidSample { index, token } => {
                assert_eq!(index, 1);
                assert_eq!(token, "16");
            }
            other => panic!("expected InvalidSample, got {other:?}"),
        }
    }

    #[test]
    fn body_rejects_signed_and_garbage_tokens() {
        let header = parse_header("P3\n1 1\n255\n").unwrap();
        for body in ["1 2 -3", "1 +2 3", "1 2 3.0", "a 2 3"] {
            assert!(
                matches!(
                    decode_body(body, &header, &Unstoppable),
                    Err(PpmError::InvalidSample { .. })
                ),
                "accepted {body:?}"
            );
        }
    }

    #[test]
    fn body_counts_trailing_tokens() {
        let header = parse_header("P3\n1 1\n255\n").unwrap();
        let err = decode_body("1 2 3 4 5", &header, &Unstoppable).unwrap_err();
        assert!(matches!(
            err,
            PpmError::TrailingData {
                expected: 3,
                actual: 5
            }
        ));
    }
}
