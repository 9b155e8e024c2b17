//! Plain PPM encoder.

use std::io::Write;

use enough::Stop;

use super::MAGIC;
use crate::error::PpmError;
use crate::grid::Grid;

/// Encode a grid as plain PPM text.
///
/// Dimensions come from the grid itself, never from a previously parsed
/// header. Each row is written on its own line, samples separated by a
/// single space.
pub(crate) fn encode_grid(
    grid: &Grid,
    maxval: u16,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PpmError> {
    let w = grid.width();
    let h = grid.height();
    let header = format!("{MAGIC}\n{w} {h}\n{maxval}\n");
    // ~4 bytes per sample at 8-bit depth
    let mut out = Vec::with_capacity(header.len() + w.saturating_mul(h).saturating_mul(12));
    out.extend_from_slice(header.as_bytes());

    for (y, row) in grid.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for (x, p) in row.iter().enumerate() {
            if x > 0 {
                out.push(b' ');
            }
            write!(out, "{} {} {}", p.r, p.g, p.b)?;
        }
        out.push(b'\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::Pixel;
    use enough::Unstoppable;

    #[test]
    fn one_line_per_row() {
        let grid = Grid::from_rows(vec![
            vec![Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)],
            vec![Pixel::new(7, 8, 9), Pixel::new(10, 11, 12)],
        ])
        .unwrap();
        let out = encode_grid(&grid, 255, &Unstoppable).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 2\n255\n1 2 3 4 5 6\n7 8 9 10 11 12\n"
        );
    }

    #[test]
    fn header_follows_grid_shape() {
        let grid = Grid::new(vec![Pixel::gray(0); 3], 1, 3).unwrap();
        let out = encode_grid(&grid, 15, &Unstoppable).unwrap();
        assert!(out.starts_with(b"P3\n1 3\n15\n"));
    }
}
