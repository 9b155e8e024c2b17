use crate::error::PpmError;
use crate::pixel::Pixel;

/// Rectangular, row-major grid of pixels.
///
/// Stored flat; `width * height == pixels.len()` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pixels: Vec<Pixel>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Wrap a flat row-major pixel buffer.
    ///
    /// Returns [`PpmError::RaggedRows`] if the buffer does not hold exactly
    /// `width * height` pixels.
    pub fn new(pixels: Vec<Pixel>, width: usize, height: usize) -> Result<Self, PpmError> {
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(PpmError::RaggedRows);
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a grid from nested rows, rejecting rows of unequal length.
    pub fn from_rows(rows: Vec<Vec<Pixel>>) -> Result<Self, PpmError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return Err(PpmError::RaggedRows);
        }
        let pixels = rows.into_iter().flatten().collect();
        Self::new(pixels, width, height)
    }

    /// Number of columns (pixels per row).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.pixels
    }

    /// Pixel at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// Rows in top-to-bottom order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Pixel]> + '_ {
        // chunks_exact panics on 0; a zero-width grid still has `height` empty rows
        let width = self.width;
        (0..self.height).map(move |y| &self.pixels[y * width..(y + 1) * width])
    }

    /// Build a grid of the same shape by mapping every pixel through `f`.
    pub fn map(&self, f: impl FnMut(Pixel) -> Pixel) -> Grid {
        Grid {
            pixels: self.pixels.iter().copied().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }

    /// Copy into an [`imgref::ImgVec`] of [`rgb::RGB16`] pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::RGB16> {
        let buf = self.pixels.iter().copied().map(rgb::RGB16::from).collect();
        imgref::ImgVec::new(buf, self.width, self.height)
    }

    /// Build a grid from any [`imgref::ImgRef`] of [`rgb::RGB16`] pixels.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'_, rgb::RGB16>) -> Grid {
        let pixels = img
            .rows()
            .flat_map(|row| row.iter().copied().map(Pixel::from))
            .collect();
        Grid {
            pixels,
            width: img.width(),
            height: img.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_keeps_order() {
        let grid = Grid::from_rows(vec![
            vec![Pixel::gray(1), Pixel::gray(2)],
            vec![Pixel::gray(3), Pixel::gray(4)],
            vec![Pixel::gray(5), Pixel::gray(6)],
        ])
        .unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 2), Some(Pixel::gray(6)));
        assert_eq!(grid.get(2, 0), None);
        let rows: Vec<_> = grid.rows().collect();
        assert_eq!(rows[1], &[Pixel::gray(3), Pixel::gray(4)]);
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let result = Grid::from_rows(vec![
            vec![Pixel::gray(1), Pixel::gray(2)],
            vec![Pixel::gray(3)],
        ]);
        assert!(matches!(result, Err(PpmError::RaggedRows)));
    }

    #[test]
    fn new_checks_length() {
        assert!(Grid::new(vec![Pixel::default(); 6], 3, 2).is_ok());
        assert!(matches!(
            Grid::new(vec![Pixel::default(); 5], 3, 2),
            Err(PpmError::RaggedRows)
        ));
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgvec_conversion_keeps_layout() {
        let grid = Grid::new(
            vec![Pixel::new(1, 2, 3), Pixel::new(4, 5, 6), Pixel::new(7, 8, 9), Pixel::gray(0)],
            2,
            2,
        )
        .unwrap();
        let img = grid.to_imgvec();
        assert_eq!((img.width(), img.height()), (2, 2));
        assert_eq!(img.buf()[2], rgb::RGB16::new(7, 8, 9));
        assert_eq!(Grid::from_imgref(img.as_ref()), grid);
    }

    #[test]
    fn map_preserves_shape() {
        let grid = Grid::new(vec![Pixel::new(1, 2, 3); 4], 2, 2).unwrap();
        let mapped = grid.map(|p| p.with(crate::Channel::Red, 0));
        assert_eq!(mapped.width(), 2);
        assert_eq!(mapped.height(), 2);
        assert!(mapped.pixels().iter().all(|p| *p == Pixel::new(0, 2, 3)));
    }
}
