//! Main Raster type

use crate::error::{Error, Result};
use crate::raster::RasterElement;
use ndarray::Array2;

/// A whole-band 2D raster grid.
///
/// `Raster<T>` stores pixel values of type `T` in row-major order, together
/// with the band's optional fill sentinel. QA bands are always processed
/// whole: one raster per band, created once, consumed by the next stage.
///
/// # Example
///
/// ```ignore
/// use lsqa_core::Raster;
///
/// // Create a 100x100 class band filled with clear (0)
/// let mut raster: Raster<u8> = Raster::new(100, 100);
/// raster.set(10, 20, 4)?;
/// let value = raster.get(10, 20)?;
/// ```
#[derive(Debug, Clone)]
pub struct Raster<T: RasterElement> {
    /// Band data stored in row-major order (line, sample)
    data: Array2<T>,
    /// Fill sentinel, if the band defines one
    fill: Option<T>,
}

impl<T: RasterElement> Raster<T> {
    /// Create a new raster filled with zeros
    pub fn new(nlines: usize, nsamps: usize) -> Self {
        Self {
            data: Array2::zeros((nlines, nsamps)),
            fill: None,
        }
    }

    /// Create a new raster filled with a specific value
    pub fn filled(nlines: usize, nsamps: usize, value: T) -> Self {
        Self {
            data: Array2::from_elem((nlines, nsamps), value),
            fill: None,
        }
    }

    /// Create a raster from existing row-major data
    pub fn from_vec(data: Vec<T>, nlines: usize, nsamps: usize) -> Result<Self> {
        if data.len() != nlines * nsamps {
            return Err(Error::InvalidDimensions { nlines, nsamps });
        }

        let array = Array2::from_shape_vec((nlines, nsamps), data)
            .map_err(|_| Error::InvalidDimensions { nlines, nsamps })?;

        Ok(Self {
            data: array,
            fill: None,
        })
    }

    // Dimensions

    /// Number of lines (rows)
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of samples (columns)
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the raster is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> T {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<T> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<T> {
        &mut self.data
    }

    /// Consume the raster and return the pixels in row-major order
    pub fn into_vec(self) -> Vec<T> {
        self.data.into_raw_vec_and_offset().0
    }

    // Fill handling

    /// Get the fill sentinel
    pub fn fill(&self) -> Option<T> {
        self.fill
    }

    /// Set the fill sentinel
    pub fn set_fill(&mut self, fill: Option<T>) {
        self.fill = fill;
    }

    /// Check if a value is the fill sentinel
    pub fn is_fill(&self, value: T) -> bool {
        match self.fill {
            Some(f) => value == f,
            None => false,
        }
    }

    /// Count of pixels equal to the fill sentinel
    pub fn fill_count(&self) -> usize {
        match self.fill {
            Some(f) => self.data.iter().filter(|&&v| v == f).count(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let raster: Raster<u16> = Raster::new(100, 200);
        assert_eq!(raster.rows(), 100);
        assert_eq!(raster.cols(), 200);
        assert_eq!(raster.shape(), (100, 200));
        assert_eq!(raster.len(), 20_000);
    }

    #[test]
    fn test_raster_access() {
        let mut raster: Raster<u8> = Raster::new(10, 10);
        raster.set(5, 5, 42).unwrap();
        assert_eq!(raster.get(5, 5).unwrap(), 42);
        assert!(raster.get(10, 0).is_err());
    }

    #[test]
    fn test_from_vec_dimension_check() {
        let result = Raster::from_vec(vec![0u8; 11], 3, 4);
        assert!(matches!(
            result,
            Err(Error::InvalidDimensions {
                nlines: 3,
                nsamps: 4
            })
        ));
    }

    #[test]
    fn test_fill_sentinel() {
        let mut raster: Raster<u8> = Raster::filled(4, 4, 0);
        raster.set_fill(Some(255));
        raster.set(0, 0, 255).unwrap();
        assert!(raster.is_fill(255));
        assert!(!raster.is_fill(0));
        assert_eq!(raster.fill_count(), 1);
    }

    #[test]
    fn test_into_vec_row_major() {
        let raster = Raster::from_vec(vec![1u8, 2, 3, 4, 5, 6], 2, 3).unwrap();
        assert_eq!(raster.get(1, 0).unwrap(), 4);
        assert_eq!(raster.into_vec(), vec![1, 2, 3, 4, 5, 6]);
    }
}
