//! Windowed any-match dilation
//!
//! For every output pixel the square window of radius `distance` around the
//! corresponding input pixel is scanned for the search target; one match is
//! enough, so the scan short-circuits. Rows are independent: each row of the
//! output is computed purely from the read-only input, which makes the
//! row-parallel split safe without any synchronization.

use crate::qa::{pixel, PixelQaBit, QaClass};
use lsqa_core::raster::Raster;
use lsqa_core::{Algorithm, Error, Result};
use rayon::prelude::*;

/// Parameters for class value dilation
#[derive(Debug, Clone)]
pub struct ClassDilationParams {
    /// Class value to grow
    pub search_value: u8,
    /// Chebyshev radius in pixels
    pub distance: usize,
}

impl Default for ClassDilationParams {
    fn default() -> Self {
        Self {
            search_value: QaClass::Cloud.value(),
            distance: 3,
        }
    }
}

/// Class value dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct DilateClass;

impl Algorithm for DilateClass {
    type Input = Raster<u8>;
    type Output = Raster<u8>;
    type Params = ClassDilationParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "DilateClass"
    }

    fn description(&self) -> &'static str {
        "Grow a class value into neighboring pixels within a square window"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate_class_value(&input, params.search_value, params.distance)
    }
}

/// Parameters for pixel QA bit dilation
#[derive(Debug, Clone)]
pub struct PixelDilationParams {
    /// Bit to grow
    pub bit: PixelQaBit,
    /// Chebyshev radius in pixels
    pub distance: usize,
}

impl Default for PixelDilationParams {
    fn default() -> Self {
        Self {
            bit: PixelQaBit::Cloud,
            distance: 3,
        }
    }
}

/// Pixel QA bit dilation algorithm
#[derive(Debug, Clone, Default)]
pub struct DilatePixel;

impl Algorithm for DilatePixel {
    type Input = Raster<u16>;
    type Output = Raster<u16>;
    type Params = PixelDilationParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "DilatePixel"
    }

    fn description(&self) -> &'static str {
        "Grow a pixel QA bit into neighboring pixels within a square window"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        dilate_pixel_bit(&input, params.bit, params.distance)
    }
}

/// Dilate a class value in a scalar class band.
///
/// Fill pixels (255) pass through untouched and never gain the search value.
/// A pixel that already carries the search value keeps it without a window
/// scan; any other non-fill pixel takes the search value exactly when some
/// window cell within `distance` carries it, and keeps its own value
/// otherwise. The output is always a fresh buffer of the same shape.
pub fn dilate_class_value(
    raster: &Raster<u8>,
    search_value: u8,
    distance: usize,
) -> Result<Raster<u8>> {
    let (nrows, ncols) = raster.shape();
    let fill = QaClass::Fill.value();

    let data: Vec<u8> = (0..nrows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u8; ncols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let center = unsafe { raster.get_unchecked(row, col) };

                // Fill pixels are inert under dilation
                if center == fill {
                    *out = center;
                    continue;
                }

                // The window always contains its own center
                if center == search_value {
                    *out = search_value;
                    continue;
                }

                *out = if class_in_window(raster, row, col, distance, search_value) {
                    search_value
                } else {
                    center
                };
            }
            row_data
        })
        .collect();

    let mut output = Raster::from_vec(data, nrows, ncols)?;
    output.set_fill(Some(fill));
    Ok(output)
}

/// Dilate a bit in a bit-packed pixel QA band.
///
/// Fill pixels (fill bit set) pass through untouched. Where the search bit is
/// found within `distance`, the output pixel is the input pixel with the
/// search bit ORed in and the cleaning mask applied: dilating the cloud bit
/// turns off the clear and cloud shadow bits on every affected pixel (the
/// center included, even when the bit was already set), any other bit is a
/// plain OR. The output is always a fresh buffer of the same shape.
pub fn dilate_pixel_bit(
    raster: &Raster<u16>,
    bit: PixelQaBit,
    distance: usize,
) -> Result<Raster<u16>> {
    let (nrows, ncols) = raster.shape();
    let search_mask = bit.mask();

    // Cloud dilation must not leave contradicting flags behind; snow and
    // water can legitimately coexist with cloud, so they stay on. There is no
    // policy for other bits, those dilate as a plain OR.
    let mut cleaning_mask = !0u16;
    if bit == PixelQaBit::Cloud {
        cleaning_mask &= !PixelQaBit::Clear.mask();
        cleaning_mask &= !PixelQaBit::CloudShadow.mask();
    }

    let data: Vec<u16> = (0..nrows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![0u16; ncols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let center = unsafe { raster.get_unchecked(row, col) };

                // Fill pixels are inert under dilation
                if pixel::is_fill(center) {
                    *out = center;
                    continue;
                }

                *out = if bit_in_window(raster, row, col, distance, search_mask) {
                    (center | search_mask) & cleaning_mask
                } else {
                    center
                };
            }
            row_data
        })
        .collect();

    let mut output = Raster::from_vec(data, nrows, ncols)?;
    output.set_fill(Some(PixelQaBit::Fill.mask()));
    Ok(output)
}

fn class_in_window(
    raster: &Raster<u8>,
    row: usize,
    col: usize,
    distance: usize,
    search_value: u8,
) -> bool {
    let (nrows, ncols) = raster.shape();
    let row_end = (row + distance + 1).min(nrows);
    let col_start = col.saturating_sub(distance);
    let col_end = (col + distance + 1).min(ncols);

    for wr in row.saturating_sub(distance)..row_end {
        for wc in col_start..col_end {
            if unsafe { raster.get_unchecked(wr, wc) } == search_value {
                return true;
            }
        }
    }
    false
}

fn bit_in_window(
    raster: &Raster<u16>,
    row: usize,
    col: usize,
    distance: usize,
    search_mask: u16,
) -> bool {
    let (nrows, ncols) = raster.shape();
    let row_end = (row + distance + 1).min(nrows);
    let col_start = col.saturating_sub(distance);
    let col_end = (col + distance + 1).min(ncols);

    for wr in row.saturating_sub(distance)..row_end {
        for wc in col_start..col_end {
            if unsafe { raster.get_unchecked(wr, wc) } & search_mask != 0 {
                return true;
            }
        }
    }
    false
}
