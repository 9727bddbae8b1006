//! Raw binary band reading/writing
//!
//! Bands are flat little-endian row-major pixel arrays with no header and no
//! padding; dimensions and pixel width come from the scene metadata. Only
//! whole-band reads and writes are supported, which is all the QA pipeline
//! needs: a band is produced completely in memory before it is persisted.

use crate::error::{Error, Result};
use crate::raster::{Raster, RasterElement};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a whole band into a raster.
///
/// The file must hold exactly `nlines * nsamps` pixels of `T`; a short file
/// surfaces as an I/O error, a long file as a trailing-data error.
pub fn read_band<T, P>(path: P, nlines: usize, nsamps: usize) -> Result<Raster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let expected = (nlines * nsamps * T::PIXEL_BYTES) as u64;
    let actual = file.metadata()?.len();
    if actual != expected {
        return Err(Error::SizeMismatch {
            er: nlines,
            ec: nsamps,
            ar: (actual as usize / T::PIXEL_BYTES) / nsamps.max(1),
            ac: nsamps,
        });
    }

    let mut reader = BufReader::new(file);
    let data = T::read_pixels(&mut reader, nlines * nsamps)?;
    Raster::from_vec(data, nlines, nsamps)
}

/// Write a whole band from a raster.
pub fn write_band<T, P>(path: P, raster: &Raster<T>) -> Result<()>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    match raster.data().as_slice() {
        Some(slice) => T::write_pixels(&mut writer, slice)?,
        None => {
            let data: Vec<T> = raster.data().iter().copied().collect();
            T::write_pixels(&mut writer, &data)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_round_trip_u16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("band.img");

        let raster = Raster::from_vec(vec![1u16, 2, 3, 4, 5, 6], 2, 3).unwrap();
        write_band(&path, &raster).unwrap();

        let back: Raster<u16> = read_band(&path, 2, 3).unwrap();
        assert_eq!(back.shape(), (2, 3));
        assert_eq!(back.get(1, 2).unwrap(), 6);
    }

    #[test]
    fn test_band_round_trip_u8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("class.img");

        let raster = Raster::from_vec(vec![0u8, 4, 255, 3], 2, 2).unwrap();
        write_band(&path, &raster).unwrap();

        let back: Raster<u8> = read_band(&path, 2, 2).unwrap();
        assert_eq!(back.get(1, 0).unwrap(), 255);
    }

    #[test]
    fn test_size_mismatch_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.img");
        std::fs::write(&path, [0u8; 10]).unwrap();

        let result: Result<Raster<u16>> = read_band(&path, 4, 4);
        assert!(matches!(result, Err(Error::SizeMismatch { .. })));
    }
}
