//! Raster element trait for generic band pixel values

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use num_traits::Zero;
use std::fmt::Debug;
use std::io::{Read, Write};

/// Trait for types that can be stored in a band raster cell.
///
/// QA products in this family come in exactly two pixel widths: 8-bit scalar
/// class bands and 16-bit bit-packed masks. The trait carries the raw-band
/// encoding for each width so the I/O layer stays generic over both.
pub trait RasterElement:
    Copy + Clone + Debug + PartialOrd + PartialEq + Zero + Send + Sync + 'static
{
    /// Width of one pixel in the raw band file, in bytes
    const PIXEL_BYTES: usize;

    /// ENVI header `data type` code for this pixel width
    const ENVI_DATA_TYPE: u8;

    /// Read `count` little-endian pixels from a raw band file
    fn read_pixels<R: Read>(reader: &mut R, count: usize) -> std::io::Result<Vec<Self>>;

    /// Write all pixels little-endian to a raw band file
    fn write_pixels<W: Write>(writer: &mut W, pixels: &[Self]) -> std::io::Result<()>;
}

impl RasterElement for u8 {
    const PIXEL_BYTES: usize = 1;
    const ENVI_DATA_TYPE: u8 = 1;

    fn read_pixels<R: Read>(reader: &mut R, count: usize) -> std::io::Result<Vec<Self>> {
        let mut buf = vec![0u8; count];
        reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    fn write_pixels<W: Write>(writer: &mut W, pixels: &[Self]) -> std::io::Result<()> {
        writer.write_all(pixels)
    }
}

impl RasterElement for u16 {
    const PIXEL_BYTES: usize = 2;
    const ENVI_DATA_TYPE: u8 = 12;

    fn read_pixels<R: Read>(reader: &mut R, count: usize) -> std::io::Result<Vec<Self>> {
        let mut buf = vec![0u16; count];
        reader.read_u16_into::<LittleEndian>(&mut buf)?;
        Ok(buf)
    }

    fn write_pixels<W: Write>(writer: &mut W, pixels: &[Self]) -> std::io::Result<()> {
        for &v in pixels {
            writer.write_u16::<LittleEndian>(v)?;
        }
        Ok(())
    }
}
