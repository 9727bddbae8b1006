//! ENVI header generation
//!
//! Every raw binary band travels with a sidecar `.hdr` describing its shape
//! and pixel width so downstream viewers can open it.

use crate::error::Result;
use crate::metadata::BandMeta;
use crate::raster::RasterElement;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Minimal ENVI header for a single-band raw binary file
#[derive(Debug, Clone)]
pub struct EnviHeader {
    pub description: String,
    pub samples: usize,
    pub lines: usize,
    pub bands: usize,
    /// ENVI data type code (1 = 8-bit unsigned, 12 = 16-bit unsigned)
    pub data_type: u8,
    /// 0 = little endian
    pub byte_order: u8,
}

impl EnviHeader {
    /// Build a header for a band descriptor with pixel type `T`
    pub fn for_band<T: RasterElement>(band: &BandMeta) -> Self {
        Self {
            description: band.name.clone(),
            samples: band.nsamps,
            lines: band.nlines,
            bands: 1,
            data_type: T::ENVI_DATA_TYPE,
            byte_order: 0,
        }
    }

    /// Sidecar header path for a band image path (`x.img` -> `x.hdr`)
    pub fn path_for<P: AsRef<Path>>(img_path: P) -> PathBuf {
        img_path.as_ref().with_extension("hdr")
    }

    /// Write the header file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = Vec::new();
        writeln!(out, "ENVI")?;
        writeln!(out, "description = {{{}}}", self.description)?;
        writeln!(out, "samples = {}", self.samples)?;
        writeln!(out, "lines = {}", self.lines)?;
        writeln!(out, "bands = {}", self.bands)?;
        writeln!(out, "header offset = 0")?;
        writeln!(out, "file type = ENVI Standard")?;
        writeln!(out, "data type = {}", self.data_type)?;
        writeln!(out, "interleave = bsq")?;
        writeln!(out, "byte order = {}", self.byte_order)?;
        fs::write(path.as_ref(), out)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::BandDataType;

    fn pixel_qa_band() -> BandMeta {
        BandMeta {
            product: "level2_qa".to_string(),
            name: "pixel_qa".to_string(),
            category: "qa".to_string(),
            data_type: BandDataType::Uint16,
            nlines: 200,
            nsamps: 300,
            fill_value: Some(1),
            file_name: "scene_pixel_qa.img".to_string(),
        }
    }

    #[test]
    fn test_header_fields() {
        let hdr = EnviHeader::for_band::<u16>(&pixel_qa_band());
        assert_eq!(hdr.lines, 200);
        assert_eq!(hdr.samples, 300);
        assert_eq!(hdr.data_type, 12);
        assert_eq!(hdr.byte_order, 0);
    }

    #[test]
    fn test_header_write() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("scene_pixel_qa.img");
        let hdr_path = EnviHeader::path_for(&img);
        assert_eq!(hdr_path, dir.path().join("scene_pixel_qa.hdr"));

        EnviHeader::for_band::<u16>(&pixel_qa_band())
            .write(&hdr_path)
            .unwrap();
        let text = std::fs::read_to_string(&hdr_path).unwrap();
        assert!(text.starts_with("ENVI\n"));
        assert!(text.contains("samples = 300"));
        assert!(text.contains("data type = 12"));
        assert!(text.contains("interleave = bsq"));
    }
}
