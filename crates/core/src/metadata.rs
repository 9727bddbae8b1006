//! Scene metadata parsing and band lookup
//!
//! Scene metadata rides in an ESPA-style XML file next to the raw binary
//! bands: one `<global_metadata>` block naming the satellite, and one
//! `<band>` element per raster with its dimensions, data type and file name.
//! This module resolves band descriptors and the sensor family used to select
//! the Level-1 bit layout; it never touches pixel data.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// Sensor family tag selecting the Level-1 QA bit layout.
///
/// The two families share most bit positions but disagree on bit 1
/// (dropped pixel vs terrain occlusion) and on whether the cirrus
/// confidence field exists at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFamily {
    /// TM/ETM+ era sensors (Landsat 4, 5, 7)
    Legacy,
    /// OLI/TIRS era sensors (Landsat 8, 9)
    Modern,
}

impl SensorFamily {
    /// Resolve the family from a scene satellite tag
    pub fn from_satellite(tag: &str) -> Result<Self> {
        match tag.trim() {
            "LANDSAT_4" | "LANDSAT_5" | "LANDSAT_7" => Ok(SensorFamily::Legacy),
            "LANDSAT_8" | "LANDSAT_9" => Ok(SensorFamily::Modern),
            other => Err(Error::UnknownSatellite(other.to_string())),
        }
    }
}

/// Pixel data type of a band as declared in the scene metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandDataType {
    Uint8,
    Uint16,
}

impl BandDataType {
    fn parse(s: &str) -> Result<Self> {
        match s {
            "UINT8" => Ok(BandDataType::Uint8),
            "UINT16" => Ok(BandDataType::Uint16),
            other => Err(Error::Xml(format!("unsupported band data type: {other}"))),
        }
    }

    fn tag(self) -> &'static str {
        match self {
            BandDataType::Uint8 => "UINT8",
            BandDataType::Uint16 => "UINT16",
        }
    }
}

impl fmt::Display for BandDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Descriptor of one band in the scene
#[derive(Debug, Clone)]
pub struct BandMeta {
    pub product: String,
    pub name: String,
    pub category: String,
    pub data_type: BandDataType,
    pub nlines: usize,
    pub nsamps: usize,
    pub fill_value: Option<u32>,
    pub file_name: String,
}

impl BandMeta {
    /// Error unless this band has the expected data type
    pub fn require_data_type(&self, expected: BandDataType) -> Result<()> {
        if self.data_type != expected {
            return Err(Error::UnexpectedDataType {
                band: self.name.clone(),
                expected: expected.tag(),
                actual: self.data_type.to_string(),
            });
        }
        Ok(())
    }
}

/// Parsed scene metadata: satellite tag plus all band descriptors
#[derive(Debug, Clone)]
pub struct SceneMetadata {
    satellite: String,
    bands: Vec<BandMeta>,
}

impl SceneMetadata {
    /// Parse scene metadata from an XML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    /// Parse scene metadata from an XML string
    pub fn from_str(xml: &str) -> Result<Self> {
        let doc = roxmltree::Document::parse(xml)?;

        // Tag names are compared by local name: scene files may or may not
        // carry the schema's default namespace
        let satellite = doc
            .descendants()
            .find(|n| n.tag_name().name() == "satellite")
            .and_then(|n| n.text())
            .ok_or_else(|| Error::Xml("missing <satellite> tag".to_string()))?
            .trim()
            .to_string();

        let mut bands = Vec::new();
        for node in doc.descendants().filter(|n| n.tag_name().name() == "band") {
            let file_name = node
                .children()
                .find(|n| n.tag_name().name() == "file_name")
                .and_then(|n| n.text())
                .ok_or_else(|| Error::Xml("band missing <file_name>".to_string()))?
                .trim()
                .to_string();

            bands.push(BandMeta {
                product: attr(node, "product")?.to_string(),
                name: attr(node, "name")?.to_string(),
                category: attr(node, "category")?.to_string(),
                data_type: BandDataType::parse(attr(node, "data_type")?)?,
                nlines: dim_attr(node, "nlines")?,
                nsamps: dim_attr(node, "nsamps")?,
                fill_value: node.attribute("fill_value").and_then(|v| v.parse().ok()),
                file_name,
            });
        }

        if bands.is_empty() {
            return Err(Error::Xml("scene metadata contains no bands".to_string()));
        }

        Ok(Self { satellite, bands })
    }

    /// Satellite tag from the global metadata
    pub fn satellite(&self) -> &str {
        &self.satellite
    }

    /// All band descriptors
    pub fn bands(&self) -> &[BandMeta] {
        &self.bands
    }

    /// Sensor family for this scene, selecting the Level-1 bit layout
    pub fn sensor_family(&self) -> Result<SensorFamily> {
        SensorFamily::from_satellite(&self.satellite)
    }

    /// Look up a band by name and category
    pub fn find_band(&self, name: &str, category: &str) -> Result<&BandMeta> {
        self.bands
            .iter()
            .find(|b| b.name == name && b.category == category)
            .ok_or_else(|| Error::BandNotFound {
                name: name.to_string(),
                category: category.to_string(),
            })
    }

    /// The reference reflectance band used for dimension validation
    pub fn reference_band(&self) -> Result<&BandMeta> {
        self.bands
            .iter()
            .find(|b| b.name == "b1" || b.name == "band1")
            .ok_or_else(|| Error::BandNotFound {
                name: "b1".to_string(),
                category: "image".to_string(),
            })
    }

    /// Error unless `band` matches the reference band's dimensions
    pub fn validate_against_reference(&self, band: &BandMeta) -> Result<()> {
        let reference = self.reference_band()?;
        if band.nlines != reference.nlines || band.nsamps != reference.nsamps {
            return Err(Error::SizeMismatch {
                er: reference.nlines,
                ec: reference.nsamps,
                ar: band.nlines,
                ac: band.nsamps,
            });
        }
        Ok(())
    }
}

fn attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Result<&'a str> {
    node.attribute(name)
        .ok_or_else(|| Error::Xml(format!("band missing attribute {name:?}")))
}

fn dim_attr(node: roxmltree::Node<'_, '_>, name: &str) -> Result<usize> {
    attr(node, name)?
        .parse()
        .map_err(|_| Error::Xml(format!("band attribute {name:?} is not a size")))
}

/// Append a new band descriptor to an existing scene XML file.
///
/// Called only after the band file itself has been completely written, so a
/// failure here never leaves a dangling descriptor for a half-written band.
pub fn append_band<P: AsRef<Path>>(xml_path: P, band: &BandMeta) -> Result<()> {
    let path = xml_path.as_ref();
    let text = fs::read_to_string(path)?;

    let marker = text
        .rfind("</bands>")
        .ok_or_else(|| Error::Xml("scene metadata has no <bands> section".to_string()))?;

    let fill = band
        .fill_value
        .map(|v| format!(" fill_value=\"{v}\""))
        .unwrap_or_default();
    let element = format!(
        "    <band product=\"{}\" name=\"{}\" category=\"{}\" data_type=\"{}\" \
         nlines=\"{}\" nsamps=\"{}\"{}>\n        <file_name>{}</file_name>\n    </band>\n",
        band.product,
        band.name,
        band.category,
        band.data_type,
        band.nlines,
        band.nsamps,
        fill,
        band.file_name,
    );

    let mut updated = String::with_capacity(text.len() + element.len());
    updated.push_str(&text[..marker]);
    updated.push_str(&element);
    updated.push_str(&text[marker..]);
    fs::write(path, updated)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<espa_metadata version="2.0">
    <global_metadata>
        <satellite>LANDSAT_8</satellite>
        <instrument>OLI_TIRS</instrument>
    </global_metadata>
    <bands>
        <band product="L1TP" name="b1" category="image" data_type="UINT16"
              nlines="100" nsamps="120" fill_value="0">
            <file_name>scene_b1.img</file_name>
        </band>
        <band product="L1TP" name="bqa_pixel" category="qa" data_type="UINT16"
              nlines="100" nsamps="120" fill_value="1">
            <file_name>scene_bqa_pixel.img</file_name>
        </band>
    </bands>
</espa_metadata>
"#;

    #[test]
    fn test_parse_scene() {
        let scene = SceneMetadata::from_str(SCENE_XML).unwrap();
        assert_eq!(scene.satellite(), "LANDSAT_8");
        assert_eq!(scene.bands().len(), 2);
        assert_eq!(scene.sensor_family().unwrap(), SensorFamily::Modern);
    }

    #[test]
    fn test_find_band() {
        let scene = SceneMetadata::from_str(SCENE_XML).unwrap();
        let band = scene.find_band("bqa_pixel", "qa").unwrap();
        assert_eq!(band.nlines, 100);
        assert_eq!(band.nsamps, 120);
        assert_eq!(band.data_type, BandDataType::Uint16);
        assert_eq!(band.fill_value, Some(1));
        assert_eq!(band.file_name, "scene_bqa_pixel.img");

        assert!(matches!(
            scene.find_band("pixel_qa", "qa"),
            Err(Error::BandNotFound { .. })
        ));
    }

    #[test]
    fn test_data_type_check() {
        let scene = SceneMetadata::from_str(SCENE_XML).unwrap();
        let band = scene.find_band("bqa_pixel", "qa").unwrap();
        assert!(band.require_data_type(BandDataType::Uint16).is_ok());
        assert!(matches!(
            band.require_data_type(BandDataType::Uint8),
            Err(Error::UnexpectedDataType { .. })
        ));
    }

    #[test]
    fn test_reference_validation() {
        let scene = SceneMetadata::from_str(SCENE_XML).unwrap();
        let qa = scene.find_band("bqa_pixel", "qa").unwrap();
        assert!(scene.validate_against_reference(qa).is_ok());

        let mut other = qa.clone();
        other.nsamps = 60;
        assert!(matches!(
            scene.validate_against_reference(&other),
            Err(Error::SizeMismatch { .. })
        ));
    }

    #[test]
    fn test_sensor_family_tags() {
        assert_eq!(
            SensorFamily::from_satellite("LANDSAT_7").unwrap(),
            SensorFamily::Legacy
        );
        assert_eq!(
            SensorFamily::from_satellite("LANDSAT_9").unwrap(),
            SensorFamily::Modern
        );
        assert!(SensorFamily::from_satellite("SENTINEL_2").is_err());
    }

    #[test]
    fn test_append_band() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.xml");
        std::fs::write(&path, SCENE_XML).unwrap();

        let band = BandMeta {
            product: "level2_qa".to_string(),
            name: "pixel_qa".to_string(),
            category: "qa".to_string(),
            data_type: BandDataType::Uint16,
            nlines: 100,
            nsamps: 120,
            fill_value: Some(1),
            file_name: "scene_pixel_qa.img".to_string(),
        };
        append_band(&path, &band).unwrap();

        let scene = SceneMetadata::from_file(&path).unwrap();
        assert_eq!(scene.bands().len(), 3);
        let appended = scene.find_band("pixel_qa", "qa").unwrap();
        assert_eq!(appended.file_name, "scene_pixel_qa.img");
    }
}
