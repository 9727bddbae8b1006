//! Level-2 bit-packed pixel QA band
//!
//! 16-bit band, one independent field per flag: unlike the scalar class band
//! the flags are not mutually exclusive, except for the clear bit which is
//! turned off whenever a contradicting condition is turned on.

use super::Confidence;
use lsqa_core::Error;

/// Shift of the 2-bit cloud confidence field
pub const CLOUD_CONF_SHIFT: u16 = 6;
/// Shift of the 2-bit cirrus confidence field (modern sensors only)
pub const CIRRUS_CONF_SHIFT: u16 = 8;

/// Bit positions of the pixel QA band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelQaBit {
    Fill = 0,
    Clear = 1,
    Water = 2,
    CloudShadow = 3,
    Snow = 4,
    Cloud = 5,
    CloudConf1 = 6,
    CloudConf2 = 7,
    CirrusConf1 = 8,
    CirrusConf2 = 9,
    TerrainOcclusion = 10,
}

impl PixelQaBit {
    /// Bit index within the 16-bit band
    pub fn index(self) -> u16 {
        self as u16
    }

    /// Single-bit mask for this field
    pub fn mask(self) -> u16 {
        1 << self.index()
    }

    /// Whether this bit is set in a pixel QA value
    pub fn is_set(self, qa: u16) -> bool {
        qa & self.mask() != 0
    }
}

impl TryFrom<u8> for PixelQaBit {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        let bit = match value {
            0 => PixelQaBit::Fill,
            1 => PixelQaBit::Clear,
            2 => PixelQaBit::Water,
            3 => PixelQaBit::CloudShadow,
            4 => PixelQaBit::Snow,
            5 => PixelQaBit::Cloud,
            6 => PixelQaBit::CloudConf1,
            7 => PixelQaBit::CloudConf2,
            8 => PixelQaBit::CirrusConf1,
            9 => PixelQaBit::CirrusConf2,
            10 => PixelQaBit::TerrainOcclusion,
            other => {
                return Err(Error::InvalidParameter {
                    name: "bit",
                    value: other.to_string(),
                    reason: "pixel QA bits are 0-10".to_string(),
                })
            }
        };
        Ok(bit)
    }
}

/// Pixel is fill
pub fn is_fill(qa: u16) -> bool {
    PixelQaBit::Fill.is_set(qa)
}

/// Pixel is clear
pub fn is_clear(qa: u16) -> bool {
    PixelQaBit::Clear.is_set(qa)
}

/// Pixel is water
pub fn is_water(qa: u16) -> bool {
    PixelQaBit::Water.is_set(qa)
}

/// Pixel is cloud shadow
pub fn is_cloud_shadow(qa: u16) -> bool {
    PixelQaBit::CloudShadow.is_set(qa)
}

/// Pixel is snow
pub fn is_snow(qa: u16) -> bool {
    PixelQaBit::Snow.is_set(qa)
}

/// Pixel is cloud
pub fn is_cloud(qa: u16) -> bool {
    PixelQaBit::Cloud.is_set(qa)
}

/// Pixel is terrain occluded (modern sensors only)
pub fn is_terrain_occluded(qa: u16) -> bool {
    PixelQaBit::TerrainOcclusion.is_set(qa)
}

/// Cloud confidence carried in bits 6-7
pub fn cloud_confidence(qa: u16) -> Confidence {
    Confidence::from_bits(qa >> CLOUD_CONF_SHIFT)
}

/// Cirrus confidence carried in bits 8-9 (modern sensors only)
pub fn cirrus_confidence(qa: u16) -> Confidence {
    Confidence::from_bits(qa >> CIRRUS_CONF_SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_masks() {
        assert_eq!(PixelQaBit::Fill.mask(), 0x0001);
        assert_eq!(PixelQaBit::Clear.mask(), 0x0002);
        assert_eq!(PixelQaBit::Cloud.mask(), 0x0020);
        assert_eq!(PixelQaBit::TerrainOcclusion.mask(), 0x0400);
    }

    #[test]
    fn test_flag_accessors() {
        let qa = PixelQaBit::Clear.mask() | PixelQaBit::Snow.mask();
        assert!(is_clear(qa));
        assert!(is_snow(qa));
        assert!(!is_fill(qa));
        assert!(!is_cloud(qa));
        assert!(!is_water(qa));
        assert!(!is_cloud_shadow(qa));
        assert!(!is_terrain_occluded(qa));
    }

    #[test]
    fn test_confidence_fields() {
        let qa = (Confidence::Moderate.bits() << CLOUD_CONF_SHIFT)
            | (Confidence::High.bits() << CIRRUS_CONF_SHIFT);
        assert_eq!(cloud_confidence(qa), Confidence::Moderate);
        assert_eq!(cirrus_confidence(qa), Confidence::High);
    }

    #[test]
    fn test_bit_from_u8() {
        assert_eq!(PixelQaBit::try_from(5).unwrap(), PixelQaBit::Cloud);
        assert_eq!(PixelQaBit::try_from(10).unwrap(), PixelQaBit::TerrainOcclusion);
        assert!(PixelQaBit::try_from(11).is_err());
    }
}
