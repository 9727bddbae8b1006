//! Decode-only accessors for the legacy LEDAPS and LaSRC QA products
//!
//! These 8-bit bands predate the pixel QA encoding. This toolkit never
//! generates them; the accessors exist so downstream consumers can read
//! archived products through the same crate.

use super::Confidence;

/// LEDAPS cloud QA bits
pub mod ledaps {
    const DDV: u8 = 1 << 0;
    const CLOUD: u8 = 1 << 1;
    const CLOUD_SHADOW: u8 = 1 << 2;
    const ADJACENT_CLOUD: u8 = 1 << 3;
    const SNOW: u8 = 1 << 4;
    const LAND_WATER: u8 = 1 << 5;

    /// Pixel is dark dense vegetation
    pub fn is_ddv(qa: u8) -> bool {
        qa & DDV != 0
    }

    /// Pixel is cloud
    pub fn is_cloud(qa: u8) -> bool {
        qa & CLOUD != 0
    }

    /// Pixel is cloud shadow
    pub fn is_cloud_shadow(qa: u8) -> bool {
        qa & CLOUD_SHADOW != 0
    }

    /// Pixel is adjacent to a cloud
    pub fn is_adjacent_cloud(qa: u8) -> bool {
        qa & ADJACENT_CLOUD != 0
    }

    /// Pixel is snow
    pub fn is_snow(qa: u8) -> bool {
        qa & SNOW != 0
    }

    /// Pixel is land (false means water)
    pub fn is_land(qa: u8) -> bool {
        qa & LAND_WATER != 0
    }
}

/// LaSRC aerosol QA bits
pub mod lasrc {
    use super::Confidence;

    const FILL: u8 = 1 << 0;
    const VALID_AEROSOL: u8 = 1 << 1;
    const WATER: u8 = 1 << 2;
    const CLOUD_CIRRUS: u8 = 1 << 3;
    const CLOUD_SHADOW: u8 = 1 << 4;
    const AEROSOL_INTERP: u8 = 1 << 5;
    const AEROSOL_LEVEL_SHIFT: u8 = 6;

    /// Pixel is fill
    pub fn is_fill(qa: u8) -> bool {
        qa & FILL != 0
    }

    /// Aerosol retrieval was valid
    pub fn is_valid_aerosol_retrieval(qa: u8) -> bool {
        qa & VALID_AEROSOL != 0
    }

    /// Pixel is water
    pub fn is_water(qa: u8) -> bool {
        qa & WATER != 0
    }

    /// Pixel is cloud or cirrus
    pub fn is_cloud_or_cirrus(qa: u8) -> bool {
        qa & CLOUD_CIRRUS != 0
    }

    /// Pixel is cloud shadow
    pub fn is_cloud_shadow(qa: u8) -> bool {
        qa & CLOUD_SHADOW != 0
    }

    /// Aerosol value was interpolated
    pub fn is_aerosol_interpolated(qa: u8) -> bool {
        qa & AEROSOL_INTERP != 0
    }

    /// Aerosol level carried in bits 6-7
    pub fn aerosol_level(qa: u8) -> Confidence {
        Confidence::from_bits((qa >> AEROSOL_LEVEL_SHIFT) as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledaps_bits() {
        let qa = 0b0010_0110; // cloud + shadow + land
        assert!(ledaps::is_cloud(qa));
        assert!(ledaps::is_cloud_shadow(qa));
        assert!(ledaps::is_land(qa));
        assert!(!ledaps::is_ddv(qa));
        assert!(!ledaps::is_adjacent_cloud(qa));
        assert!(!ledaps::is_snow(qa));
    }

    #[test]
    fn test_lasrc_bits() {
        let qa = 0b1000_1001; // fill + cloud/cirrus + aerosol level 10
        assert!(lasrc::is_fill(qa));
        assert!(lasrc::is_cloud_or_cirrus(qa));
        assert!(!lasrc::is_water(qa));
        assert!(!lasrc::is_cloud_shadow(qa));
        assert!(!lasrc::is_aerosol_interpolated(qa));
        assert_eq!(lasrc::aerosol_level(qa), Confidence::Moderate);
    }

    #[test]
    fn test_lasrc_aerosol_level_high() {
        assert_eq!(lasrc::aerosol_level(0b1100_0000), Confidence::High);
        assert_eq!(lasrc::aerosol_level(0), Confidence::NotSet);
    }
}
