//! Scalar class band generation

use crate::qa::{Confidence, Level1Layout, QaClass};
use lsqa_core::raster::Raster;
use lsqa_core::{Algorithm, Error, Result, SensorFamily};
use rayon::prelude::*;

/// Parameters for class band generation
#[derive(Debug, Clone)]
pub struct ClassBandParams {
    /// Sensor family selecting the Level-1 bit layout
    pub family: SensorFamily,
}

impl Default for ClassBandParams {
    fn default() -> Self {
        Self {
            family: SensorFamily::Modern,
        }
    }
}

/// Class band generation algorithm
#[derive(Debug, Clone, Default)]
pub struct ClassBand;

impl Algorithm for ClassBand {
    type Input = Raster<u16>;
    type Output = Raster<u8>;
    type Params = ClassBandParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "ClassBand"
    }

    fn description(&self) -> &'static str {
        "Generate the scalar Level-2 class band from a Level-1 quality band"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        class_band(&input, params.family)
    }
}

/// Generate the scalar Level-2 class band from a Level-1 quality band.
///
/// Priority order: fill, then cloud, then snow (snow/ice confidence high),
/// then cloud shadow (shadow confidence high), then clear. The first matching
/// rule wins; water is never produced here, it comes from a separate surface
/// classification.
pub fn class_band(level1: &Raster<u16>, family: SensorFamily) -> Result<Raster<u8>> {
    let (nrows, ncols) = level1.shape();
    let layout = Level1Layout::for_family(family);

    let data: Vec<u8> = (0..nrows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![QaClass::Clear.value(); ncols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let qa = unsafe { level1.get_unchecked(row, col) };
                *out = classify_pixel(layout, qa).value();
            }
            row_data
        })
        .collect();

    let mut output = Raster::from_vec(data, nrows, ncols)?;
    output.set_fill(Some(QaClass::Fill.value()));
    Ok(output)
}

fn classify_pixel(layout: &Level1Layout, qa: u16) -> QaClass {
    if layout.is_fill(qa) {
        QaClass::Fill
    } else if layout.is_cloud(qa) {
        QaClass::Cloud
    } else if layout.snow_ice_confidence(qa) == Confidence::High {
        QaClass::Snow
    } else if layout.cloud_shadow_confidence(qa) == Confidence::High {
        QaClass::CloudShadow
    } else {
        QaClass::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILL: u16 = 1 << 0;
    const CLOUD: u16 = 1 << 4;
    const SHADOW_HIGH: u16 = 0b11 << 7;
    const SNOW_HIGH: u16 = 0b11 << 9;

    fn classify(qa: u16) -> QaClass {
        classify_pixel(Level1Layout::for_family(SensorFamily::Modern), qa)
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(classify(FILL | CLOUD | SNOW_HIGH), QaClass::Fill);
        assert_eq!(classify(CLOUD | SNOW_HIGH | SHADOW_HIGH), QaClass::Cloud);
        assert_eq!(classify(SNOW_HIGH | SHADOW_HIGH), QaClass::Snow);
        assert_eq!(classify(SHADOW_HIGH), QaClass::CloudShadow);
        assert_eq!(classify(0), QaClass::Clear);
    }

    #[test]
    fn test_low_confidence_stays_clear() {
        // only a high confidence promotes snow or shadow
        assert_eq!(classify(0b01 << 9), QaClass::Clear);
        assert_eq!(classify(0b10 << 7), QaClass::Clear);
    }

    #[test]
    fn test_whole_band() {
        let level1 = Raster::from_vec(vec![0, CLOUD, FILL, SNOW_HIGH], 2, 2).unwrap();
        let result = class_band(&level1, SensorFamily::Modern).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), QaClass::Clear.value());
        assert_eq!(result.get(0, 1).unwrap(), QaClass::Cloud.value());
        assert_eq!(result.get(1, 0).unwrap(), QaClass::Fill.value());
        assert_eq!(result.get(1, 1).unwrap(), QaClass::Snow.value());
        assert_eq!(result.fill(), Some(QaClass::Fill.value()));
    }

    #[test]
    fn test_algorithm_trait() {
        let level1 = Raster::from_vec(vec![CLOUD], 1, 1).unwrap();
        let result = ClassBand.execute_default(level1).unwrap();
        assert_eq!(result.get(0, 0).unwrap(), QaClass::Cloud.value());
    }
}
