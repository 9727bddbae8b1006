//! Bit-packed pixel QA band generation

use crate::qa::{Confidence, Level1Layout, PixelQaBit, CIRRUS_CONF_SHIFT, CLOUD_CONF_SHIFT};
use lsqa_core::raster::Raster;
use lsqa_core::{Algorithm, Error, Result, SensorFamily};
use rayon::prelude::*;

/// Parameters for pixel QA band generation
#[derive(Debug, Clone)]
pub struct PixelBandParams {
    /// Sensor family selecting the Level-1 bit layout
    pub family: SensorFamily,
}

impl Default for PixelBandParams {
    fn default() -> Self {
        Self {
            family: SensorFamily::Modern,
        }
    }
}

/// Pixel QA band generation algorithm
#[derive(Debug, Clone, Default)]
pub struct PixelBand;

impl Algorithm for PixelBand {
    type Input = Raster<u16>;
    type Output = Raster<u16>;
    type Params = PixelBandParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "PixelBand"
    }

    fn description(&self) -> &'static str {
        "Generate the bit-packed Level-2 pixel QA band from a Level-1 quality band"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        pixel_band(&input, params.family)
    }
}

/// Generate the bit-packed Level-2 pixel QA band from a Level-1 quality band.
///
/// Every pixel starts out clear. Fill pixels get only the fill bit. For the
/// rest the flags are evaluated independently: cloud shadow, snow and cloud
/// each set their bit and turn the clear bit off; the cloud confidence field
/// is copied verbatim (high confidence also turns the clear bit off); on
/// modern sensors the cirrus confidence and terrain occlusion fields are
/// copied verbatim without touching the clear bit.
pub fn pixel_band(level1: &Raster<u16>, family: SensorFamily) -> Result<Raster<u16>> {
    let (nrows, ncols) = level1.shape();
    let layout = Level1Layout::for_family(family);

    let data: Vec<u16> = (0..nrows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![PixelQaBit::Clear.mask(); ncols];
            for (col, out) in row_data.iter_mut().enumerate() {
                let qa = unsafe { level1.get_unchecked(row, col) };
                *out = encode_pixel(layout, qa);
            }
            row_data
        })
        .collect();

    let mut output = Raster::from_vec(data, nrows, ncols)?;
    output.set_fill(Some(PixelQaBit::Fill.mask()));
    Ok(output)
}

fn encode_pixel(layout: &Level1Layout, qa: u16) -> u16 {
    let clear = PixelQaBit::Clear.mask();

    if layout.is_fill(qa) {
        return PixelQaBit::Fill.mask();
    }

    let mut out = clear;

    if layout.cloud_shadow_confidence(qa) == Confidence::High {
        out = (out & !clear) | PixelQaBit::CloudShadow.mask();
    }
    if layout.snow_ice_confidence(qa) == Confidence::High {
        out = (out & !clear) | PixelQaBit::Snow.mask();
    }
    if layout.is_cloud(qa) {
        out = (out & !clear) | PixelQaBit::Cloud.mask();
    }

    let cloud_conf = layout.cloud_confidence(qa);
    out |= cloud_conf.bits() << CLOUD_CONF_SHIFT;
    if cloud_conf == Confidence::High {
        out &= !clear;
    }

    // Cirrus and terrain occlusion exist only on the modern layout and never
    // affect the clear bit
    out |= layout.cirrus_confidence(qa).bits() << CIRRUS_CONF_SHIFT;
    if layout.is_terrain_occluded(qa) {
        out |= PixelQaBit::TerrainOcclusion.mask();
    }

    out
}
