//! Level-1 -> Level-2 QA band generation
//!
//! Pointwise transforms with no spatial context, one output pixel per input
//! pixel:
//! - **class band**: scalar, mutually exclusive classes with a fixed priority
//! - **pixel band**: bit-packed, independently settable flags

mod class_band;
mod pixel_band;

pub use class_band::{class_band, ClassBand, ClassBandParams};
pub use pixel_band::{pixel_band, PixelBand, PixelBandParams};
