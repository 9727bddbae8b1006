//! QA bit codecs
//!
//! One authoritative enumeration per encoding, shared by the codec, the
//! classifiers and the dilation engine:
//! - [`Level1Layout`]: sensor-family bit-position tables for the Level-1
//!   quality band
//! - [`PixelQaBit`]: bit positions of the Level-2 bit-packed pixel QA band
//! - [`QaClass`]: values of the Level-2 scalar class band
//! - [`legacy`]: decode-only accessors for the LEDAPS/LaSRC products

mod class;
mod confidence;
pub mod legacy;
mod level1;
pub mod pixel;

pub use class::QaClass;
pub use confidence::Confidence;
pub use level1::Level1Layout;
pub use pixel::{PixelQaBit, CIRRUS_CONF_SHIFT, CLOUD_CONF_SHIFT};
