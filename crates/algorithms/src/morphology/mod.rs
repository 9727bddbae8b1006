//! Morphological dilation of QA rasters
//!
//! Grows a target class value or pixel QA bit into neighboring pixels within
//! a Chebyshev radius, compensating for cloud and shadow boundary
//! uncertainty. Two variants with different write policies:
//! - **class value**: overwrite the output pixel with the search value
//! - **pixel bit**: OR the search bit in, then clear contradicting bits

mod dilate;

pub use dilate::{
    dilate_class_value, dilate_pixel_bit, ClassDilationParams, DilateClass, DilatePixel,
    PixelDilationParams,
};
