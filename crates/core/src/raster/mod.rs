//! Raster data structures for whole-band QA processing

mod element;
mod grid;

pub use element::RasterElement;
pub use grid::Raster;
