//! Band I/O: raw binary band files and ENVI headers

mod envi;
mod raw_binary;

pub use envi::EnviHeader;
pub use raw_binary::{read_band, write_band};
