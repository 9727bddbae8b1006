//! # lsqa Core
//!
//! Core types and I/O for the lsqa Level-2 quality-assurance toolkit.
//!
//! This crate provides:
//! - `Raster<T>`: Generic in-memory band grid type
//! - `SceneMetadata`: ESPA-style scene XML parsing and band lookup
//! - Raw binary band I/O and ENVI header generation
//! - Algorithm trait for consistent API

pub mod error;
pub mod io;
pub mod metadata;
pub mod raster;

pub use error::{Error, Result};
pub use metadata::{BandDataType, BandMeta, SceneMetadata, SensorFamily};
pub use raster::{Raster, RasterElement};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::metadata::{BandMeta, SceneMetadata, SensorFamily};
    pub use crate::raster::{Raster, RasterElement};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in lsqa.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(
        &self,
        input: Self::Input,
    ) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
