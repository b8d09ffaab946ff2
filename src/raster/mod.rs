//! Raster model and decoding interface
//!
//! This module provides the immutable in-memory raster representation
//! and the structures handed over by the external decoder.

pub mod errors;
mod model;
mod palette;
mod source;

// Re-export key types
pub use self::errors::{RasterError, RasterResult};
pub use self::model::{ParseOptions, RasterModel};
pub use self::palette::Palette;
pub use self::source::{DecodedRaster, NoData, SampleBuffer, SampleFormat};
