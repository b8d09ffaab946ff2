//! Georeferencing for decoded rasters
//!
//! This module resolves the spatial reference and affine transform of a
//! raster from its embedded GeoTIFF metadata.

mod affine;
mod bbox;
mod crs;
pub mod constants;
pub mod keys;

// Re-export key types
pub use self::affine::AffineTransform;
pub use self::bbox::BoundingBox;
pub use self::crs::{describe_projection, resolve_crs, CrsResolution, Projection};
pub use self::keys::{GeoKeyDirectory, GeoKeyEntry, GeoKeyValue};
