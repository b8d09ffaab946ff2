pub mod extract;
pub mod geo;
pub mod raster;
pub mod stats;

pub use crate::raster::{
    DecodedRaster, NoData, Palette, ParseOptions, RasterError, RasterModel, RasterResult,
    SampleBuffer, SampleFormat,
};

pub use crate::geo::{
    describe_projection, AffineTransform, BoundingBox, GeoKeyDirectory, GeoKeyEntry,
    GeoKeyValue, Projection,
};

pub use crate::extract::{ColorGrid, ExtractOptions, PixelWindow, ValueGrid, Window, WindowValues};

pub use crate::stats::{compute_stats, Stats, StatsOptions};
