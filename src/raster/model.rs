//! The in-memory georeferenced raster representation
//!
//! A [`RasterModel`] is constructed once per decoded source and is
//! read-only thereafter. Georeferencing is resolved eagerly at
//! construction; failures there degrade to unset fields instead of
//! errors, because many consumers only need pixel values.

use log::{debug, info, warn};

use crate::extract::{self, ExtractOptions, PixelWindow, Window, WindowValues};
use crate::geo::{
    resolve_crs, AffineTransform, BoundingBox, GeoKeyDirectory, Projection,
};
use crate::raster::errors::{RasterError, RasterResult};
use crate::raster::palette::Palette;
use crate::raster::source::{DecodedRaster, SampleBuffer, SampleFormat};
use crate::stats::{compute_stats, Stats, StatsOptions};

/// Options for model construction
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Compute per-band summary statistics over the full extent,
    /// excluding nodata samples
    pub calc_stats: bool,
}

/// A georeferenced raster: band buffers plus resolved spatial metadata
///
/// Immutable after construction. Windowed extraction always returns
/// freshly allocated output, never a view aliasing the band buffers, so
/// concurrent reads need no coordination.
#[derive(Debug)]
pub struct RasterModel {
    width: usize,
    height: usize,
    pixel_depth: usize,
    sample_format: SampleFormat,
    projection: Projection,
    is_geographic: bool,
    affine: Option<AffineTransform>,
    bounds: Option<BoundingBox>,
    no_data_value: Option<f64>,
    palette: Option<Palette>,
    bands: Vec<SampleBuffer>,
    band_stats: Option<Vec<Option<Stats>>>,
}

impl RasterModel {
    /// Build the model from a decoded raster
    ///
    /// Validates the band buffers against the declared dimensions, then
    /// resolves CRS, affine transform, nodata and palette. Only the
    /// structural checks are fatal; georeferencing resolves softly.
    pub fn from_decoded(decoded: DecodedRaster, options: &ParseOptions) -> RasterResult<Self> {
        if decoded.rasters.is_empty() {
            return Err(RasterError::NoBands);
        }
        if decoded.width == 0 || decoded.height == 0 {
            return Err(RasterError::InvalidDimensions {
                width: decoded.width,
                height: decoded.height,
            });
        }

        let expected = decoded.width * decoded.height;
        for (index, band) in decoded.rasters.iter().enumerate() {
            if band.len() != expected {
                return Err(RasterError::BandSizeMismatch {
                    band: index,
                    expected,
                    actual: band.len(),
                });
            }
        }

        let crs = match &decoded.geo_keys {
            Some(entries) => resolve_crs(&GeoKeyDirectory::from_entries(entries)),
            None => {
                debug!("Source carries no GeoKey directory");
                crate::geo::CrsResolution {
                    projection: Projection::Missing,
                    is_geographic: false,
                }
            }
        };

        let affine = AffineTransform::resolve(
            decoded.transformation.as_deref(),
            decoded.pixel_scale.as_deref(),
            decoded.tie_point.as_deref(),
        );
        if affine.is_none() {
            warn!("No usable affine tags, raster will not be georeferenced");
        }
        let bounds = affine.map(|t| t.bounds(decoded.width, decoded.height));

        let no_data_value = match &decoded.no_data {
            Some(marker) => {
                let value = marker.to_f64();
                if value.is_none() {
                    warn!("Unparseable nodata marker {:?}, ignoring", marker);
                }
                value
            }
            None => None,
        };

        let palette = decoded.color_map.as_deref().and_then(Palette::from_color_map);
        if let Some(p) = &palette {
            debug!("Indexed-color raster with {} palette entries", p.len());
        }

        let pixel_depth = usize::from((decoded.bits_per_sample + 7) / 8);

        let model = RasterModel {
            width: decoded.width,
            height: decoded.height,
            pixel_depth,
            sample_format: decoded.sample_format,
            projection: crs.projection,
            is_geographic: crs.is_geographic,
            affine,
            bounds,
            no_data_value,
            palette,
            bands: decoded.rasters,
            band_stats: None,
        };

        let band_stats = if options.calc_stats {
            Some(model.calculate_band_stats())
        } else {
            None
        };

        Ok(RasterModel { band_stats, ..model })
    }

    /// Per-band statistics over the full extent, nodata excluded
    ///
    /// A band that holds nothing but nodata has no statistics.
    fn calculate_band_stats(&self) -> Vec<Option<Stats>> {
        info!("Calculating statistics for {} band(s)", self.bands.len());
        let stats_options = StatsOptions::default();

        self.bands
            .iter()
            .map(|band| {
                let samples = (0..band.len())
                    .filter_map(|i| band.get(i))
                    .filter(|v| Some(*v) != self.no_data_value);
                compute_stats(samples, &stats_options)
            })
            .collect()
    }

    /// Band count
    pub fn number_of_rasters(&self) -> usize {
        self.bands.len()
    }

    /// Raster width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per sample
    pub fn pixel_depth(&self) -> usize {
        self.pixel_depth
    }

    /// Sample data interpretation
    pub fn sample_format(&self) -> SampleFormat {
        self.sample_format
    }

    /// The resolved spatial reference
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Whether the resolved system is geographic (lat/long)
    pub fn is_geographic(&self) -> bool {
        self.is_geographic
    }

    /// The pixel-to-geographic transform, when one was resolved
    pub fn affine(&self) -> Option<&AffineTransform> {
        self.affine.as_ref()
    }

    /// Geographic bounding box, when georeferenced
    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.bounds.as_ref()
    }

    /// Geographic units per pixel column, when georeferenced
    pub fn pixel_width(&self) -> Option<f64> {
        self.affine.map(|t| t.pixel_width())
    }

    /// Geographic units per pixel row, when georeferenced
    pub fn pixel_height(&self) -> Option<f64> {
        self.affine.map(|t| t.pixel_height())
    }

    /// Declared nodata value, if any
    pub fn no_data_value(&self) -> Option<f64> {
        self.no_data_value
    }

    /// RGBA palette for indexed-color rasters
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// All band buffers
    pub fn bands(&self) -> &[SampleBuffer] {
        &self.bands
    }

    /// One band buffer by index
    pub fn band(&self, index: usize) -> Option<&SampleBuffer> {
        self.bands.get(index)
    }

    /// Construction-time band statistics, when requested
    pub fn band_stats(&self) -> Option<&[Option<Stats>]> {
        self.band_stats.as_deref()
    }

    /// Resolve a window request to clipped pixel bounds
    pub fn map_window(&self, window: Option<&Window>) -> RasterResult<PixelWindow> {
        extract::map_window(window, self.width, self.height, self.affine.as_ref())
    }

    /// Extract windowed, optionally resampled values from all bands
    ///
    /// Synchronous and side-effect-free; the output is always freshly
    /// allocated. See [`ExtractOptions`] for the window, target-shape and
    /// resampling controls.
    pub fn get_values(&self, options: &ExtractOptions) -> RasterResult<WindowValues> {
        extract::extract_values(self, options)
    }
}
