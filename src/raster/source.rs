//! Interface to the external decoding collaborator
//!
//! Binary TIFF parsing and strip/tile decompression happen elsewhere; this
//! module defines the value that collaborator hands over, one per source,
//! from which a [`RasterModel`](crate::raster::RasterModel) is built.

use crate::geo::GeoKeyEntry;

/// Interpretation of sample data, from TIFF sample-format codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    /// Unsigned integer data
    Unsigned,
    /// Signed integer data
    Signed,
    /// IEEE floating point data
    Float,
}

impl SampleFormat {
    /// Map a TIFF sample-format code to the enum
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(SampleFormat::Unsigned),
            2 => Some(SampleFormat::Signed),
            3 => Some(SampleFormat::Float),
            _ => None,
        }
    }
}

/// One band's samples in row-major order
///
/// The decoder produces whichever concrete type the file stored; every
/// variant widens losslessly into `f64` for extraction and statistics.
#[derive(Debug, Clone)]
pub enum SampleBuffer {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    U32(Vec<u32>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl SampleBuffer {
    /// Number of samples in the buffer
    pub fn len(&self) -> usize {
        match self {
            SampleBuffer::U8(v) => v.len(),
            SampleBuffer::I8(v) => v.len(),
            SampleBuffer::U16(v) => v.len(),
            SampleBuffer::I16(v) => v.len(),
            SampleBuffer::U32(v) => v.len(),
            SampleBuffer::I32(v) => v.len(),
            SampleBuffer::F32(v) => v.len(),
            SampleBuffer::F64(v) => v.len(),
        }
    }

    /// Whether the buffer holds no samples
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a sample widened to `f64`, or `None` when out of bounds
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            SampleBuffer::U8(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::I8(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::U16(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::I16(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::U32(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::I32(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::F32(v) => v.get(index).map(|&s| f64::from(s)),
            SampleBuffer::F64(v) => v.get(index).copied(),
        }
    }

    /// Storage width of one sample in bits
    pub fn bits_per_sample(&self) -> u16 {
        match self {
            SampleBuffer::U8(_) | SampleBuffer::I8(_) => 8,
            SampleBuffer::U16(_) | SampleBuffer::I16(_) => 16,
            SampleBuffer::U32(_) | SampleBuffer::I32(_) | SampleBuffer::F32(_) => 32,
            SampleBuffer::F64(_) => 64,
        }
    }

    /// Sample format of the buffer's element type
    pub fn sample_format(&self) -> SampleFormat {
        match self {
            SampleBuffer::U8(_) | SampleBuffer::U16(_) | SampleBuffer::U32(_) => SampleFormat::Unsigned,
            SampleBuffer::I8(_) | SampleBuffer::I16(_) | SampleBuffer::I32(_) => SampleFormat::Signed,
            SampleBuffer::F32(_) | SampleBuffer::F64(_) => SampleFormat::Float,
        }
    }
}

/// Nodata marker as the decoder found it
///
/// The GDAL_NODATA tag is ASCII in the wild; decoders that interpret it
/// hand over a number, the rest hand over the raw text.
#[derive(Debug, Clone, PartialEq)]
pub enum NoData {
    Number(f64),
    Text(String),
}

impl NoData {
    /// The nodata value as a number, parsing the text form
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            NoData::Number(v) => Some(*v),
            NoData::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

/// A decoded raster as handed over by the external decoder
///
/// All georeferencing inputs are optional: a raster without them is still
/// served, just without geographic addressing.
#[derive(Debug, Clone)]
pub struct DecodedRaster {
    /// One buffer per band, each row-major `height * width`
    pub rasters: Vec<SampleBuffer>,
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
    /// Bits per sample as declared by the source
    pub bits_per_sample: u16,
    /// Sample data interpretation
    pub sample_format: SampleFormat,
    /// Decoded GeoKey directory entries
    pub geo_keys: Option<Vec<GeoKeyEntry>>,
    /// ModelPixelScale values (dx, dy, dz)
    pub pixel_scale: Option<Vec<f64>>,
    /// ModelTiepoint values (i, j, k, x, y, z, ...)
    pub tie_point: Option<Vec<f64>>,
    /// ModelTransformation values, row-major 4x4
    pub transformation: Option<Vec<f64>>,
    /// Nodata marker, numeric or raw text
    pub no_data: Option<NoData>,
    /// TIFF ColorMap: all reds, then greens, then blues, 16-bit each
    pub color_map: Option<Vec<u16>>,
}

impl DecodedRaster {
    /// Create a decoded raster with no geo-metadata attached
    ///
    /// Bit depth and sample format are taken from the first band; the
    /// optional metadata fields start out empty and are filled in by the
    /// decoder as it encounters the corresponding tags.
    pub fn new(rasters: Vec<SampleBuffer>, width: usize, height: usize) -> Self {
        let bits_per_sample = rasters.first().map_or(8, SampleBuffer::bits_per_sample);
        let sample_format = rasters.first().map_or(SampleFormat::Unsigned, SampleBuffer::sample_format);

        DecodedRaster {
            rasters,
            width,
            height,
            bits_per_sample,
            sample_format,
            geo_keys: None,
            pixel_scale: None,
            tie_point: None,
            transformation: None,
            no_data: None,
            color_map: None,
        }
    }
}
