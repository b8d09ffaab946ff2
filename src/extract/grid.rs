//! Extraction output containers
//!
//! Extraction always returns freshly allocated row-major grids, one per
//! band, shaped by the target (or native window) dimensions. Whether a
//! request produces scalar samples or palette colors is decided once at
//! model construction, so the output is a tagged variant rather than a
//! per-pixel decision.

/// One band's extracted samples in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct ValueGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl ValueGrid {
    /// Create a grid from row-major values
    pub(crate) fn new(width: usize, height: usize, values: Vec<f64>) -> Self {
        ValueGrid { width, height, values }
    }

    /// Grid width (columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (rows)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the grid holds no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a sample, or `None` when out of bounds
    pub fn get(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// Flattened, order-preserving view of the samples
    ///
    /// This is the streaming contract the statistics collaborator
    /// consumes; it never duplicates the buffer.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Iterate the grid one row slice at a time
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.height).map(move |row| {
            &self.values[row * self.width..(row + 1) * self.width]
        })
    }

    /// The raw row-major samples
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// One band's extracted palette colors in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    width: usize,
    height: usize,
    colors: Vec<[u8; 4]>,
}

impl ColorGrid {
    /// Create a grid from row-major colors
    pub(crate) fn new(width: usize, height: usize, colors: Vec<[u8; 4]>) -> Self {
        ColorGrid { width, height, colors }
    }

    /// Grid width (columns)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height (rows)
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the grid holds no colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get a color, or `None` when out of bounds
    pub fn get(&self, col: usize, row: usize) -> Option<[u8; 4]> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.colors.get(row * self.width + col).copied()
    }

    /// The raw row-major colors
    pub fn colors(&self) -> &[[u8; 4]] {
        &self.colors
    }
}

/// Extracted window values for all bands
#[derive(Debug, Clone, PartialEq)]
pub enum WindowValues {
    /// Scalar samples, one grid per band
    Scalar(Vec<ValueGrid>),
    /// Palette colors, one grid per band
    Palette(Vec<ColorGrid>),
}

impl WindowValues {
    /// Number of bands in the output
    pub fn len(&self) -> usize {
        match self {
            WindowValues::Scalar(grids) => grids.len(),
            WindowValues::Palette(grids) => grids.len(),
        }
    }

    /// Whether the output holds no bands
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Output shape as (bands, rows, columns)
    pub fn shape(&self) -> (usize, usize, usize) {
        match self {
            WindowValues::Scalar(grids) => {
                let (h, w) = grids.first().map_or((0, 0), |g| (g.height(), g.width()));
                (grids.len(), h, w)
            }
            WindowValues::Palette(grids) => {
                let (h, w) = grids.first().map_or((0, 0), |g| (g.height(), g.width()));
                (grids.len(), h, w)
            }
        }
    }

    /// The scalar grids, if this is a scalar extraction
    pub fn as_scalar(&self) -> Option<&[ValueGrid]> {
        match self {
            WindowValues::Scalar(grids) => Some(grids),
            WindowValues::Palette(_) => None,
        }
    }

    /// The color grids, if this is a palette extraction
    pub fn as_palette(&self) -> Option<&[ColorGrid]> {
        match self {
            WindowValues::Palette(grids) => Some(grids),
            WindowValues::Scalar(_) => None,
        }
    }
}
