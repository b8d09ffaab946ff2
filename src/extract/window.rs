//! Window specification and mapping
//!
//! Callers describe the sub-region they want either in pixel space or as
//! a geographic bounding box; both forms resolve here to clipped integer
//! pixel bounds against the raster's dimensions. A request that falls
//! entirely outside the raster resolves to an explicitly empty window,
//! never an error.

use log::debug;

use crate::geo::{AffineTransform, BoundingBox};
use crate::raster::errors::{RasterError, RasterResult};

/// A rectangular sub-region request, in pixel or geographic coordinates
///
/// Request-scoped; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Window {
    /// Pixel-space margins measured inward from each raster edge
    ///
    /// `left` and `top` are offsets from the left/top edges; `right` and
    /// `bottom` are measured inward from the right/bottom edges, so a
    /// window of `{0, 0, 0, 0}` is the full raster. Values may exceed
    /// the raster dimensions; the result is clipped, not rejected.
    Edges { left: i64, top: i64, right: i64, bottom: i64 },
    /// Geographic bounds, converted through the inverse affine and
    /// rounded outward to the enclosing integer pixel grid
    Bounds(BoundingBox),
}

impl Window {
    /// Pixel-space window cropping the given margins from each edge
    pub fn edges(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Window::Edges { left, top, right, bottom }
    }

    /// Geographic-space window
    pub fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Window::Bounds(BoundingBox::new(min_x, min_y, max_x, max_y))
    }
}

/// Clipped absolute pixel bounds, right/bottom exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelWindow {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl PixelWindow {
    /// The full extent of a raster of the given dimensions
    pub fn full(width: usize, height: usize) -> Self {
        PixelWindow { left: 0, top: 0, right: width, bottom: height }
    }

    /// Window width in pixels
    pub fn width(&self) -> usize {
        self.right - self.left
    }

    /// Window height in pixels
    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Whether the window covers zero rows or columns
    pub fn is_empty(&self) -> bool {
        self.left == self.right || self.top == self.bottom
    }
}

/// Resolve a window request to clipped pixel bounds
///
/// No window means the full raster extent. Geographic windows need a
/// resolved, invertible affine; requesting one on an ungeoreferenced
/// raster is a caller error.
pub fn map_window(
    window: Option<&Window>,
    width: usize,
    height: usize,
    affine: Option<&AffineTransform>,
) -> RasterResult<PixelWindow> {
    let window = match window {
        Some(w) => w,
        None => return Ok(PixelWindow::full(width, height)),
    };

    let clipped = match window {
        Window::Edges { left, top, right, bottom } => {
            clip_edges(*left, *top, *right, *bottom, width, height)
        }
        Window::Bounds(bbox) => {
            let affine = affine.ok_or(RasterError::MissingGeoreference)?;
            clip_bounds(bbox, width, height, affine)?
        }
    };

    if clipped.is_empty() {
        debug!("Window request clipped to an empty region");
    }
    Ok(clipped)
}

/// Clip edge margins to absolute bounds within the raster
fn clip_edges(left: i64, top: i64, right: i64, bottom: i64, width: usize, height: usize) -> PixelWindow {
    let w = width as i64;
    let h = height as i64;

    let x0 = left.clamp(0, w);
    let x1 = w.saturating_sub(right).clamp(x0, w);
    let y0 = top.clamp(0, h);
    let y1 = h.saturating_sub(bottom).clamp(y0, h);

    PixelWindow {
        left: x0 as usize,
        top: y0 as usize,
        right: x1 as usize,
        bottom: y1 as usize,
    }
}

/// Convert geographic bounds to the enclosing pixel window
///
/// All four corners go through the inverse affine so a vertical flip (or
/// shear) cannot swap the min/max ordering; the fractional result is
/// rounded outward (floor on the min corner, ceil on the max) before
/// clipping.
fn clip_bounds(
    bbox: &BoundingBox,
    width: usize,
    height: usize,
    affine: &AffineTransform,
) -> RasterResult<PixelWindow> {
    let corners = [
        (bbox.min_x, bbox.min_y),
        (bbox.min_x, bbox.max_y),
        (bbox.max_x, bbox.min_y),
        (bbox.max_x, bbox.max_y),
    ];

    let mut min_col = f64::INFINITY;
    let mut max_col = f64::NEG_INFINITY;
    let mut min_row = f64::INFINITY;
    let mut max_row = f64::NEG_INFINITY;

    for (x, y) in corners {
        let (col, row) = affine.inverse(x, y).ok_or(RasterError::DegenerateTransform)?;
        min_col = min_col.min(col);
        max_col = max_col.max(col);
        min_row = min_row.min(row);
        max_row = max_row.max(row);
    }

    let w = width as i64;
    let h = height as i64;
    let x0 = (min_col.floor() as i64).clamp(0, w);
    let x1 = (max_col.ceil() as i64).clamp(x0, w);
    let y0 = (min_row.floor() as i64).clamp(0, h);
    let y1 = (max_row.ceil() as i64).clamp(y0, h);

    Ok(PixelWindow {
        left: x0 as usize,
        top: y0 as usize,
        right: x1 as usize,
        bottom: y1 as usize,
    })
}
