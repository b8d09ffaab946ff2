//! Bounding box structure for georeferenced extents

/// A bounding box in geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    /// Create a bounding box from two opposite corners, normalizing
    /// min/max per axis
    pub fn from_corners(first: (f64, f64), second: (f64, f64)) -> Self {
        BoundingBox {
            min_x: first.0.min(second.0),
            min_y: first.1.min(second.1),
            max_x: first.0.max(second.0),
            max_y: first.1.max(second.1),
        }
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if this bounding box contains a coordinate
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x &&
            y >= self.min_y && y <= self.max_y
    }
}
