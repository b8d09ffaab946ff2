//! Pixel-to-geographic affine transform
//!
//! A GeoTIFF georeferences its grid either with a full transformation
//! matrix or with a pixel scale plus one tie point. Both collapse to the
//! same six coefficients mapping pixel (column, row) to geographic (x, y):
//!
//! ```text
//! geo_x = a * col + b * row + c
//! geo_y = d * col + e * row + f
//! ```
//!
//! Image rows increase downward while geographic y increases upward, so
//! the vertical scale `e` synthesized from a pixel scale is negated.

use log::debug;

use crate::geo::bbox::BoundingBox;

/// Six-coefficient affine transform from pixel to geographic space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    /// X scale per column
    pub a: f64,
    /// X shear per row
    pub b: f64,
    /// X translation (geographic x of pixel (0,0))
    pub c: f64,
    /// Y shear per column
    pub d: f64,
    /// Y scale per row (negative for north-up rasters)
    pub e: f64,
    /// Y translation (geographic y of pixel (0,0))
    pub f: f64,
}

impl AffineTransform {
    /// Create a transform from explicit coefficients
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        AffineTransform { a, b, c, d, e, f }
    }

    /// Build the transform from a ModelTransformation matrix
    ///
    /// The matrix is row-major 4x4; only the first two rows carry the
    /// 2-D mapping and they are used verbatim.
    pub fn from_transformation(matrix: &[f64]) -> Option<Self> {
        if matrix.len() < 8 {
            return None;
        }
        Some(AffineTransform {
            a: matrix[0],
            b: matrix[1],
            c: matrix[3],
            d: matrix[4],
            e: matrix[5],
            f: matrix[7],
        })
    }

    /// Synthesize the transform from ModelPixelScale and ModelTiepoint
    ///
    /// The tie point (i, j) -> (x, y) anchors the grid so that the tie
    /// pixel maps exactly to its stated coordinate. The vertical scale is
    /// negated here; that sign flip is what makes the top pixel row
    /// correspond to the maximum geographic y.
    pub fn from_scale_and_tie_point(scale: &[f64], tie_point: &[f64]) -> Option<Self> {
        if scale.len() < 2 || tie_point.len() < 6 {
            return None;
        }

        let (dx, dy) = (scale[0], scale[1]);
        let (i, j) = (tie_point[0], tie_point[1]);
        let (x, y) = (tie_point[3], tie_point[4]);

        Some(AffineTransform {
            a: dx,
            b: 0.0,
            c: x - i * dx,
            d: 0.0,
            e: -dy,
            f: y + j * dy,
        })
    }

    /// Resolve the transform from whichever tags the source carried
    ///
    /// A full transformation matrix subsumes scale plus tie point and wins
    /// when present. Returns `None` when neither form is available; the
    /// raster is then served without georeferencing.
    pub fn resolve(
        transformation: Option<&[f64]>,
        pixel_scale: Option<&[f64]>,
        tie_point: Option<&[f64]>,
    ) -> Option<Self> {
        if let Some(matrix) = transformation {
            if let Some(transform) = Self::from_transformation(matrix) {
                debug!("Affine transform taken from transformation matrix");
                return Some(transform);
            }
        }

        match (pixel_scale, tie_point) {
            (Some(scale), Some(tie)) => {
                let transform = Self::from_scale_and_tie_point(scale, tie);
                if transform.is_some() {
                    debug!("Affine transform synthesized from pixel scale and tie point");
                }
                transform
            }
            _ => None,
        }
    }

    /// Map pixel (column, row) to geographic (x, y)
    pub fn forward(&self, col: f64, row: f64) -> (f64, f64) {
        (
            self.a * col + self.b * row + self.c,
            self.d * col + self.e * row + self.f,
        )
    }

    /// Map geographic (x, y) back to fractional pixel (column, row)
    ///
    /// Returns `None` for a degenerate (non-invertible) transform.
    pub fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < 1e-10 {
            return None;
        }

        let dx = x - self.c;
        let dy = y - self.f;
        let col = (self.e * dx - self.b * dy) / det;
        let row = (self.a * dy - self.d * dx) / det;
        Some((col, row))
    }

    /// Geographic units per pixel column, as a positive magnitude
    pub fn pixel_width(&self) -> f64 {
        self.a.abs()
    }

    /// Geographic units per pixel row, as a positive magnitude
    pub fn pixel_height(&self) -> f64 {
        self.e.abs()
    }

    /// Bounding box of a raster of the given pixel dimensions
    ///
    /// Applies the transform to pixel corners (0,0) and (width,height) and
    /// normalizes per axis. Because of the vertical sign flip the top
    /// pixel row lands on `max_y`, not `min_y`.
    pub fn bounds(&self, width: usize, height: usize) -> BoundingBox {
        let origin = self.forward(0.0, 0.0);
        let opposite = self.forward(width as f64, height as f64);
        BoundingBox::from_corners(origin, opposite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transformation_matrix_is_used_verbatim() {
        let matrix = [
            30.0, 0.0, 0.0, 189600.0,
            0.0, -30.0, 0.0, 4904100.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        let transform = AffineTransform::from_transformation(&matrix).unwrap();
        assert_eq!(transform.a, 30.0);
        assert_eq!(transform.e, -30.0);
        assert_eq!(transform.c, 189600.0);
        assert_eq!(transform.f, 4904100.0);
    }

    #[test]
    fn scale_and_tie_point_flip_vertical_scale() {
        let scale = [30.0, 30.0, 0.0];
        let tie_point = [0.0, 0.0, 0.0, 189600.0, 4904100.0, 0.0];
        let transform = AffineTransform::from_scale_and_tie_point(&scale, &tie_point).unwrap();

        assert_eq!(transform.a, 30.0);
        assert_eq!(transform.e, -30.0);
        assert_eq!(transform.b, 0.0);
        assert_eq!(transform.d, 0.0);
        // The tie-point pixel maps exactly to its stated coordinate
        assert_eq!(transform.forward(0.0, 0.0), (189600.0, 4904100.0));
    }

    #[test]
    fn off_origin_tie_point_is_anchored_exactly() {
        let scale = [2.0, 4.0, 0.0];
        let tie_point = [10.0, 5.0, 0.0, 100.0, 200.0, 0.0];
        let transform = AffineTransform::from_scale_and_tie_point(&scale, &tie_point).unwrap();
        assert_eq!(transform.forward(10.0, 5.0), (100.0, 200.0));
    }

    #[test]
    fn matrix_wins_over_scale_and_tie_point() {
        let matrix = [
            1.0, 0.0, 0.0, 7.0,
            0.0, -1.0, 0.0, 9.0,
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        let scale = [30.0, 30.0, 0.0];
        let tie_point = [0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        let transform = AffineTransform::resolve(
            Some(&matrix), Some(&scale), Some(&tie_point)).unwrap();
        assert_eq!(transform.c, 7.0);
        assert_eq!(transform.a, 1.0);
    }

    #[test]
    fn missing_tags_resolve_to_none() {
        assert!(AffineTransform::resolve(None, None, None).is_none());
        let scale = [30.0, 30.0, 0.0];
        assert!(AffineTransform::resolve(None, Some(&scale), None).is_none());
    }

    #[test]
    fn bounds_put_top_row_at_max_y() {
        let scale = [30.0, 30.0, 0.0];
        let tie_point = [0.0, 0.0, 0.0, 189600.0, 4904100.0, 0.0];
        let transform = AffineTransform::from_scale_and_tie_point(&scale, &tie_point).unwrap();
        let bounds = transform.bounds(7921, 8031);

        assert_eq!(bounds.min_x, 189600.0);
        assert_eq!(bounds.max_x, 427230.0);
        assert_eq!(bounds.min_y, 4663170.0);
        assert_eq!(bounds.max_y, 4904100.0);
        assert_eq!(transform.pixel_width(), 30.0);
        assert_eq!(transform.pixel_height(), 30.0);
    }

    #[test]
    fn inverse_round_trips() {
        let transform = AffineTransform::new(30.0, 0.0, 189600.0, 0.0, -30.0, 4904100.0);
        let (x, y) = transform.forward(123.0, 456.0);
        let (col, row) = transform.inverse(x, y).unwrap();
        assert_relative_eq!(col, 123.0, max_relative = 1e-12);
        assert_relative_eq!(row, 456.0, max_relative = 1e-12);
    }

    #[test]
    fn degenerate_transform_has_no_inverse() {
        let transform = AffineTransform::new(0.0, 0.0, 1.0, 0.0, 0.0, 2.0);
        assert!(transform.inverse(5.0, 5.0).is_none());
    }
}
