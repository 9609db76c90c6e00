use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::{extents, polygon_area, polygon_centroid, signed_area};
use crate::math::{Isometry2, Point2, Vector2, VERTEX_MERGE_DISTANCE};

use super::Aabb2;

/// A closed, ordered polygon boundary.
///
/// The last vertex connects back to the first. Construction removes
/// consecutive vertices closer than [`VERTEX_MERGE_DISTANCE`] (including the
/// wrap-around pair) and keeps the caller's winding order untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing {
    vertices: Vec<Point2>,
}

impl PolygonRing {
    /// Builds a ring from an ordered vertex sequence.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateRing` if fewer than 3 vertices remain
    /// after de-duplication.
    pub fn new(points: impl IntoIterator<Item = Point2>) -> Result<Self> {
        let mut vertices: Vec<Point2> = Vec::new();
        for p in points {
            if let Some(last) = vertices.last() {
                if nalgebra::distance(last, &p) < VERTEX_MERGE_DISTANCE {
                    continue;
                }
            }
            vertices.push(p);
        }
        while vertices.len() > 1 {
            let (first, last) = (vertices[0], vertices[vertices.len() - 1]);
            if nalgebra::distance(&first, &last) < VERTEX_MERGE_DISTANCE {
                vertices.pop();
            } else {
                break;
            }
        }
        if vertices.len() < 3 {
            return Err(GeometryError::DegenerateRing {
                vertex_count: vertices.len(),
            }
            .into());
        }
        Ok(Self { vertices })
    }

    /// Builds a ring from `(x, y)` pairs.
    ///
    /// # Errors
    ///
    /// Same as [`PolygonRing::new`].
    pub fn from_xy(coords: &[(f64, f64)]) -> Result<Self> {
        Self::new(coords.iter().map(|&(x, y)| Point2::new(x, y)))
    }

    /// Returns the ordered vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }

    /// Consumes the ring, returning its vertices.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point2> {
        self.vertices
    }

    /// Returns the number of vertices (always at least 3).
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`: a ring holds at least 3 vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Signed shoelace area; positive for counter-clockwise rings.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.vertices)
    }

    /// Unsigned shoelace area. Exactly `0.0` for collinear rings.
    #[must_use]
    pub fn area(&self) -> f64 {
        polygon_area(&self.vertices)
    }

    /// Returns `true` if the vertices are listed counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Axis-aligned bounding extents of the ring.
    #[must_use]
    pub fn bounding_extents(&self) -> Aabb2 {
        // A ring is never empty, so `extents` always yields a value.
        let (min, max) = extents(&self.vertices).unwrap_or((Point2::origin(), Point2::origin()));
        Aabb2 { min, max }
    }

    /// Vertices per unit area, or `None` if the ring encloses no area.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn vertex_density(&self) -> Option<f64> {
        let area = self.area();
        if area > 0.0 {
            Some(self.vertices.len() as f64 / area)
        } else {
            None
        }
    }

    /// Area centroid, or `None` if the ring encloses no area.
    #[must_use]
    pub fn centroid(&self) -> Option<Point2> {
        polygon_centroid(&self.vertices)
    }

    /// Returns a copy with every vertex mapped through `iso`.
    #[must_use]
    pub fn transformed(&self, iso: &Isometry2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| iso.transform_point(p)).collect(),
        }
    }

    /// Returns a copy with every vertex mapped through the inverse of `iso`.
    #[must_use]
    pub fn inverse_transformed(&self, iso: &Isometry2) -> Self {
        Self {
            vertices: self
                .vertices
                .iter()
                .map(|p| iso.inverse_transform_point(p))
                .collect(),
        }
    }

    /// Returns a copy translated by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector2) -> Self {
        Self {
            vertices: self.vertices.iter().map(|p| p + offset).collect(),
        }
    }

    /// Returns a copy with the opposite winding order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Self { vertices }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn keeps_caller_winding() {
        let ring = PolygonRing::from_xy(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]).unwrap();
        assert!(!ring.is_ccw());
        assert_eq!(ring.vertices()[1], p(0.0, 1.0));
    }

    #[test]
    fn drops_consecutive_duplicates() {
        let ring = PolygonRing::new(vec![
            p(0.0, 0.0),
            p(0.001, 0.0),
            p(4.0, 0.0),
            p(4.0, 4.0),
            p(4.0, 4.005),
            p(0.0, 4.0),
            p(0.0, 0.0),
        ])
        .unwrap();
        assert_eq!(ring.len(), 4);
        assert_relative_eq!(ring.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn non_consecutive_repeat_is_kept() {
        // A bow-tie touching itself at the origin keeps both visits.
        let ring = PolygonRing::from_xy(&[
            (0.0, 0.0),
            (1.0, 1.0),
            (-1.0, 1.0),
            (0.0, 0.0),
            (1.0, -1.0),
            (-1.0, -1.0),
        ])
        .unwrap();
        assert_eq!(ring.len(), 6);
    }

    #[test]
    fn too_few_vertices_is_degenerate() {
        let err = PolygonRing::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.001)]).unwrap_err();
        assert!(matches!(
            err,
            crate::PolyshardError::Geometry(GeometryError::DegenerateRing { vertex_count: 2 })
        ));
    }

    #[test]
    fn density_and_extents() {
        let ring = PolygonRing::from_xy(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]).unwrap();
        assert_relative_eq!(ring.vertex_density().unwrap(), 1.0);
        let bb = ring.bounding_extents();
        assert_relative_eq!(bb.min.x, 0.0);
        assert_relative_eq!(bb.max.y, 2.0);
    }

    #[test]
    fn collinear_ring_has_no_density() {
        let ring = PolygonRing::from_xy(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
        assert!(ring.area() == 0.0);
        assert!(ring.vertex_density().is_none());
        assert!(ring.centroid().is_none());
    }

    #[test]
    fn transform_roundtrip() {
        let ring = PolygonRing::from_xy(&[(0.0, 0.0), (2.0, 0.0), (1.0, 3.0)]).unwrap();
        let iso = Isometry2::new(Vector2::new(5.0, -1.0), 0.7);
        let back = ring.transformed(&iso).inverse_transformed(&iso);
        for (a, b) in ring.vertices().iter().zip(back.vertices()) {
            assert_relative_eq!(a.x, b.x, epsilon = 1e-9);
            assert_relative_eq!(a.y, b.y, epsilon = 1e-9);
        }
        assert_relative_eq!(ring.transformed(&iso).area(), ring.area(), epsilon = 1e-9);
    }
}
