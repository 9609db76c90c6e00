use tracing::debug;

use crate::geometry::PolygonRing;
use crate::math::Point2;

/// Rings at or below this size are primitive shapes and never decimated.
const PRIMITIVE_VERTEX_COUNT: usize = 8;

/// Samples closer than this to their successor are dropped.
const MIN_SAMPLE_SPACING: f64 = 0.3;

/// Decimates a ring to a vertex budget for use as a collision shape.
///
/// Only meant for the physics-bound copy of a fragment; the rendered ring is
/// never simplified.
pub struct Simplify<'a> {
    ring: &'a PolygonRing,
    max_vertices: usize,
}

impl<'a> Simplify<'a> {
    /// Creates a new simplification with a budget of 200 vertices.
    #[must_use]
    pub fn new(ring: &'a PolygonRing) -> Self {
        Self {
            ring,
            max_vertices: 200,
        }
    }

    /// Sets the vertex budget.
    #[must_use]
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Executes the simplification.
    ///
    /// Falls back to a copy of the input whenever decimation would leave
    /// fewer than 3 vertices.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn execute(&self) -> PolygonRing {
        let verts = self.ring.vertices();
        let n = verts.len();
        if n <= PRIMITIVE_VERTEX_COUNT || n <= self.max_vertices {
            return self.ring.clone();
        }

        let target = self.max_vertices.min((n / 2).max(20));
        let stride = n as f64 / target as f64;

        let mut sampled: Vec<Point2> = Vec::with_capacity(target);
        let mut cursor = 0.0_f64;
        while (cursor as usize) < n {
            sampled.push(verts[cursor as usize]);
            cursor += stride;
        }

        let m = sampled.len();
        let spaced: Vec<Point2> = (0..m)
            .filter(|&i| i == 0 || nalgebra::distance(&sampled[i], &sampled[(i + 1) % m]) > MIN_SAMPLE_SPACING)
            .map(|i| sampled[i])
            .collect();

        match PolygonRing::new(spaced) {
            Ok(ring) => {
                debug!(from = n, to = ring.len(), "simplified collision ring");
                ring
            }
            Err(_) => self.ring.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn circle(n: u32, r: f64) -> PolygonRing {
        PolygonRing::new((0..n).map(|i| {
            let a = f64::from(i) * std::f64::consts::TAU / f64::from(n);
            Point2::new(r * a.cos(), r * a.sin())
        }))
        .unwrap()
    }

    #[test]
    fn primitive_shapes_untouched() {
        let square = PolygonRing::from_xy(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap();
        assert_eq!(Simplify::new(&square).with_max_vertices(3).execute(), square);
    }

    #[test]
    fn within_budget_untouched() {
        let ring = circle(64, 10.0);
        assert_eq!(Simplify::new(&ring).execute(), ring);
    }

    #[test]
    fn over_budget_is_decimated() {
        let ring = circle(400, 100.0);
        let out = Simplify::new(&ring).with_max_vertices(80).execute();
        // target = min(80, max(20, 200)) = 80
        assert_eq!(out.len(), 80);
        assert_relative_eq!(out.area(), ring.area(), max_relative = 0.01);
    }

    #[test]
    fn budget_caps_target() {
        let ring = circle(100, 50.0);
        let out = Simplify::new(&ring).with_max_vertices(10).execute();
        // target = min(10, max(20, 50)) = 10
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn tight_cluster_falls_back_to_original() {
        // 30 vertices packed into a tiny triangle: every sample lands within
        // the spacing threshold of its neighbour.
        let mut pts = Vec::new();
        for i in 0..10 {
            let t = f64::from(i) * 0.011;
            pts.push(Point2::new(t, 0.0));
        }
        for i in 0..10 {
            let t = f64::from(i) * 0.011;
            pts.push(Point2::new(0.11 - t * 0.5, t));
        }
        for i in 0..10 {
            let t = f64::from(i) * 0.011;
            pts.push(Point2::new(0.055 - t * 0.5, 0.11 - t));
        }
        let ring = PolygonRing::new(pts).unwrap();
        let out = Simplify::new(&ring).with_max_vertices(10).execute();
        assert_eq!(out, ring);
    }
}
