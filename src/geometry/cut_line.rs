use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::segment_parameter;
use crate::math::polygon_2d::left_normal;
use crate::math::{Point2, Vector2, TOLERANCE};

/// An oriented cut segment drawn from `start` to `end`.
///
/// The left-pointing unit normal defines the positive half-plane. The
/// segment's parametric span `u ∈ [0, 1]` bounds which crossings count as
/// cuts, widened on both ends by a margin given in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutLine {
    start: Point2,
    end: Point2,
    direction: Vector2,
    normal: Vector2,
    length: f64,
}

impl CutLine {
    /// Creates a cut line between two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroLengthCut` if the points coincide.
    pub fn new(start: Point2, end: Point2) -> Result<Self> {
        let d = end - start;
        let length = d.norm();
        if length < TOLERANCE {
            return Err(GeometryError::ZeroLengthCut.into());
        }
        let direction = d / length;
        Ok(Self {
            start,
            end,
            direction,
            normal: left_normal(&direction),
            length,
        })
    }

    /// Start point of the drawn segment.
    #[must_use]
    pub fn start(&self) -> &Point2 {
        &self.start
    }

    /// End point of the drawn segment.
    #[must_use]
    pub fn end(&self) -> &Point2 {
        &self.end
    }

    /// Unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Unit normal pointing into the positive half-plane.
    #[must_use]
    pub fn normal(&self) -> &Vector2 {
        &self.normal
    }

    /// Length of the drawn segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Signed distance of `p` from the infinite line; positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, p: &Point2) -> f64 {
        (p - self.start).dot(&self.normal)
    }

    /// Normalized position of the projection of `p` along the segment.
    #[must_use]
    pub fn parameter_of(&self, p: &Point2) -> f64 {
        segment_parameter(p, &self.start, &self.direction, self.length)
    }

    /// Returns `true` if `p` projects within the segment extended by `margin`
    /// world units at each end.
    #[must_use]
    pub fn spans(&self, p: &Point2, margin: f64) -> bool {
        let u = self.parameter_of(p);
        let slack = margin / self.length;
        u >= -slack && u <= 1.0 + slack
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_points_left() {
        let line = CutLine::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0)).unwrap();
        assert_relative_eq!(line.normal().y, 1.0);
        assert!(line.signed_distance(&Point2::new(1.0, 3.0)) > 0.0);
        assert!(line.signed_distance(&Point2::new(1.0, -3.0)) < 0.0);
    }

    #[test]
    fn zero_length_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(CutLine::new(p, p).is_err());
    }

    #[test]
    fn spans_with_margin() {
        let line = CutLine::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).unwrap();
        assert!(line.spans(&Point2::new(5.0, 4.0), 0.0));
        assert!(!line.spans(&Point2::new(11.0, 0.0), 0.0));
        assert!(line.spans(&Point2::new(11.0, 0.0), 2.0));
        assert!(line.spans(&Point2::new(-1.5, 0.0), 2.0));
        assert!(!line.spans(&Point2::new(-2.5, 0.0), 2.0));
    }
}
