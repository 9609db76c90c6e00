use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{OperationError, Result};
use crate::geometry::PolygonRing;
use crate::math::Point2;

/// Segment count used for circle approximations.
const CIRCLE_SEGMENTS: u32 = 32;

/// Creates a counter-clockwise regular polygon inscribed in a circle.
///
/// The first vertex sits at `phase` radians from the +X axis.
pub struct MakeRegularPolygon {
    center: Point2,
    radius: f64,
    sides: u32,
    phase: f64,
}

impl MakeRegularPolygon {
    /// Creates a new `MakeRegularPolygon` operation centred on the origin.
    #[must_use]
    pub fn new(sides: u32, radius: f64) -> Self {
        Self {
            center: Point2::origin(),
            radius,
            sides,
            phase: 0.0,
        }
    }

    /// Equilateral triangle with one vertex pointing up.
    #[must_use]
    pub fn triangle(radius: f64) -> Self {
        Self::new(3, radius).with_phase(FRAC_PI_2)
    }

    /// Regular pentagon with one vertex pointing up.
    #[must_use]
    pub fn pentagon(radius: f64) -> Self {
        Self::new(5, radius).with_phase(FRAC_PI_2)
    }

    /// A 32-sided circle approximation.
    #[must_use]
    pub fn circle(radius: f64) -> Self {
        Self::new(CIRCLE_SEGMENTS, radius)
    }

    /// Sets the polygon's centre.
    #[must_use]
    pub fn with_center(mut self, center: Point2) -> Self {
        self.center = center;
        self
    }

    /// Sets the angle of the first vertex.
    #[must_use]
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for fewer than 3 sides or a
    /// non-positive radius.
    pub fn execute(&self) -> Result<PolygonRing> {
        if self.sides < 3 {
            return Err(OperationError::InvalidInput(format!(
                "regular polygon needs at least 3 sides, got {}",
                self.sides
            ))
            .into());
        }
        if self.radius.is_nan() || self.radius <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "radius must be positive, got {}",
                self.radius
            ))
            .into());
        }
        let n = f64::from(self.sides);
        PolygonRing::new((0..self.sides).map(|i| {
            let angle = self.phase + f64::from(i) * TAU / n;
            Point2::new(
                self.center.x + self.radius * angle.cos(),
                self.center.y + self.radius * angle.sin(),
            )
        }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn triangle_points_up() {
        let ring = MakeRegularPolygon::triangle(150.0).execute().unwrap();
        assert_eq!(ring.len(), 3);
        assert_relative_eq!(ring.vertices()[0].x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(ring.vertices()[0].y, 150.0, epsilon = 1e-9);
        assert_relative_eq!(ring.vertices()[1].x, -150.0 * 0.75_f64.sqrt(), epsilon = 1e-9);
        assert!(ring.is_ccw());
    }

    #[test]
    fn pentagon_area() {
        let ring = MakeRegularPolygon::pentagon(1.0).execute().unwrap();
        // (n / 2) r² sin(2π / n)
        let expected = 2.5 * (TAU / 5.0).sin();
        assert_relative_eq!(ring.area(), expected, epsilon = 1e-12);
    }

    #[test]
    fn circle_approaches_disc_area() {
        let ring = MakeRegularPolygon::circle(10.0)
            .with_center(Point2::new(3.0, -2.0))
            .execute()
            .unwrap();
        assert_eq!(ring.len(), 32);
        let c = ring.centroid().unwrap();
        assert_relative_eq!(c.x, 3.0, epsilon = 1e-9);
        assert_relative_eq!(ring.area(), 100.0 * std::f64::consts::PI, max_relative = 0.01);
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert!(MakeRegularPolygon::new(2, 1.0).execute().is_err());
        assert!(MakeRegularPolygon::new(6, 0.0).execute().is_err());
    }
}
