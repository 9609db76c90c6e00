use crate::geometry::PolygonRing;

/// Computes the enclosed area of a ring.
///
/// Uses the Shoelace formula, so the result is independent of winding and
/// of which vertex the ring starts at. Collinear rings report exactly zero.
pub struct Area<'a> {
    ring: &'a PolygonRing,
    signed: bool,
}

impl<'a> Area<'a> {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(ring: &'a PolygonRing) -> Self {
        Self {
            ring,
            signed: false,
        }
    }

    /// Reports the signed area instead: positive for counter-clockwise rings.
    #[must_use]
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> f64 {
        if self.signed {
            self.ring.signed_area()
        } else {
            self.ring.area()
        }
    }
}
