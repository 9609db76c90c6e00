use crate::geometry::{Aabb2, PolygonRing};

/// Computes the axis-aligned bounding box of a ring.
pub struct BoundingBox<'a> {
    ring: &'a PolygonRing,
}

impl<'a> BoundingBox<'a> {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(ring: &'a PolygonRing) -> Self {
        Self { ring }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self) -> Aabb2 {
        self.ring.bounding_extents()
    }
}
