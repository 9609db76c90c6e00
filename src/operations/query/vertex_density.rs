use crate::error::{GeometryError, Result};
use crate::geometry::PolygonRing;

/// Computes the number of vertices per unit of enclosed area.
///
/// High densities mark slivers: thin pieces whose outline is long relative
/// to the area it encloses.
pub struct VertexDensity<'a> {
    ring: &'a PolygonRing,
}

impl<'a> VertexDensity<'a> {
    /// Creates a new `VertexDensity` query.
    #[must_use]
    pub fn new(ring: &'a PolygonRing) -> Self {
        Self { ring }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroArea` if the ring encloses no area.
    pub fn execute(&self) -> Result<f64> {
        self.ring
            .vertex_density()
            .ok_or_else(|| GeometryError::ZeroArea.into())
    }
}
