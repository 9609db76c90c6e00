mod tessellate_ring;

pub use tessellate_ring::TessellateRing;

use crate::math::polygon_2d::signed_area;
use crate::math::Point2;

/// A planar triangle mesh.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh2 {
    /// Vertex positions.
    pub vertices: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh2 {
    /// Signed area of every triangle, in index order.
    pub fn signed_areas(&self) -> impl Iterator<Item = f64> + '_ {
        self.indices.iter().map(|tri| {
            let [a, b, c] = tri.map(|i| self.vertices[i as usize]);
            signed_area(&[a, b, c])
        })
    }

    /// Total unsigned area covered by the triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_areas().map(f64::abs).sum()
    }
}
