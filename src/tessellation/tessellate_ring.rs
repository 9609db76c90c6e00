use std::collections::HashMap;

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{
    ConstrainedDelaunayTriangulation, InsertionError, Point2 as SpadePoint2, Triangulation,
};
use tracing::debug;

use crate::error::{Result, TessellationError};
use crate::geometry::PolygonRing;
use crate::math::Point2;

use super::TriangleMesh2;

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Triangulates a polygon ring with a constrained Delaunay triangulation.
///
/// Every ring edge becomes a constraint, and only triangles enclosed by an
/// odd number of constraints are kept, so concave rings come out without
/// triangles spanning their notches. Emitted triangles follow the ring's
/// own winding.
pub struct TessellateRing<'a> {
    ring: &'a PolygonRing,
}

impl<'a> TessellateRing<'a> {
    /// Creates a new `TessellateRing` operation.
    #[must_use]
    pub fn new(ring: &'a PolygonRing) -> Self {
        Self { ring }
    }

    /// Executes the tessellation.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::Failed` if a vertex cannot be inserted or
    /// the ring crosses itself.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh2> {
        let points: Vec<SpadePoint2<f64>> = self
            .ring
            .vertices()
            .iter()
            .map(|p| SpadePoint2::new(p.x, p.y))
            .collect();

        let mut cdt = Cdt::new();
        insert_constraint_loop(&mut cdt, &points)?;
        let interior = classify_interior_faces(&cdt);

        let ccw = self.ring.is_ccw();
        let mut mesh = TriangleMesh2::default();
        let mut vertex_map: HashMap<usize, u32> = HashMap::new();

        for face in cdt.inner_faces() {
            if !interior[face.fix().index()] {
                continue;
            }
            let mut tri = [0u32; 3];
            for (slot, vh) in tri.iter_mut().zip(face.vertices()) {
                let key = vh.fix().index();
                *slot = *vertex_map.entry(key).or_insert_with(|| {
                    let pos = vh.position();
                    mesh.vertices.push(Point2::new(pos.x, pos.y));
                    (mesh.vertices.len() - 1) as u32
                });
            }
            // spade reports inner faces counter-clockwise.
            if !ccw {
                tri.swap(1, 2);
            }
            mesh.indices.push(tri);
        }

        debug!(
            ring_vertices = self.ring.len(),
            triangles = mesh.indices.len(),
            "tessellated ring"
        );
        Ok(mesh)
    }
}

/// Adds every ring vertex to the CDT and constrains each ring edge.
///
/// A ring that revisits a vertex or whose edges cross cannot be
/// triangulated as one region.
fn insert_constraint_loop(cdt: &mut Cdt, points: &[SpadePoint2<f64>]) -> Result<()> {
    let handles = points
        .iter()
        .map(|&pt| {
            cdt.insert(pt)
                .map_err(|e: InsertionError| TessellationError::Failed(format!("CDT insert: {e}")))
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if cdt.num_vertices() != handles.len() {
        return Err(TessellationError::Failed(format!(
            "ring revisits a vertex ({} of {} distinct)",
            cdt.num_vertices(),
            handles.len()
        ))
        .into());
    }

    let edges = handles.iter().zip(handles.iter().cycle().skip(1));
    for (i, (&from, &to)) in edges.enumerate() {
        if !cdt.can_add_constraint(from, to) {
            return Err(TessellationError::Failed(format!("ring edge {i} crosses another ring edge")).into());
        }
        cdt.add_constraint(from, to);
    }
    Ok(())
}

/// Walks the CDT outward-in, counting the ring edges crossed to reach
/// every inner face.
///
/// Indexed by face index; `true` marks faces behind an odd number of ring
/// edges.
fn classify_interior_faces(cdt: &Cdt) -> Vec<bool> {
    let mut crossings: Vec<Option<u32>> = vec![None; cdt.num_all_faces()];
    let mut stack: Vec<(FixedFaceHandle<InnerTag>, u32)> = Vec::new();

    for edge in cdt.convex_hull() {
        let Some(inner) = edge.face().as_inner().or_else(|| edge.rev().face().as_inner()) else {
            continue;
        };
        let slot = &mut crossings[inner.fix().index()];
        if slot.is_none() {
            let count = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            *slot = Some(count);
            stack.push((inner.fix(), count));
        }
    }

    while let Some((face, count)) = stack.pop() {
        for edge in cdt.face(face).adjacent_edges() {
            let Some(next) = edge.rev().face().as_inner() else {
                continue;
            };
            let slot = &mut crossings[next.fix().index()];
            if slot.is_some() {
                continue;
            }
            let next_count = count + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            *slot = Some(next_count);
            stack.push((next.fix(), next_count));
        }
    }

    crossings
        .into_iter()
        .map(|c| c.is_some_and(|n| n % 2 == 1))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn triangle_produces_one_triangle() {
        let ring = PolygonRing::from_xy(&[(0.0, 0.0), (4.0, 0.0), (2.0, 3.0)]).unwrap();
        let mesh = TessellateRing::new(&ring).execute().unwrap();
        assert_eq!(mesh.indices.len(), 1);
        assert_eq!(mesh.vertices.len(), 3);
    }

    #[test]
    fn square_produces_two_triangles() {
        let ring = PolygonRing::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
        let mesh = TessellateRing::new(&ring).execute().unwrap();
        assert_eq!(mesh.indices.len(), 2);
        assert_eq!(mesh.vertices.len(), 4);
        assert_relative_eq!(mesh.area(), 16.0, epsilon = 1e-9);
    }

    #[test]
    fn l_shape_skips_the_notch() {
        let ring = PolygonRing::from_xy(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ])
        .unwrap();
        let mesh = TessellateRing::new(&ring).execute().unwrap();
        assert_eq!(mesh.indices.len(), 4);
        assert_eq!(mesh.vertices.len(), 6);
        assert_relative_eq!(mesh.area(), ring.area(), epsilon = 1e-9);
    }

    #[test]
    fn u_shape_keeps_only_the_arms() {
        let ring = PolygonRing::from_xy(&[
            (0.0, 0.0),
            (9.0, 0.0),
            (9.0, 9.0),
            (6.0, 9.0),
            (6.0, 3.0),
            (3.0, 3.0),
            (3.0, 9.0),
            (0.0, 9.0),
        ])
        .unwrap();
        let mesh = TessellateRing::new(&ring).execute().unwrap();
        assert_eq!(mesh.indices.len(), 6);
        assert_relative_eq!(mesh.area(), 63.0, epsilon = 1e-9);
    }

    #[test]
    fn triangles_follow_ring_winding() {
        let ccw = PolygonRing::from_xy(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]).unwrap();
        let mesh = TessellateRing::new(&ccw).execute().unwrap();
        assert!(mesh.signed_areas().all(|a| a > 0.0));

        let cw = ccw.reversed();
        let mesh = TessellateRing::new(&cw).execute().unwrap();
        assert!(mesh.signed_areas().all(|a| a < 0.0));
    }

    #[test]
    fn ring_touching_itself_is_rejected() {
        // Two lobes meeting at (2, 2).
        let ring = PolygonRing::from_xy(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (2.0, 2.0),
            (4.0, 2.0),
            (4.0, 4.0),
            (2.0, 4.0),
            (2.0, 2.0),
            (0.0, 2.0),
        ])
        .unwrap();
        assert!(matches!(
            TessellateRing::new(&ring).execute(),
            Err(crate::PolyshardError::Tessellation(TessellationError::Failed(_)))
        ));
    }

    #[test]
    fn self_crossing_ring_is_rejected() {
        let bowtie = PolygonRing::from_xy(&[(0.0, 0.0), (4.0, 4.0), (4.0, 0.0), (0.0, 4.0)]).unwrap();
        assert!(TessellateRing::new(&bowtie).execute().is_err());
    }
}
