use crate::geometry::{PolygonRing, VisualPayload};
use crate::math::{Isometry2, Vector2};
use crate::operations::DustBurst;
use crate::tessellation::TriangleMesh2;

/// Material properties handed to the physics back end for every new body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalProps {
    /// Surface friction coefficient.
    pub friction: f64,
    /// Bounciness; 0 absorbs every impact.
    pub restitution: f64,
    /// Mass per unit area.
    pub density: f64,
    /// Linear drag applied while airborne.
    pub friction_air: f64,
}

impl Default for PhysicalProps {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.3,
            density: 0.001,
            friction_air: 0.01,
        }
    }
}

/// Display back end for live fragments.
///
/// Rings and their triangulations are passed in the fragment's local frame;
/// `transform` places them in the world.
pub trait Renderer {
    /// Identifies one presented fragment.
    type Handle: Copy;

    /// Starts drawing a fragment. `mesh` fills `ring` with triangles in the
    /// ring's winding.
    fn present(
        &mut self,
        ring: &PolygonRing,
        mesh: &TriangleMesh2,
        payload: &VisualPayload,
        transform: &Isometry2,
    ) -> Self::Handle;

    /// Moves an already presented fragment.
    fn update_transform(&mut self, handle: Self::Handle, transform: &Isometry2);

    /// Stops drawing a fragment.
    fn remove(&mut self, handle: Self::Handle);

    /// Plays a transient particle effect for a piece that turned to dust.
    fn dust(&mut self, burst: &DustBurst);
}

/// Rigid-body simulation back end.
pub trait PhysicsWorld {
    /// Identifies one simulated body.
    type Body: Copy;

    /// Adds a body whose collision outline is `ring` (local frame) at `pose`.
    fn create_body(&mut self, ring: &PolygonRing, pose: &Isometry2, props: &PhysicalProps)
        -> Self::Body;

    /// Removes a body. Unknown bodies are ignored.
    fn remove_body(&mut self, body: Self::Body);

    /// Advances the simulation by `dt` seconds.
    fn step_all(&mut self, dt: f64);

    /// Current pose of a body, or `None` if it no longer exists.
    fn body_pose(&self, body: Self::Body) -> Option<Isometry2>;

    /// Pushes a freshly cut body away from the cut line.
    fn apply_separation_impulse(&mut self, body: Self::Body, direction: &Vector2);
}
