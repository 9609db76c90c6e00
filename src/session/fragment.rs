use crate::geometry::{PolygonRing, VisualPayload};
use crate::math::Isometry2;

slotmap::new_key_type! {
    /// Unique identifier for a live fragment in a session.
    pub struct FragmentId;
}

/// Where a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lineage {
    /// The fragment this one was cut from; `None` for root shapes.
    pub parent: Option<FragmentId>,
    /// Number of cuts between the root shape and this fragment.
    pub depth: u32,
}

impl Lineage {
    /// Lineage of a root shape.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Lineage of a piece cut from `parent`.
    #[must_use]
    pub fn child_of(parent: FragmentId, parent_lineage: &Lineage) -> Self {
        Self {
            parent: Some(parent),
            depth: parent_lineage.depth + 1,
        }
    }
}

/// A live piece of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Outline in the fragment's local frame, centred on its centroid.
    pub ring: PolygonRing,
    /// Placement of the local frame in the world.
    pub pose: Isometry2,
    /// Area of the uncut ancestor; identical across a whole lineage.
    pub root_area: f64,
    /// Area of this fragment.
    pub area: f64,
    /// Appearance, passed through to the renderer untouched.
    pub payload: VisualPayload,
    /// Ancestry.
    pub lineage: Lineage,
}

impl Fragment {
    /// The outline in world coordinates.
    #[must_use]
    pub fn world_ring(&self) -> PolygonRing {
        self.ring.transformed(&self.pose)
    }
}
