use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{PolygonRing, VisualPayload};
use crate::math::Point2;

/// Default fraction of the root area below which a piece turns to dust.
pub const DEFAULT_DUST_RATIO: f64 = 1.0 / 40.0;

/// Verdict of the fragment policy for one piece of a cut.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// Large enough to live on as a fragment.
    Keep(PolygonRing),
    /// Too small; the ring only seeds a visual particle burst.
    Dust(PolygonRing),
}

impl Classification {
    /// Returns `true` for [`Classification::Dust`].
    #[must_use]
    pub fn is_dust(&self) -> bool {
        matches!(self, Self::Dust(_))
    }
}

/// Decides whether a cut piece stays a fragment or becomes dust.
///
/// The threshold is measured against the area of the original, uncut
/// ancestor rather than the immediate parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentPolicy {
    dust_ratio: f64,
}

impl Default for FragmentPolicy {
    fn default() -> Self {
        Self {
            dust_ratio: DEFAULT_DUST_RATIO,
        }
    }
}

impl FragmentPolicy {
    /// Creates a policy with the default 1/40 dust ratio.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dust ratio.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` unless `0 < ratio < 1`.
    pub fn with_dust_ratio(mut self, ratio: f64) -> Result<Self> {
        if !(ratio > 0.0 && ratio < 1.0) {
            return Err(
                OperationError::InvalidInput(format!("dust ratio {ratio} not in (0, 1)")).into(),
            );
        }
        self.dust_ratio = ratio;
        Ok(self)
    }

    /// The configured dust ratio.
    #[must_use]
    pub fn dust_ratio(&self) -> f64 {
        self.dust_ratio
    }

    /// Smallest area that survives for a lineage rooted at `root_area`.
    #[must_use]
    pub fn min_area(&self, root_area: f64) -> f64 {
        root_area * self.dust_ratio
    }

    /// Classifies `ring` against the lineage's root area.
    #[must_use]
    pub fn classify(&self, ring: PolygonRing, root_area: f64) -> Classification {
        let area = ring.area();
        let min_area = self.min_area(root_area);
        if area < min_area {
            debug!(area, min_area, density = ?ring.vertex_density(), "piece turns to dust");
            Classification::Dust(ring)
        } else {
            Classification::Keep(ring)
        }
    }
}

/// A visual-only particle burst left behind by a dust piece.
#[derive(Debug, Clone, PartialEq)]
pub struct DustBurst {
    /// Ring vertices in world space, used as particle seeds.
    pub vertices: Vec<Point2>,
    /// Appearance inherited from the parent fragment.
    pub payload: VisualPayload,
}

impl DustBurst {
    /// Creates a burst from a world-space ring.
    #[must_use]
    pub fn new(ring: PolygonRing, payload: VisualPayload) -> Self {
        Self {
            vertices: ring.into_vertices(),
            payload,
        }
    }

    /// Number of particles to spawn: one per seed vertex, clamped to `20..=30`.
    #[must_use]
    pub fn particle_count(&self) -> usize {
        self.vertices.len().clamp(20, 30)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect(w: f64, h: f64) -> PolygonRing {
        PolygonRing::from_xy(&[(0.0, 0.0), (w, 0.0), (w, h), (0.0, h)]).unwrap()
    }

    #[test]
    fn below_threshold_is_dust() {
        let policy = FragmentPolicy::new();
        // 1 × 2.4 = 2.4 < 100 / 40
        assert!(policy.classify(rect(1.0, 2.4), 100.0).is_dust());
    }

    #[test]
    fn at_threshold_is_kept() {
        let policy = FragmentPolicy::new();
        assert!(!policy.classify(rect(1.0, 2.5), 100.0).is_dust());
        assert!(!policy.classify(rect(5.0, 10.0), 100.0).is_dust());
    }

    #[test]
    fn threshold_uses_root_not_parent() {
        let policy = FragmentPolicy::new();
        // Tiny relative to a large root even though it is half of its parent.
        assert!(policy.classify(rect(1.0, 1.0), 1000.0).is_dust());
        assert!(!policy.classify(rect(1.0, 1.0), 20.0).is_dust());
    }

    #[test]
    fn dust_ratio_is_validated() {
        assert!(FragmentPolicy::new().with_dust_ratio(0.0).is_err());
        assert!(FragmentPolicy::new().with_dust_ratio(1.5).is_err());
        assert!(FragmentPolicy::new().with_dust_ratio(f64::NAN).is_err());
        let p = FragmentPolicy::new().with_dust_ratio(0.1).unwrap();
        assert!(p.classify(rect(1.0, 9.0), 100.0).is_dust());
    }

    #[test]
    fn particle_count_is_clamped() {
        let burst = DustBurst::new(rect(1.0, 1.0), VisualPayload::default());
        assert_eq!(burst.particle_count(), 20);
        let many: Vec<Point2> = (0..40)
            .map(|i| {
                let a = f64::from(i) * std::f64::consts::TAU / 40.0;
                Point2::new(10.0 * a.cos(), 10.0 * a.sin())
            })
            .collect();
        let burst = DustBurst::new(PolygonRing::new(many).unwrap(), VisualPayload::default());
        assert_eq!(burst.particle_count(), 30);
    }
}
