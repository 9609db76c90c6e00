use crate::error::{OperationError, Result};
use crate::operations::fragment::DEFAULT_DUST_RATIO;
use crate::operations::CutParams;

use super::PhysicalProps;

/// Tunables for a cutting session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    /// Cut engine parameters.
    pub cut: CutParams,
    /// Fraction of the root area below which a piece turns to dust.
    pub dust_ratio: f64,
    /// Vertex budget of the collision outline handed to physics.
    pub max_physics_vertices: usize,
    /// Tightness of silhouettes traced from point clouds, in `(0, 1]`.
    pub silhouette_alpha: f64,
    /// Magnitude of the push that separates the two halves of a cut.
    pub separation_impulse: f64,
    /// Material of every body created by the session.
    pub physical: PhysicalProps,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cut: CutParams::default(),
            dust_ratio: DEFAULT_DUST_RATIO,
            max_physics_vertices: 200,
            silhouette_alpha: 0.05,
            separation_impulse: 1.0,
            physical: PhysicalProps::default(),
        }
    }
}

impl SessionConfig {
    /// Sets the dust ratio.
    #[must_use]
    pub fn with_dust_ratio(mut self, dust_ratio: f64) -> Self {
        self.dust_ratio = dust_ratio;
        self
    }

    /// Sets the cut engine parameters.
    #[must_use]
    pub fn with_cut_params(mut self, cut: CutParams) -> Self {
        self.cut = cut;
        self
    }

    /// Sets the separation impulse.
    #[must_use]
    pub fn with_separation_impulse(mut self, separation_impulse: f64) -> Self {
        self.separation_impulse = separation_impulse;
        self
    }

    /// Checks every value for range and finiteness.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("cut.side_epsilon", self.cut.side_epsilon >= 0.0),
            ("cut.segment_margin", self.cut.segment_margin >= 0.0),
            ("dust_ratio", self.dust_ratio > 0.0 && self.dust_ratio < 1.0),
            ("max_physics_vertices", self.max_physics_vertices >= 3),
            (
                "silhouette_alpha",
                self.silhouette_alpha > 0.0 && self.silhouette_alpha <= 1.0,
            ),
            (
                "separation_impulse",
                self.separation_impulse >= 0.0 && self.separation_impulse.is_finite(),
            ),
            ("physical.friction", self.physical.friction >= 0.0),
            ("physical.restitution", self.physical.restitution >= 0.0),
            ("physical.density", self.physical.density > 0.0),
            ("physical.friction_air", self.physical.friction_air >= 0.0),
        ];
        match checks.iter().find(|(_, ok)| !ok) {
            Some((field, _)) => {
                Err(OperationError::InvalidInput(format!("session config: {field} out of range")).into())
            }
            None => Ok(()),
        }
    }
}
