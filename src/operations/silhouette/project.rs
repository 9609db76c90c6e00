use tracing::debug;

use crate::error::{OperationError, Result};
use crate::math::{Point2, Point3};

/// Extent below which the Z axis is considered flat.
const FLAT_THRESHOLD: f64 = 1e-3;

/// Flattens a 3D asset's vertices onto the plane of its two widest axes.
///
/// The bounding box's thinnest axis is treated as thickness and dropped. A
/// cloud that is already flat in Z keeps its XY coordinates directly.
pub struct ProjectPointCloud<'a> {
    points: &'a [Point3],
    scale: f64,
}

impl<'a> ProjectPointCloud<'a> {
    /// Creates a new projection with unit scale.
    #[must_use]
    pub fn new(points: &'a [Point3]) -> Self {
        Self { points, scale: 1.0 }
    }

    /// Sets a uniform scale applied to the projected coordinates.
    #[must_use]
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Executes the projection.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the cloud is empty.
    pub fn execute(&self) -> Result<Vec<Point2>> {
        let Some(first) = self.points.first() else {
            return Err(OperationError::InvalidInput("empty point cloud".to_owned()).into());
        };
        let mut min = *first;
        let mut max = *first;
        for p in &self.points[1..] {
            min = min.inf(p);
            max = max.sup(p);
        }
        let size = max - min;

        let axes: (usize, usize) = if size.z < FLAT_THRESHOLD {
            (0, 1)
        } else if size.x <= size.y && size.x <= size.z {
            (1, 2)
        } else if size.y <= size.x && size.y <= size.z {
            (0, 2)
        } else {
            (0, 1)
        };
        debug!(?size, ?axes, "projecting point cloud");

        let (a, b) = axes;
        Ok(self
            .points
            .iter()
            .map(|p| Point2::new(p[a] * self.scale, p[b] * self.scale))
            .collect())
    }
}
