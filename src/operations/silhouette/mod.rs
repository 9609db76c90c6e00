mod neighbors;
mod project;

pub use neighbors::{average_nearest_neighbor_distance, dedup_points};
pub use project::ProjectPointCloud;

use tracing::debug;

use crate::error::{OperationError, Result, SilhouetteError};
use crate::geometry::PolygonRing;
use crate::math::polygon_2d::wrap_angle;
use crate::math::{Point2, TOLERANCE};

/// Neighbour count used to estimate the sampling density.
const NEIGHBOR_COUNT: usize = 3;

/// Weight of the normalized step length in the candidate score.
const DISTANCE_WEIGHT: f64 = 0.1;

/// Traces an ordered outline ring through an unordered point cloud.
///
/// Unlike a convex hull the outline follows notches in the shape. The walk
/// starts at the lowest point and greedily steps to the nearby unused point
/// with the smallest turn relative to the current heading, so `alpha`
/// controls how far a single step may reach: smaller values reach farther
/// and smooth over concavities, larger values follow them more closely.
pub struct ExtractSilhouette<'a> {
    points: &'a [Point2],
    alpha: f64,
}

impl<'a> ExtractSilhouette<'a> {
    /// Creates a new extraction with `alpha = 0.05`.
    #[must_use]
    pub fn new(points: &'a [Point2]) -> Self {
        Self {
            points,
            alpha: 0.05,
        }
    }

    /// Sets the sensitivity parameter, expected in `(0, 1]`.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Executes the extraction.
    ///
    /// # Errors
    ///
    /// Returns `SilhouetteError::InsufficientPoints` if fewer than 3 unique
    /// points are supplied, `OperationError::InvalidInput` if `alpha` is
    /// outside `(0, 1]`, or `GeometryError::DegenerateRing` if the traced
    /// outline has fewer than 3 usable vertices.
    pub fn execute(&self) -> Result<PolygonRing> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(OperationError::InvalidInput(format!(
                "silhouette alpha {} not in (0, 1]",
                self.alpha
            ))
            .into());
        }

        let unique = dedup_points(self.points);
        if unique.len() < 3 {
            return Err(SilhouetteError::InsufficientPoints {
                unique: unique.len(),
            }
            .into());
        }

        let avg_dist = average_nearest_neighbor_distance(&unique, NEIGHBOR_COUNT);
        let max_reach = avg_dist / self.alpha;
        let close_dist = avg_dist * 2.0;

        let start = lowest_point(&unique);
        let mut used = vec![false; unique.len()];
        used[start] = true;
        let mut outline = vec![unique[start]];
        let mut current = start;
        let mut heading = 0.0_f64;

        let max_iterations = unique.len() * 2;
        let mut iterations = 0;
        while iterations < max_iterations {
            iterations += 1;

            let Some(next) = best_candidate(&unique, &used, current, heading, max_reach) else {
                debug!(iterations, "outline walk found no further candidate");
                break;
            };

            let to_start = nalgebra::distance(&unique[next], &unique[start]);
            if outline.len() > 3 && to_start < close_dist {
                break;
            }

            let step = unique[next] - unique[current];
            heading = step.y.atan2(step.x);
            used[next] = true;
            outline.push(unique[next]);
            current = next;
        }

        debug!(
            input = self.points.len(),
            unique = unique.len(),
            outline = outline.len(),
            avg_dist,
            max_reach,
            iterations,
            "silhouette traced"
        );
        PolygonRing::new(outline)
    }
}

/// Index of the point with minimum y, ties broken by minimum x.
fn lowest_point(points: &[Point2]) -> usize {
    let mut best = 0;
    for (i, p) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if p.y < b.y - TOLERANCE || ((p.y - b.y).abs() < TOLERANCE && p.x < b.x) {
            best = i;
        }
    }
    best
}

/// Picks the unused point within reach with the lowest turn-plus-distance score.
fn best_candidate(
    points: &[Point2],
    used: &[bool],
    current: usize,
    heading: f64,
    max_reach: f64,
) -> Option<usize> {
    let origin = points[current];
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        if used[i] {
            continue;
        }
        let d = p - origin;
        let dist = d.norm();
        if dist > max_reach {
            continue;
        }
        let turn = wrap_angle(d.y.atan2(d.x) - heading);
        let score = turn + DISTANCE_WEIGHT * dist / max_reach;
        if best.is_none_or(|(_, s)| score < s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}
