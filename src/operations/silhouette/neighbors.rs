use std::collections::HashSet;

use crate::math::Point2;

/// Key precision used to detect duplicate points.
const DEDUP_SCALE: f64 = 1e6;

/// Removes duplicate points, comparing coordinates rounded to 1e-6.
///
/// Keeps the first occurrence of each point, in input order.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn dedup_points(points: &[Point2]) -> Vec<Point2> {
    let mut seen: HashSet<(i64, i64)> = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| {
            let key = (
                (p.x * DEDUP_SCALE).round() as i64,
                (p.y * DEDUP_SCALE).round() as i64,
            );
            seen.insert(key)
        })
        .copied()
        .collect()
}

/// Mean, over all points, of the average distance to each point's `k`
/// nearest neighbours.
///
/// The per-point sum is always divided by `k`, even when fewer than `k`
/// neighbours exist.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_nearest_neighbor_distance(points: &[Point2], k: usize) -> f64 {
    if points.is_empty() || k == 0 {
        return 0.0;
    }
    let mut distances = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        distances.clear();
        distances.extend(
            points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, q)| nalgebra::distance(p, q)),
        );
        distances.sort_by(f64::total_cmp);
        let nearest: f64 = distances.iter().take(k).sum();
        total += nearest / k as f64;
    }
    total / points.len() as f64
}
