use super::{Point2, Vector2};

/// Intersection of an edge `a → b` with a line, given the signed distances
/// `da`, `db` of its endpoints to that line.
///
/// Returns `(point, t)` with `t = |da| / (|da| + |db|)` when the endpoints lie
/// strictly on opposite sides, `None` otherwise.
#[must_use]
pub fn edge_line_crossing(a: &Point2, b: &Point2, da: f64, db: f64) -> Option<(Point2, f64)> {
    if !((da > 0.0 && db < 0.0) || (da < 0.0 && db > 0.0)) {
        return None;
    }
    let t = da.abs() / (da.abs() + db.abs());
    Some((lerp(a, b, t), t))
}

/// Linear interpolation between two points.
#[must_use]
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Normalized position of `p` along the segment `origin + u * dir * length`.
///
/// `dir` must be a unit vector; `u = 0` at the origin and `u = 1` at the end.
#[must_use]
pub fn segment_parameter(p: &Point2, origin: &Point2, dir: &Vector2, length: f64) -> f64 {
    (p - origin).dot(dir) / length
}
