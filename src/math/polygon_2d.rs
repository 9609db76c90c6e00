use super::{Point2, Vector2, TOLERANCE};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the unsigned area of a closed polygon.
///
/// Returns exactly `0.0` for fewer than 3 points and for collinear input.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    let area = signed_area(points).abs();
    if area < TOLERANCE {
        0.0
    } else {
        area
    }
}

/// Computes the area centroid of a closed polygon.
///
/// Returns `None` when the polygon encloses no area.
#[must_use]
pub fn polygon_centroid(points: &[Point2]) -> Option<Point2> {
    let a = signed_area(points);
    if a.abs() < TOLERANCE {
        return None;
    }
    let n = points.len();
    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let p = &points[i];
        let q = &points[(i + 1) % n];
        let cross = p.x * q.y - q.x * p.y;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    let k = 1.0 / (6.0 * a);
    Some(Point2::new(cx * k, cy * k))
}

/// Returns the componentwise `(min, max)` corners of a point set.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn extents(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for p in &points[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Wraps an angle into `(-π, π]`.
#[must_use]
pub fn wrap_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}
