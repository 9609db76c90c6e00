use crate::geometry::CutLine;
use crate::math::Point2;

/// Per-vertex signed distances of a ring to a cut line, plus which
/// half-planes the ring reaches beyond `epsilon`.
#[derive(Debug, Clone)]
pub struct SideClassification {
    pub distances: Vec<f64>,
    pub has_positive: bool,
    pub has_negative: bool,
}

impl SideClassification {
    /// Returns `true` if the ring reaches into both half-planes.
    #[must_use]
    pub fn straddles(&self) -> bool {
        self.has_positive && self.has_negative
    }
}

/// Computes `d_i = dot(v_i - start, normal)` for every vertex.
#[must_use]
pub fn classify_vertices(vertices: &[Point2], line: &CutLine, epsilon: f64) -> SideClassification {
    let distances: Vec<f64> = vertices.iter().map(|v| line.signed_distance(v)).collect();
    let has_positive = distances.iter().any(|&d| d > epsilon);
    let has_negative = distances.iter().any(|&d| d < -epsilon);
    SideClassification {
        distances,
        has_positive,
        has_negative,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn vertical_line() -> CutLine {
        CutLine::new(Point2::new(5.0, -5.0), Point2::new(5.0, 15.0)).unwrap()
    }

    #[test]
    fn straddling_square() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        let c = classify_vertices(&pts, &vertical_line(), 0.1);
        assert!(c.straddles());
        // Upward line: the normal points to -x.
        assert!(c.distances[0] > 0.0);
        assert!(c.distances[1] < 0.0);
    }

    #[test]
    fn epsilon_noise_does_not_straddle() {
        let pts = [
            Point2::new(5.05, 0.0),
            Point2::new(9.0, 0.0),
            Point2::new(9.0, 10.0),
        ];
        let c = classify_vertices(&pts, &vertical_line(), 0.1);
        assert!(c.has_negative);
        assert!(!c.has_positive);
        assert!(!c.straddles());
    }
}
