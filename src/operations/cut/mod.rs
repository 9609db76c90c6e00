mod classify;

pub use classify::{classify_vertices, SideClassification};

use tracing::{debug, trace};

use crate::error::{CutError, GeometryError, Result};
use crate::geometry::{CutLine, PolygonRing};
use crate::math::intersect_2d::edge_line_crossing;
use crate::math::Point2;

/// Signed distances at or below this magnitude put a vertex on the line.
const ON_LINE_TOLERANCE: f64 = 1e-9;

/// Relative area the two pieces may lose or gain against the input ring.
const AREA_CONSERVATION_TOLERANCE: f64 = 1e-3;

/// Tunables for the cut engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutParams {
    /// Vertices must reach beyond this distance on both sides of the line.
    pub side_epsilon: f64,
    /// Slack, in world units, added to both ends of the drawn segment.
    pub segment_margin: f64,
}

impl Default for CutParams {
    fn default() -> Self {
        Self {
            side_epsilon: 0.1,
            segment_margin: 2.0,
        }
    }
}

/// One side of a split.
#[derive(Debug, Clone, PartialEq)]
pub enum CutPiece {
    /// A valid ring.
    Ring(PolygonRing),
    /// Too few usable vertices ended up on this side.
    Degenerate { vertex_count: usize },
}

impl CutPiece {
    fn from_points(points: Vec<Point2>) -> Self {
        let vertex_count = points.len();
        PolygonRing::new(points).map_or(Self::Degenerate { vertex_count }, Self::Ring)
    }

    /// Returns the ring, if this side is valid.
    #[must_use]
    pub fn ring(&self) -> Option<&PolygonRing> {
        match self {
            Self::Ring(ring) => Some(ring),
            Self::Degenerate { .. } => None,
        }
    }
}

/// Result of cutting a ring with a line.
#[derive(Debug, Clone, PartialEq)]
pub enum CutOutcome {
    /// The line does not pass through the ring within the drawn segment.
    NotIntersecting,
    /// The ring was re-threaded into a positive-side and a negative-side part.
    Split {
        positive: CutPiece,
        negative: CutPiece,
    },
    /// Both pieces are rings but together they do not cover the input, as
    /// when a short segment crosses only one arm of a concave ring.
    Unbalanced { ring_area: f64, pieces_area: f64 },
}

impl CutOutcome {
    /// Returns `true` for [`CutOutcome::Split`].
    #[must_use]
    pub fn is_split(&self) -> bool {
        matches!(self, Self::Split { .. })
    }

    /// Extracts both rings of a split.
    ///
    /// # Errors
    ///
    /// Returns `CutError::NoIntersection` if the ring was not split,
    /// `CutError::AreaNotConserved` if the pieces do not cover the ring, or
    /// `GeometryError::DegenerateRing` if either side is degenerate.
    pub fn into_rings(self) -> Result<(PolygonRing, PolygonRing)> {
        match self {
            Self::NotIntersecting => Err(CutError::NoIntersection.into()),
            Self::Unbalanced {
                ring_area,
                pieces_area,
            } => Err(CutError::AreaNotConserved {
                expected: ring_area,
                actual: pieces_area,
            }
            .into()),
            Self::Split {
                positive: CutPiece::Ring(pos),
                negative: CutPiece::Ring(neg),
            } => Ok((pos, neg)),
            Self::Split { positive, negative } => {
                let vertex_count = [positive, negative]
                    .iter()
                    .filter_map(|piece| match piece {
                        CutPiece::Degenerate { vertex_count } => Some(*vertex_count),
                        CutPiece::Ring(_) => None,
                    })
                    .min()
                    .unwrap_or(0);
                Err(GeometryError::DegenerateRing { vertex_count }.into())
            }
        }
    }
}

/// Splits a polygon ring along a finite cut segment.
///
/// Vertices are distributed to the positive or negative output in ring
/// order, and every crossing point is appended to both outputs at the spot
/// where the walk meets it. Both output rings keep the input's winding.
pub struct Cut<'a> {
    ring: &'a PolygonRing,
    line: &'a CutLine,
    params: CutParams,
}

impl<'a> Cut<'a> {
    /// Creates a new cut with default parameters.
    #[must_use]
    pub fn new(ring: &'a PolygonRing, line: &'a CutLine) -> Self {
        Self {
            ring,
            line,
            params: CutParams::default(),
        }
    }

    /// Sets custom cut parameters.
    #[must_use]
    pub fn with_params(mut self, params: CutParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the cut.
    #[must_use]
    pub fn execute(&self) -> CutOutcome {
        let verts = self.ring.vertices();
        let mut sides = classify_vertices(verts, self.line, self.params.side_epsilon);
        if !sides.straddles() {
            trace!(
                has_positive = sides.has_positive,
                has_negative = sides.has_negative,
                "ring lies on one side of the cut"
            );
            return CutOutcome::NotIntersecting;
        }
        for d in &mut sides.distances {
            if d.abs() <= ON_LINE_TOLERANCE {
                *d = 0.0;
            }
        }
        let dist = &sides.distances;
        let margin = self.params.segment_margin;

        let n = verts.len();
        let mut positive = Vec::with_capacity(n + 2);
        let mut negative = Vec::with_capacity(n + 2);
        let mut contacts = 0usize;

        for i in 0..n {
            let j = (i + 1) % n;
            let a = verts[i];

            if dist[i].abs() <= ON_LINE_TOLERANCE && self.line.spans(&a, margin) {
                positive.push(a);
                negative.push(a);
                contacts += 1;
            } else if dist[i] >= 0.0 {
                positive.push(a);
            } else {
                negative.push(a);
            }

            let Some((p, _)) = edge_line_crossing(&a, &verts[j], dist[i], dist[j]) else {
                continue;
            };
            if self.line.spans(&p, margin) {
                positive.push(p);
                negative.push(p);
                contacts += 1;
            } else {
                let skipped = CutError::SegmentOutOfRange {
                    u: self.line.parameter_of(&p),
                };
                trace!(edge = i, %skipped, "edge skipped");
            }
        }

        if contacts < 2 {
            debug!(contacts, "cut segment does not pass through the ring");
            return CutOutcome::NotIntersecting;
        }

        debug!(
            vertices = n,
            contacts,
            positive = positive.len(),
            negative = negative.len(),
            "ring split"
        );
        let positive = CutPiece::from_points(positive);
        let negative = CutPiece::from_points(negative);
        if let (CutPiece::Ring(pos), CutPiece::Ring(neg)) = (&positive, &negative) {
            let ring_area = self.ring.area();
            let pieces_area = pos.area() + neg.area();
            if (pieces_area - ring_area).abs() > AREA_CONSERVATION_TOLERANCE * ring_area {
                debug!(ring_area, pieces_area, "pieces do not cover the ring");
                return CutOutcome::Unbalanced {
                    ring_area,
                    pieces_area,
                };
            }
        }
        CutOutcome::Split { positive, negative }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> CutLine {
        CutLine::new(Point2::new(x0, y0), Point2::new(x1, y1)).unwrap()
    }

    fn square(size: f64) -> PolygonRing {
        PolygonRing::from_xy(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)]).unwrap()
    }

    #[test]
    fn vertical_cut_gives_two_rectangles() {
        let ring = square(10.0);
        let l = line(5.0, -5.0, 5.0, 15.0);
        let (pos, neg) = Cut::new(&ring, &l).execute().into_rings().unwrap();
        assert_relative_eq!(pos.area(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(neg.area(), 50.0, epsilon = 1e-9);
        assert_eq!(pos.len(), 4);
        assert_eq!(neg.len(), 4);
        // Positive side is to the left of an upward line.
        assert!(pos.vertices().iter().all(|v| v.x <= 5.0 + 1e-9));
        assert!(neg.vertices().iter().all(|v| v.x >= 5.0 - 1e-9));
    }

    #[test]
    fn outputs_keep_input_winding() {
        let ccw = square(10.0);
        let l = line(5.0, -5.0, 5.0, 15.0);
        let (pos, neg) = Cut::new(&ccw, &l).execute().into_rings().unwrap();
        assert!(pos.is_ccw() && neg.is_ccw());

        let cw = ccw.reversed();
        let (pos, neg) = Cut::new(&cw, &l).execute().into_rings().unwrap();
        assert!(!pos.is_ccw() && !neg.is_ccw());
    }

    #[test]
    fn line_outside_square_does_not_intersect() {
        let ring = square(1.0);
        let l = line(20.0, 20.0, 20.0, 30.0);
        let outcome = Cut::new(&ring, &l).execute();
        assert_eq!(outcome, CutOutcome::NotIntersecting);
        assert!(matches!(
            outcome.into_rings(),
            Err(crate::PolyshardError::Cut(CutError::NoIntersection))
        ));
    }

    #[test]
    fn short_segment_ending_inside_does_not_cut() {
        let ring = square(10.0);
        // Reaches the bottom edge but stops halfway up.
        let l = line(5.0, -5.0, 5.0, 5.0);
        assert_eq!(Cut::new(&ring, &l).execute(), CutOutcome::NotIntersecting);
    }

    #[test]
    fn segment_far_from_shape_on_same_infinite_line() {
        let ring = square(10.0);
        // The infinite line x = 5 crosses the square, the drawn segment does not.
        let l = line(5.0, 40.0, 5.0, 60.0);
        assert_eq!(Cut::new(&ring, &l).execute(), CutOutcome::NotIntersecting);
    }

    #[test]
    fn margin_tolerates_endpoint_imprecision() {
        let ring = square(10.0);
        // Ends 1 unit short of the top edge; the default 2 unit margin covers it.
        let l = line(5.0, -5.0, 5.0, 9.0);
        assert!(Cut::new(&ring, &l).execute().is_split());

        let strict = CutParams {
            segment_margin: 0.0,
            ..CutParams::default()
        };
        assert!(!Cut::new(&ring, &l).with_params(strict).execute().is_split());
    }

    #[test]
    fn diagonal_through_corners() {
        let ring = square(10.0);
        let l = line(-5.0, -5.0, 15.0, 15.0);
        let (pos, neg) = Cut::new(&ring, &l).execute().into_rings().unwrap();
        assert_eq!(pos.len(), 3);
        assert_eq!(neg.len(), 3);
        assert_relative_eq!(pos.area(), 50.0, epsilon = 1e-9);
        assert_relative_eq!(neg.area(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn noise_within_epsilon_is_not_a_cut() {
        let ring = square(10.0);
        // Grazes the left edge from outside by less than the side epsilon.
        let l = line(-0.05, -5.0, -0.05, 15.0);
        assert_eq!(Cut::new(&ring, &l).execute(), CutOutcome::NotIntersecting);
    }

    #[test]
    fn concave_ring_area_is_conserved() {
        // U shape opening upward; a horizontal cut crosses both arms.
        let ring = PolygonRing::from_xy(&[
            (0.0, 0.0),
            (9.0, 0.0),
            (9.0, 9.0),
            (6.0, 9.0),
            (6.0, 3.0),
            (3.0, 3.0),
            (3.0, 9.0),
            (0.0, 9.0),
        ])
        .unwrap();
        let l = line(-5.0, 6.0, 15.0, 6.0);
        let (pos, neg) = Cut::new(&ring, &l).execute().into_rings().unwrap();
        assert_relative_eq!(pos.area() + neg.area(), ring.area(), epsilon = 1e-9);
        // The upper side holds both arm tips: 2 × (3 × 3).
        assert_relative_eq!(pos.area(), 18.0, epsilon = 1e-9);
    }

    #[test]
    fn short_segment_across_one_arm_is_unbalanced() {
        let ring = PolygonRing::from_xy(&[
            (0.0, 0.0),
            (9.0, 0.0),
            (9.0, 9.0),
            (6.0, 9.0),
            (6.0, 3.0),
            (3.0, 3.0),
            (3.0, 9.0),
            (0.0, 9.0),
        ])
        .unwrap();
        // Crosses the right arm only; the left arm lies beyond the margin.
        let l = line(5.5, 6.0, 10.5, 6.0);
        let outcome = Cut::new(&ring, &l).execute();
        let CutOutcome::Unbalanced {
            ring_area,
            pieces_area,
        } = outcome
        else {
            panic!("expected an unbalanced cut, got {outcome:?}");
        };
        assert_relative_eq!(ring_area, 63.0, epsilon = 1e-9);
        assert!(pieces_area < ring_area);
        assert!(matches!(
            outcome.into_rings(),
            Err(crate::PolyshardError::Cut(CutError::AreaNotConserved { .. }))
        ));
    }

    #[test]
    fn degenerate_side_is_reported() {
        let outcome = CutOutcome::Split {
            positive: CutPiece::Degenerate { vertex_count: 2 },
            negative: CutPiece::Ring(square(1.0)),
        };
        assert!(matches!(
            outcome.into_rings(),
            Err(crate::PolyshardError::Geometry(GeometryError::DegenerateRing { vertex_count: 2 }))
        ));
    }
}
