//! The numeric construction kernel.
//!
//! Pure, stateless, deterministic functions over raw coordinates. This is the
//! hot path of a solve — a single request can call [`intersect`] millions of
//! times — so nothing here allocates beyond the fixed-capacity result buffer
//! and degeneracy is always signalled by `count == 0`, never by an error
//! value.
//!
//! A single tolerance constant, [`EPSILON`], governs every degeneracy test.

use serde::{Deserialize, Serialize};

/// Tolerance used for every degeneracy and coincidence test in this module.
pub const EPSILON: f64 = 1e-9;

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A line in standard form `A*x + B*y + C = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

/// A circle, storing the radius squared to avoid an unnecessary square root
/// at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub r_sq: f64,
}

/// A fixed-capacity intersection result: at most two points.
///
/// `count` is always in `0..=2`; only the first `count` entries of `points`
/// are meaningful.
#[derive(Debug, Clone, Copy)]
pub struct IntersectionResult {
    pub points: [Point; 2],
    pub count: u8,
}

impl IntersectionResult {
    fn empty() -> Self {
        Self {
            points: [Point::new(0.0, 0.0), Point::new(0.0, 0.0)],
            count: 0,
        }
    }

    fn one(p: Point) -> Self {
        Self {
            points: [p, Point::new(0.0, 0.0)],
            count: 1,
        }
    }

    fn two(p1: Point, p2: Point) -> Self {
        Self {
            points: [p1, p2],
            count: 2,
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Point] {
        &self.points[..self.count as usize]
    }
}

/// Construct the line through two distinct points.
///
/// `A = y1 - y2`, `B = x2 - x1`, `C = x1*y2 - x2*y1`. The result is not
/// normalized; normalization is the canonical form's job (see [`crate::canon`]).
#[must_use]
pub fn construct_line(p1: Point, p2: Point) -> Line {
    Line {
        a: p1.y - p2.y,
        b: p2.x - p1.x,
        c: p1.x * p2.y - p2.x * p1.y,
    }
}

/// Construct the circle centered at `center` passing through `on_circumference`.
#[must_use]
pub fn construct_circle(center: Point, on_circumference: Point) -> Circle {
    let dx = on_circumference.x - center.x;
    let dy = on_circumference.y - center.y;
    Circle {
        cx: center.x,
        cy: center.y,
        r_sq: dx * dx + dy * dy,
    }
}

/// Intersect two lines.
///
/// Returns `count == 0` when the lines are parallel (`|det| < EPSILON`).
#[must_use]
pub fn intersect_line_line(l1: Line, l2: Line) -> IntersectionResult {
    let det = l1.a * l2.b - l2.a * l1.b;
    if det.abs() < EPSILON {
        return IntersectionResult::empty();
    }
    let x = (l2.b * -l1.c - l1.b * -l2.c) / det;
    let y = (l1.a * -l2.c - l2.a * -l1.c) / det;
    IntersectionResult::one(Point::new(x, y))
}

/// Intersect a line and a circle.
///
/// Returns `count == 0` for a degenerate line or a miss, `count == 1` for a
/// tangency, `count == 2` for a proper chord. The sign convention applied to
/// the two chord points is fixed across calls so that the resulting state's
/// canonical form never depends on call history.
#[must_use]
pub fn intersect_line_circle(line: Line, circle: Circle) -> IntersectionResult {
    let norm_sq = line.a * line.a + line.b * line.b;
    if norm_sq < EPSILON {
        return IntersectionResult::empty();
    }

    let x0 = (line.b * line.b * circle.cx - line.a * line.b * circle.cy - line.a * line.c)
        / norm_sq;
    let y0 = (-line.a * line.b * circle.cx + line.a * line.a * circle.cy - line.b * line.c)
        / norm_sq;

    let dx = x0 - circle.cx;
    let dy = y0 - circle.cy;
    let dist_sq = dx * dx + dy * dy;

    if dist_sq > circle.r_sq + EPSILON {
        return IntersectionResult::empty();
    }

    if (dist_sq - circle.r_sq).abs() < EPSILON {
        return IntersectionResult::one(Point::new(x0, y0));
    }

    let half_chord = (circle.r_sq - dist_sq).sqrt();
    let norm = norm_sq.sqrt();

    let p1 = Point::new(
        x0 + (half_chord * -line.b) / norm,
        y0 + (half_chord * line.a) / norm,
    );
    let p2 = Point::new(
        x0 - (half_chord * -line.b) / norm,
        y0 - (half_chord * line.a) / norm,
    );
    IntersectionResult::two(p1, p2)
}

/// Intersect two circles by reducing to a line-circle intersection against
/// the radical line of the pair.
///
/// Returns `count == 0` for concentric circles or circles that do not meet.
#[must_use]
pub fn intersect_circle_circle(c1: Circle, c2: Circle) -> IntersectionResult {
    let ddx = c2.cx - c1.cx;
    let ddy = c2.cy - c1.cy;
    let d_sq = ddx * ddx + ddy * ddy;
    if d_sq < EPSILON {
        return IntersectionResult::empty();
    }

    let r1 = c1.r_sq.sqrt();
    let r2 = c2.r_sq.sqrt();
    let d = d_sq.sqrt();

    if d > r1 + r2 + EPSILON || d < (r1 - r2).abs() - EPSILON {
        return IntersectionResult::empty();
    }

    let radical_line = Line {
        a: 2.0 * ddx,
        b: 2.0 * ddy,
        c: (c1.cx * c1.cx - c2.cx * c2.cx) + (c1.cy * c1.cy - c2.cy * c2.cy)
            - (c1.r_sq - c2.r_sq),
    };

    intersect_line_circle(radical_line, c1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn construct_line_matches_formula() {
        let l = construct_line(Point::new(0.0, 0.0), Point::new(2.0, 0.0));
        assert!(approx_eq(l.a, 0.0));
        assert!(approx_eq(l.b, -2.0));
        assert!(approx_eq(l.c, 0.0));
    }

    #[test]
    fn construct_circle_stores_radius_squared() {
        let c = construct_circle(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!(approx_eq(c.r_sq, 25.0));
    }

    #[test]
    fn line_line_parallel_is_degenerate() {
        let l1 = Line { a: 1.0, b: 0.0, c: 0.0 };
        let l2 = Line { a: 1.0, b: 0.0, c: -5.0 };
        let res = intersect_line_line(l1, l2);
        assert_eq!(res.count, 0);
    }

    #[test]
    fn line_line_crosses_at_expected_point() {
        let l1 = Line { a: 1.0, b: 0.0, c: 0.0 }; // x = 0
        let l2 = Line { a: 0.0, b: 1.0, c: 0.0 }; // y = 0
        let res = intersect_line_line(l1, l2);
        assert_eq!(res.count, 1);
        assert!(approx_eq(res.points[0].x, 0.0));
        assert!(approx_eq(res.points[0].y, 0.0));
    }

    #[test]
    fn line_circle_tangent_returns_one_point() {
        let circle = Circle { cx: 0.0, cy: 0.0, r_sq: 4.0 };
        let line = Line { a: 1.0, b: 0.0, c: -2.0 }; // x = 2, tangent to r=2
        let res = intersect_line_circle(line, circle);
        assert_eq!(res.count, 1);
        assert!(approx_eq(res.points[0].x, 2.0));
        assert!(approx_eq(res.points[0].y, 0.0));
    }

    #[test]
    fn line_circle_miss_returns_zero() {
        let circle = Circle { cx: 0.0, cy: 0.0, r_sq: 1.0 };
        let line = Line { a: 1.0, b: 0.0, c: -5.0 }; // x = 5, far from r=1
        let res = intersect_line_circle(line, circle);
        assert_eq!(res.count, 0);
    }

    #[test]
    fn line_circle_chord_returns_two_points() {
        let circle = Circle { cx: 0.0, cy: 0.0, r_sq: 4.0 };
        let line = Line { a: 1.0, b: 0.0, c: 0.0 }; // x = 0
        let res = intersect_line_circle(line, circle);
        assert_eq!(res.count, 2);
        let ys: Vec<f64> = res.as_slice().iter().map(|p| p.y).collect();
        assert!(ys.iter().any(|&y| approx_eq(y, 2.0)));
        assert!(ys.iter().any(|&y| approx_eq(y, -2.0)));
    }

    #[test]
    fn circle_circle_concentric_is_degenerate() {
        let c1 = Circle { cx: 0.0, cy: 0.0, r_sq: 1.0 };
        let c2 = Circle { cx: 0.0, cy: 0.0, r_sq: 4.0 };
        let res = intersect_circle_circle(c1, c2);
        assert_eq!(res.count, 0);
    }

    #[test]
    fn circle_circle_separated_is_degenerate() {
        let c1 = Circle { cx: 0.0, cy: 0.0, r_sq: 1.0 };
        let c2 = Circle { cx: 10.0, cy: 0.0, r_sq: 1.0 };
        let res = intersect_circle_circle(c1, c2);
        assert_eq!(res.count, 0);
    }

    #[test]
    fn circle_circle_crossing_returns_two_points() {
        // Two circles of radius 2, centers 2 apart: classic vesica piscis.
        let c1 = Circle { cx: 0.0, cy: 0.0, r_sq: 4.0 };
        let c2 = Circle { cx: 2.0, cy: 0.0, r_sq: 4.0 };
        let res = intersect_circle_circle(c1, c2);
        assert_eq!(res.count, 2);
        for p in res.as_slice() {
            assert!(approx_eq(p.x, 1.0));
        }
    }

    #[test]
    fn intersection_order_is_symmetric_as_multiset() {
        let c1 = Circle { cx: 0.0, cy: 0.0, r_sq: 4.0 };
        let c2 = Circle { cx: 2.0, cy: 0.0, r_sq: 4.0 };
        let forward = intersect_circle_circle(c1, c2);
        let backward = intersect_circle_circle(c2, c1);
        assert_eq!(forward.count, backward.count);
        let mut fys: Vec<i64> = forward.as_slice().iter().map(|p| (p.y * 1e6) as i64).collect();
        let mut bys: Vec<i64> = backward.as_slice().iter().map(|p| (p.y * 1e6) as i64).collect();
        fys.sort_unstable();
        bys.sort_unstable();
        assert_eq!(fys, bys);
    }
}
