//! The successor generator: every distinct one-step extension of a state.
//!
//! Enumeration order (only load-bearing for tie-breaking among equal
//! priorities, never for correctness): intersections first, then lines,
//! then circles. Within each category, figures are visited in ascending id
//! order (the state's maps are `BTreeMap`s), which is what makes two
//! separate `solve()` runs over the same input enumerate identically.

use geo_kernel::geometry::{
    intersect_circle_circle, intersect_line_circle, intersect_line_line, Circle, Line,
};
use geo_kernel::state::{Figure, FigureId, FigureKind, Operation, State, Step};

fn try_add(state: &mut State, figure: Figure) -> Option<FigureId> {
    if state.contains_canonical(figure) {
        None
    } else {
        Some(state.insert_new(figure))
    }
}

fn line_of(state: &State, ordinal: u64) -> Line {
    match state.lines().get(&ordinal) {
        Some(Figure::Line(l)) => *l,
        _ => unreachable!("lines map holds only Figure::Line at known ordinals"),
    }
}

fn circle_of(state: &State, ordinal: u64) -> Circle {
    match state.circles().get(&ordinal) {
        Some(Figure::Circle(c)) => *c,
        _ => unreachable!("circles map holds only Figure::Circle at known ordinals"),
    }
}

fn point_of(state: &State, ordinal: u64) -> geo_kernel::geometry::Point {
    match state.points().get(&ordinal) {
        Some(Figure::Point(p)) => *p,
        _ => unreachable!("points map holds only Figure::Point at known ordinals"),
    }
}

/// Record an intersection's (possibly two) results as a single construction
/// step, if at least one result is canonically new. A two-point result that
/// adds exactly one new point (the other already present) is still a single
/// step whose output is the new point.
fn push_intersection(
    out: &mut Vec<(State, Step)>,
    state: &State,
    inputs: Vec<FigureId>,
    points: &[geo_kernel::geometry::Point],
) {
    let mut working = state.clone();
    let mut new_ids = Vec::new();
    for &p in points {
        if let Some(id) = try_add(&mut working, Figure::Point(p)) {
            new_ids.push(id);
        }
    }
    if let Some(&first) = new_ids.first() {
        out.push((
            working,
            Step {
                operation: Operation::Intersection,
                inputs,
                output: first,
            },
        ));
    }
}

/// Enumerate every locally novel one-step extension of `state`.
///
/// Does not consult the heuristic or any visited set — both are the
/// search engine's concern, not the generator's.
#[must_use]
pub fn generate_successors(state: &State) -> Vec<(State, Step)> {
    let mut successors = Vec::new();

    let line_ids: Vec<u64> = state.lines().keys().copied().collect();
    let circle_ids: Vec<u64> = state.circles().keys().copied().collect();
    let point_ids: Vec<u64> = state.points().keys().copied().collect();

    // 1. Intersections: line-line, then line-circle, then circle-circle.
    for i in 0..line_ids.len() {
        for j in (i + 1)..line_ids.len() {
            let (l1_id, l2_id) = (line_ids[i], line_ids[j]);
            let res = intersect_line_line(line_of(state, l1_id), line_of(state, l2_id));
            if res.count == 0 {
                continue;
            }
            push_intersection(
                &mut successors,
                state,
                vec![
                    FigureId::new(FigureKind::Line, l1_id),
                    FigureId::new(FigureKind::Line, l2_id),
                ],
                res.as_slice(),
            );
        }
    }

    for &l_id in &line_ids {
        for &c_id in &circle_ids {
            let res = intersect_line_circle(line_of(state, l_id), circle_of(state, c_id));
            if res.count == 0 {
                continue;
            }
            push_intersection(
                &mut successors,
                state,
                vec![
                    FigureId::new(FigureKind::Line, l_id),
                    FigureId::new(FigureKind::Circle, c_id),
                ],
                res.as_slice(),
            );
        }
    }

    for i in 0..circle_ids.len() {
        for j in (i + 1)..circle_ids.len() {
            let (c1_id, c2_id) = (circle_ids[i], circle_ids[j]);
            let res = intersect_circle_circle(circle_of(state, c1_id), circle_of(state, c2_id));
            if res.count == 0 {
                continue;
            }
            push_intersection(
                &mut successors,
                state,
                vec![
                    FigureId::new(FigureKind::Circle, c1_id),
                    FigureId::new(FigureKind::Circle, c2_id),
                ],
                res.as_slice(),
            );
        }
    }

    // 2. Lines: every unordered pair of points.
    for i in 0..point_ids.len() {
        for j in (i + 1)..point_ids.len() {
            let (p1_id, p2_id) = (point_ids[i], point_ids[j]);
            let line = geo_kernel::geometry::construct_line(point_of(state, p1_id), point_of(state, p2_id));
            let mut working = state.clone();
            if let Some(output) = try_add(&mut working, Figure::Line(line)) {
                successors.push((
                    working,
                    Step {
                        operation: Operation::Line,
                        inputs: vec![
                            FigureId::new(FigureKind::Point, p1_id),
                            FigureId::new(FigureKind::Point, p2_id),
                        ],
                        output,
                    },
                ));
            }
        }
    }

    // 3. Circles: every ordered pair of distinct points (center, on-circumference).
    for &center_id in &point_ids {
        for &on_circ_id in &point_ids {
            if center_id == on_circ_id {
                continue;
            }
            let circle = geo_kernel::geometry::construct_circle(
                point_of(state, center_id),
                point_of(state, on_circ_id),
            );
            let mut working = state.clone();
            if let Some(output) = try_add(&mut working, Figure::Circle(circle)) {
                successors.push((
                    working,
                    Step {
                        operation: Operation::Circle,
                        inputs: vec![
                            FigureId::new(FigureKind::Point, center_id),
                            FigureId::new(FigureKind::Point, on_circ_id),
                        ],
                        output,
                    },
                ));
            }
        }
    }

    successors
}
