//! The admissible heuristic: a conservative lower bound on the number of
//! construction steps remaining to reach the target.
//!
//! Deliberately weak — a stronger admissible heuristic is a valid future
//! upgrade, but it must never overestimate, or A*'s optimality guarantee
//! breaks.

use geo_kernel::state::{FigureKind, State};

/// Estimate the minimum remaining steps to a figure of `target_kind`, given
/// the current tallies in `state`. Returns `None` only for an unrecognized
/// target kind (pruned by the caller); every [`FigureKind`] is recognized,
/// so in practice this always returns `Some`.
#[must_use]
pub fn estimate(state: &State, target_kind: FigureKind) -> Option<u32> {
    let n_points = state.point_count();
    let n_lines = state.line_count();
    let n_circles = state.circle_count();

    match target_kind {
        FigureKind::Point => {
            if n_lines >= 2 || n_circles >= 2 || (n_lines >= 1 && n_circles >= 1) {
                Some(1)
            } else if n_points >= 2 {
                Some(3)
            } else {
                Some(5)
            }
        }
        FigureKind::Line | FigureKind::Circle => {
            if n_points >= 2 {
                Some(1)
            } else {
                Some(2)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_kernel::geometry::Point;
    use geo_kernel::state::FigureId;

    fn state_with(points: usize, lines: usize, circles: usize) -> State {
        use geo_kernel::geometry::{Circle, Line};
        let pts: Vec<_> = (1..=points as u64)
            .map(|i| (FigureId::new(FigureKind::Point, i), Point::new(i as f64, 0.0)))
            .collect();
        let lns: Vec<_> = (1..=lines as u64)
            .map(|i| (FigureId::new(FigureKind::Line, i), Line { a: i as f64, b: 1.0, c: 0.0 }))
            .collect();
        let crs: Vec<_> = (1..=circles as u64)
            .map(|i| (FigureId::new(FigureKind::Circle, i), Circle { cx: i as f64, cy: 0.0, r_sq: 1.0 }))
            .collect();
        State::from_initial(pts, lns, crs)
    }

    #[test]
    fn point_target_with_two_lines_is_one_step() {
        let s = state_with(0, 2, 0);
        assert_eq!(estimate(&s, FigureKind::Point), Some(1));
    }

    #[test]
    fn point_target_with_line_and_circle_is_one_step() {
        let s = state_with(0, 1, 1);
        assert_eq!(estimate(&s, FigureKind::Point), Some(1));
    }

    #[test]
    fn point_target_with_two_points_only_is_three_steps() {
        let s = state_with(2, 0, 0);
        assert_eq!(estimate(&s, FigureKind::Point), Some(3));
    }

    #[test]
    fn point_target_with_fewer_than_two_points_is_five_steps() {
        let s = state_with(1, 0, 0);
        assert_eq!(estimate(&s, FigureKind::Point), Some(5));
        let empty = state_with(0, 0, 0);
        assert_eq!(estimate(&empty, FigureKind::Point), Some(5));
    }

    #[test]
    fn line_target_with_two_points_is_one_step() {
        let s = state_with(2, 0, 0);
        assert_eq!(estimate(&s, FigureKind::Line), Some(1));
    }

    #[test]
    fn line_target_without_two_points_is_two_steps() {
        let s = state_with(1, 0, 0);
        assert_eq!(estimate(&s, FigureKind::Line), Some(2));
    }

    #[test]
    fn circle_target_mirrors_line_target_rule() {
        let with_points = state_with(2, 0, 0);
        let without = state_with(0, 0, 0);
        assert_eq!(estimate(&with_points, FigureKind::Circle), Some(1));
        assert_eq!(estimate(&without, FigureKind::Circle), Some(2));
    }
}
