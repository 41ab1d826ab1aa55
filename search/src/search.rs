//! The best-first search engine: `solve()`.
//!
//! Single-threaded and synchronous. Cancellation is cooperative: the caller
//! clones a shared `AtomicBool` and flips it from another thread; this loop
//! checks it once per iteration and nowhere else.

use std::sync::atomic::{AtomicBool, Ordering};

use geo_kernel::state::{State, Step};

use crate::frontier::BestFirstFrontier;
use crate::heuristic;
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::stats::{SearchStats, TerminationReason};
use crate::successors::generate_successors;
use crate::target::Target;

/// The result of a `solve()` call: a minimum-length path, or `None` if the
/// target was not reached within budget, plus statistics either way.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub path: Option<Vec<Step>>,
    pub stats: SearchStats,
}

/// Search for a minimum-length construction sequence from `initial_state` to
/// `target`.
///
/// Because the heuristic is admissible and nodes are ordered by strict
/// `(f_cost, creation_order)`, the first goal popped has minimum `g_cost`.
#[must_use]
pub fn solve(
    initial_state: State,
    target: Target,
    policy: SearchPolicy,
    cancel: &AtomicBool,
) -> SolveOutcome {
    let mut frontier = BestFirstFrontier::new();
    let mut creation_order: u64 = 0;
    let mut nodes_expanded: usize = 0;
    let mut budget_discards: usize = 0;

    let h0 = heuristic::estimate(&initial_state, target.kind()).unwrap_or(u32::MAX);
    frontier.mark_visited(initial_state.fingerprint().hex_digest());
    frontier.push(SearchNode {
        state: initial_state,
        path: Vec::new(),
        g_cost: 0,
        h_cost: h0,
        creation_order,
    });

    loop {
        if cancel.load(Ordering::Relaxed) {
            return SolveOutcome {
                path: None,
                stats: finish(&frontier, nodes_expanded, TerminationReason::Cancelled),
            };
        }

        let Some(node) = frontier.pop() else {
            let reason = if budget_discards > 0 {
                TerminationReason::StepBudgetExceeded
            } else {
                TerminationReason::FrontierExhausted
            };
            return SolveOutcome {
                path: None,
                stats: finish(&frontier, nodes_expanded, reason),
            };
        };

        if node.g_cost >= policy.max_steps {
            budget_discards += 1;
            continue;
        }

        nodes_expanded += 1;
        tracing::debug!(
            fingerprint = %node.state.fingerprint().as_str(),
            f_cost = node.f_cost(),
            g_cost = node.g_cost,
            "expanding node"
        );

        for (new_state, step) in generate_successors(&node.state) {
            let fingerprint = new_state.fingerprint();
            let fingerprint_hex = fingerprint.hex_digest().to_string();
            if frontier.is_visited(&fingerprint_hex) {
                continue;
            }
            if frontier.len() > policy.max_open_list_size {
                continue;
            }
            frontier.mark_visited(&fingerprint_hex);

            let Some(output_figure) = new_state.get(step.output) else {
                continue;
            };

            let mut new_path = node.path.clone();
            new_path.push(step);

            if target.matches(output_figure) {
                let stats = finish(&frontier, nodes_expanded, TerminationReason::GoalReached);
                tracing::info!(
                    states_explored = stats.states_explored,
                    path_len = new_path.len(),
                    "solve terminated"
                );
                return SolveOutcome {
                    path: Some(new_path),
                    stats,
                };
            }

            let Some(h) = heuristic::estimate(&new_state, target.kind()) else {
                continue;
            };

            creation_order += 1;
            frontier.push(SearchNode {
                state: new_state,
                path: new_path,
                g_cost: node.g_cost + 1,
                h_cost: h,
                creation_order,
            });
        }
    }
}

fn finish(frontier: &BestFirstFrontier, nodes_expanded: usize, reason: TerminationReason) -> SearchStats {
    SearchStats {
        states_explored: frontier.visited_count(),
        nodes_expanded,
        open_high_water: frontier.high_water(),
        termination_reason: reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_kernel::geometry::Point;
    use geo_kernel::state::{FigureId, FigureKind};

    fn cancel_flag() -> AtomicBool {
        AtomicBool::new(false)
    }

    // Midpoint, perpendicular-bisector, and unsolvable-within-budget scenarios
    // are covered as end-to-end scenarios in `tests/scenarios.rs`; these unit
    // tests stick to engine mechanics the scenario tests don't exercise.

    #[test]
    fn cancellation_flag_short_circuits_before_any_expansion() {
        let state = State::from_initial(
            vec![
                (FigureId::new(FigureKind::Point, 1), Point::new(0.0, 0.0)),
                (FigureId::new(FigureKind::Point, 2), Point::new(2.0, 0.0)),
            ],
            vec![],
            vec![],
        );
        let target = Target::point(Point::new(1.0, 0.0));
        let cancel = AtomicBool::new(true);
        let outcome = solve(state, target, SearchPolicy::default(), &cancel);
        assert!(outcome.path.is_none());
        assert_eq!(outcome.stats.termination_reason, TerminationReason::Cancelled);
        assert_eq!(outcome.stats.nodes_expanded, 0);
    }

    #[test]
    fn repeated_solves_on_identical_input_are_deterministic() {
        let make_state = || {
            State::from_initial(
                vec![
                    (FigureId::new(FigureKind::Point, 1), Point::new(0.0, 0.0)),
                    (FigureId::new(FigureKind::Point, 2), Point::new(2.0, 0.0)),
                ],
                vec![],
                vec![],
            )
        };
        let target = Target::point(Point::new(1.0, 0.0));
        let first = solve(make_state(), target, SearchPolicy::default(), &cancel_flag());
        let second = solve(make_state(), target, SearchPolicy::default(), &cancel_flag());
        assert_eq!(first.path, second.path);
        assert_eq!(first.stats.states_explored, second.stats.states_explored);
    }

    #[test]
    fn trivial_target_already_present_is_not_found_at_zero_steps() {
        // Goal test only fires on newly created figures; a target equal to an
        // initial figure requires the caller to pre-check (see the reference
        // CLI), not the engine, by design.
        let state = State::from_initial(
            vec![(FigureId::new(FigureKind::Point, 1), Point::new(3.0, 4.0))],
            vec![],
            vec![],
        );
        let target = Target::point(Point::new(3.0, 4.0));
        let outcome = solve(state, target, SearchPolicy::default(), &cancel_flag());
        // The engine will eventually find some other path producing (3,4)
        // again via construction, or exhaust — either way it never reports
        // a zero-length path.
        if let Some(path) = outcome.path {
            assert!(!path.is_empty());
        }
    }
}
