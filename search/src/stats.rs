//! Search statistics and termination reporting.
//!
//! Deliberately smaller than a full expansion-event audit log: the contract
//! only requires `states_explored`, but a caller benefits from being able to
//! tell "the budget cut this search off" apart from "no path exists" without
//! re-deriving it from the path alone.

/// Why a `solve()` call stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A figure matching the target was produced.
    GoalReached,
    /// The open set emptied without reaching the target.
    FrontierExhausted,
    /// `max_steps` was reached before a goal was found.
    StepBudgetExceeded,
    /// The caller's cancellation flag was observed set.
    Cancelled,
}

/// Statistics reported alongside every `solve()` outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of distinct states admitted to the visited set.
    pub states_explored: usize,
    /// Number of nodes popped from the open set and expanded.
    pub nodes_expanded: usize,
    /// Largest open-set size reached during the search.
    pub open_high_water: usize,
    pub termination_reason: TerminationReason,
}
