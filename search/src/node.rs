//! Search node and frontier ordering key.

use geo_kernel::state::{State, Step};

/// An immutable node awaiting expansion.
///
/// Ordering for frontier extraction uses [`FrontierKey`]: lower `f_cost`
/// first, ties broken by older `creation_order` (strict FIFO among equal
/// priorities — not by depth, since `g_cost` already participates in
/// `f_cost` and a separate depth tiebreak would double-count it).
#[derive(Debug, Clone)]
pub struct SearchNode {
    pub state: State,
    pub path: Vec<Step>,
    pub g_cost: u32,
    pub h_cost: u32,
    pub creation_order: u64,
}

impl SearchNode {
    #[must_use]
    pub fn f_cost(&self) -> u32 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// The frontier ordering key: `(f_cost, creation_order)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl From<&SearchNode> for FrontierKey {
    fn from(node: &SearchNode) -> Self {
        Self {
            f_cost: node.f_cost(),
            creation_order: node.creation_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontier_key_lower_f_cost_wins() {
        let a = FrontierKey { f_cost: 1, creation_order: 10 };
        let b = FrontierKey { f_cost: 2, creation_order: 1 };
        assert!(a < b);
    }

    #[test]
    fn frontier_key_ties_broken_by_creation_order() {
        let a = FrontierKey { f_cost: 3, creation_order: 5 };
        let b = FrontierKey { f_cost: 3, creation_order: 6 };
        assert!(a < b, "older creation_order should sort first on an f_cost tie");
    }

    #[test]
    fn f_cost_is_sum_of_g_and_h() {
        let node = SearchNode {
            state: State::empty(),
            path: Vec::new(),
            g_cost: 3,
            h_cost: 7,
            creation_order: 0,
        };
        assert_eq!(node.f_cost(), 10);
    }
}
