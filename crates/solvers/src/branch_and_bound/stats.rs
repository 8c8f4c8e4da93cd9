use std::time::Duration;

/// Statistics collected during a branch-and-bound search.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Stats {
    /// Nodes popped and processed.
    pub nodes: usize,
    /// Nodes discarded because their bound could not beat the incumbent.
    pub pruned_by_bound: usize,
    /// Nodes discarded because their relaxation was infeasible.
    pub pruned_infeasible: usize,
    /// Times the incumbent improved.
    pub improvements: usize,
    /// Deepest node processed; the root has depth zero.
    pub max_depth: usize,
    /// Bound of the root relaxation, if the root was processed and feasible.
    pub root_bound: Option<f64>,
    /// Wall-clock time spent in the search.
    pub elapsed: Duration,
}
