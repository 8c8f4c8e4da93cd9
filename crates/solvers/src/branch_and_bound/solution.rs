use sskp_core::Fixing;

use super::Stats;

/// How the search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The search tree was exhausted; the incumbent is optimal within tolerance.
    Optimal,

    /// The time limit was reached; the incumbent may be suboptimal.
    TimeLimit,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The best fully binary allocation found.
#[derive(Debug, Clone, PartialEq)]
pub struct Incumbent {
    /// Exact expected profit of `allocation`.
    pub objective: f64,

    /// Binary allocation, one entry per item.
    pub allocation: Vec<f64>,

    /// Fixing of the node that produced the incumbent.
    pub fixing: Fixing,

    /// Processing order of that node, counting from one.
    pub node: usize,
}

/// The result of a branch-and-bound search.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final search status.
    pub status: Status,

    /// Best binary allocation found, if any.
    pub incumbent: Option<Incumbent>,

    /// Search statistics.
    pub stats: Stats,
}

impl Solution {
    /// Returns the incumbent objective, or `-∞` if none was found.
    #[must_use]
    pub fn objective(&self) -> f64 {
        self.incumbent
            .as_ref()
            .map_or(f64::NEG_INFINITY, |incumbent| incumbent.objective)
    }

    /// Returns the incumbent allocation, if any.
    #[must_use]
    pub fn allocation(&self) -> Option<&[f64]> {
        self.incumbent
            .as_ref()
            .map(|incumbent| incumbent.allocation.as_slice())
    }

    /// Returns true if the search stopped on its time limit.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.status == Status::TimeLimit
    }

    /// Returns the number of nodes processed.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.stats.nodes
    }

    /// Returns the relative gap between the root bound and the incumbent.
    ///
    /// A completed search has gap zero. Otherwise the gap is
    /// `|bound − objective| / max(|objective|, 1e-10)`, and infinite when no
    /// incumbent or no root bound is available.
    #[must_use]
    pub fn gap(&self) -> f64 {
        if self.status == Status::Optimal {
            return 0.0;
        }
        match (self.stats.root_bound, self.incumbent.as_ref()) {
            (Some(bound), Some(incumbent)) => {
                (bound - incumbent.objective).abs() / incumbent.objective.abs().max(1e-10)
            }
            _ => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn solution(status: Status, objective: Option<f64>, root_bound: Option<f64>) -> Solution {
        Solution {
            status,
            incumbent: objective.map(|objective| Incumbent {
                objective,
                allocation: vec![1.0],
                fixing: Fixing::free(1),
                node: 1,
            }),
            stats: Stats {
                nodes: 3,
                root_bound,
                ..Stats::default()
            },
        }
    }

    #[test]
    fn accessors_without_incumbent() {
        let solution = solution(Status::TimeLimit, None, None);
        assert_eq!(solution.objective(), f64::NEG_INFINITY);
        assert!(solution.allocation().is_none());
        assert!(solution.timed_out());
        assert_eq!(solution.node_count(), 3);
        assert_eq!(solution.gap(), f64::INFINITY);
    }

    #[test]
    fn gap_is_zero_when_optimal() {
        let solution = solution(Status::Optimal, Some(8.0), Some(10.0));
        assert_eq!(solution.gap(), 0.0);
        assert!(!solution.timed_out());
    }

    #[test]
    fn gap_relative_to_incumbent() {
        let solution = solution(Status::StoppedByObserver, Some(8.0), Some(10.0));
        assert_relative_eq!(solution.gap(), 0.25);
        assert_eq!(solution.allocation(), Some([1.0].as_slice()));
    }
}
