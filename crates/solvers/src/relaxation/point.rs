use thiserror::Error;

/// The best continuous candidate found for one fixing.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationPoint {
    /// Full-length allocation with entries in `[0, 1]`.
    pub allocation: Vec<f64>,

    /// Service level `z` the point was derived at.
    pub z: f64,

    /// Total variance `V` of the allocation.
    pub variance: f64,

    /// Objective of the point.
    pub objective: f64,

    /// Upper bound on every binary completion of the fixing.
    ///
    /// Never below `objective`.
    pub bound: f64,

    /// Index of the item left at a fractional value by the capacity equation,
    /// or `None` when the point came from a boundary variant, a corner, or a
    /// fully fixed node.
    pub threshold: Option<usize>,
}

impl RelaxationPoint {
    /// Returns true if every entry is within `tol` of zero or one.
    #[must_use]
    pub fn is_integral(&self, tol: f64) -> bool {
        self.allocation
            .iter()
            .all(|&x| (x - x.round()).abs() <= tol)
    }

    /// Iterates over `(index, value)` pairs that are not within `tol` of an integer.
    pub fn fractional(&self, tol: f64) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.allocation
            .iter()
            .copied()
            .enumerate()
            .filter(move |&(_, x)| (x - x.round()).abs() > tol)
    }
}

/// No candidate was found across all service levels and thresholds.
///
/// A normal outcome: the branch-and-bound engine treats it as node
/// infeasibility and prunes.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no feasible relaxation point after {tried} service-level/threshold pairs")]
pub struct Infeasible {
    /// Number of `(z, k)` pairs for which the capacity equation was solved.
    pub tried: usize,
}

/// A relaxation candidate before its bound is certified.
#[derive(Debug, Clone)]
pub(super) struct Candidate {
    pub allocation: Vec<f64>,
    pub z: f64,
    pub variance: f64,
    pub objective: f64,
    pub threshold: Option<usize>,
}

impl Candidate {
    pub fn into_point(self, bound: f64) -> RelaxationPoint {
        RelaxationPoint {
            allocation: self.allocation,
            z: self.z,
            variance: self.variance,
            objective: self.objective,
            bound: bound.max(self.objective),
            threshold: self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(allocation: Vec<f64>) -> RelaxationPoint {
        RelaxationPoint {
            allocation,
            z: 0.0,
            variance: 1.0,
            objective: 1.0,
            bound: 2.0,
            threshold: None,
        }
    }

    #[test]
    fn integrality_respects_tolerance() {
        assert!(point(vec![0.0, 1.0, 1.0 - 1e-9]).is_integral(1e-6));
        assert!(!point(vec![0.0, 0.4, 1.0]).is_integral(1e-6));
    }

    #[test]
    fn lists_fractional_entries() {
        let point = point(vec![1.0, 0.25, 1e-9, 0.75]);
        let fractional: Vec<_> = point.fractional(1e-6).collect();
        assert_eq!(fractional, vec![(1, 0.25), (3, 0.75)]);
    }

    #[test]
    fn bound_never_below_objective() {
        let candidate = Candidate {
            allocation: vec![1.0],
            z: 0.0,
            variance: 0.0,
            objective: 5.0,
            threshold: None,
        };
        assert_eq!(candidate.into_point(4.0).bound, 5.0);
    }
}
