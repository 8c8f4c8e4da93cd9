//! The capacity-matching equation for a threshold item.
//!
//! Given a service level `z`, a relaxation point fills the knapsack until the
//! `z`-quantile of the total size meets the capacity:
//!
//! ```text
//! f·μ_k + S_μ + z·sqrt(f·v_k + S_v) = C
//! ```
//!
//! where item `k` sits at the ranking threshold with fraction `f ∈ [0, 1]`,
//! and `S_μ`, `S_v` sum the means and variances of every item already at one.

use thiserror::Error;

use crate::equation::brent;

/// The capacity equation for one threshold item at one service level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityEquation {
    /// Mean size `μ_k` of the threshold item.
    pub mean: f64,
    /// Size variance `v_k` of the threshold item.
    pub variance: f64,
    /// Summed mean `S_μ` of items at one.
    pub base_mean: f64,
    /// Summed variance `S_v` of items at one.
    pub base_variance: f64,
    /// Knapsack capacity `C`.
    pub capacity: f64,
    /// Service level `z`.
    pub z: f64,
}

/// A solution of the capacity equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fraction {
    /// Fraction `f ∈ [0, 1]` of the threshold item.
    pub fraction: f64,
    /// Total variance `f·v_k + S_v` at that fraction.
    pub variance: f64,
}

/// Why the capacity equation has no usable root in `[0, 1]`.
///
/// These are ordinary outcomes: the threshold position is infeasible at the
/// given service level.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum NoFraction {
    #[error("residual has the same sign at f = 0 and f = 1")]
    SameSign,

    #[error("residual is not finite")]
    NonFinite,

    #[error("root search failed: {0}")]
    Solver(brent::Error),
}

impl From<brent::Error> for NoFraction {
    fn from(error: brent::Error) -> Self {
        match error {
            brent::Error::NoSignChange { .. } => Self::SameSign,
            brent::Error::NonFiniteResidual { .. } => Self::NonFinite,
            other => Self::Solver(other),
        }
    }
}

impl CapacityEquation {
    /// Returns the residual `F(f)` of the equation at fraction `f`.
    #[must_use]
    pub fn residual(&self, fraction: f64) -> f64 {
        let variance = (fraction * self.variance + self.base_variance).max(0.0);
        fraction * self.mean + self.base_mean + self.z * variance.sqrt() - self.capacity
    }

    /// Solves the equation for the threshold fraction.
    ///
    /// Endpoint roots are accepted exactly: `f = 0` when `|F(0)|` is within
    /// the residual tolerance, otherwise `f = 1` when `|F(1)|` is. Between the
    /// endpoints the root is found with Brent's method.
    ///
    /// # Errors
    ///
    /// Returns [`NoFraction`] when no root in `[0, 1]` exists or the residual
    /// cannot be evaluated.
    pub fn solve(&self, config: &brent::Config) -> Result<Fraction, NoFraction> {
        let solution = brent::solve(|f| self.residual(f), [0.0, 1.0], config)?;
        let fraction = solution.x;
        if !(0.0..=1.0).contains(&fraction) {
            return Err(NoFraction::SameSign);
        }

        Ok(Fraction {
            fraction,
            variance: fraction * self.variance + self.base_variance,
        })
    }
}
