//! Solvers for the static stochastic knapsack problem.
//!
//! - [`equation::brent`]: bracketed scalar root finding
//! - [`capacity`]: the capacity-matching equation for a threshold item
//! - [`relaxation`]: the continuous relaxation of a partially fixed instance,
//!   with a certified upper bound
//! - [`branch_and_bound`]: the exact depth-first search built on the relaxation
//!
//! Solver outcomes that are part of normal operation, such as a capacity
//! equation with no root in range or an infeasible relaxation, are returned as
//! typed values rather than errors.

pub mod branch_and_bound;
pub mod capacity;
pub mod equation;
pub mod relaxation;
