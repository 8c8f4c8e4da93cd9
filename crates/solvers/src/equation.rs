//! Solvers for scalar equations, finding a root of `f(x) = 0`.
//!
//! # Solvers
//!
//! - [`brent`]: guaranteed convergence on a bracketed interval, with
//!   superlinear steps when the residual is well behaved

pub mod brent;
