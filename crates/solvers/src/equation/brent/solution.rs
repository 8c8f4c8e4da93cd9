/// Indicates whether the solver converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Converged according to the configured tolerances.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,
}

/// The result of a Brent solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Best estimate of the root.
    pub x: f64,

    /// Residual at the reported root estimate.
    pub residual: f64,

    /// Iteration count when the solver finished.
    pub iters: usize,
}
