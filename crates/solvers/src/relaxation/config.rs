use thiserror::Error;

use crate::equation::brent;

/// Configuration for the relaxation solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    tol: f64,
    pair_tol: f64,
    root: brent::Config,
    midpoints: bool,
    corners: bool,
    probe_count: usize,
    probe_limit: f64,
}

/// Errors that can occur when validating a relaxation config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tol must be finite and non-negative")]
    Tol,

    #[error("pair_tol must be finite and non-negative")]
    PairTol,

    #[error("probe limit must be finite and positive")]
    ProbeLimit,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1e-5, 1e-10, brent::Config::default()).unwrap()
    }
}

impl Config {
    /// Creates a config with the given tolerances and root solver settings.
    ///
    /// Midpoint enumeration starts disabled, corner candidates enabled, and
    /// the bound is probed at 101 service levels evenly spaced on `[-5, 5]`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tolerance is negative or non-finite.
    pub fn new(tol: f64, pair_tol: f64, root: brent::Config) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::Tol);
        }
        if !pair_tol.is_finite() || pair_tol < 0.0 {
            return Err(ConfigError::PairTol);
        }

        Ok(Self {
            tol,
            pair_tol,
            root,
            midpoints: false,
            corners: true,
            probe_count: 101,
            probe_limit: 5.0,
        })
    }

    /// Enables or disables the exhaustive variant, which also enumerates the
    /// midpoints between consecutive candidate service levels.
    #[must_use]
    pub fn with_midpoints(self, midpoints: bool) -> Self {
        Self { midpoints, ..self }
    }

    /// Enables or disables the "all free at one" and "all free at zero"
    /// candidates evaluated after the service-level enumeration.
    #[must_use]
    pub fn with_corners(self, corners: bool) -> Self {
        Self { corners, ..self }
    }

    /// Sets the service levels probed when certifying the upper bound:
    /// `count` values evenly spaced on `[-limit, limit]`.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is not finite and positive.
    pub fn with_probes(self, count: usize, limit: f64) -> Result<Self, ConfigError> {
        if !limit.is_finite() || limit <= 0.0 {
            return Err(ConfigError::ProbeLimit);
        }
        Ok(Self {
            probe_count: count,
            probe_limit: limit,
            ..self
        })
    }

    /// Returns the margin by which a boundary variant must beat a fractional
    /// candidate to replace it.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the smallest attractiveness-curve slope difference for which
    /// two curves are intersected.
    #[must_use]
    pub fn pair_tol(&self) -> f64 {
        self.pair_tol
    }

    /// Returns the root solver settings.
    #[must_use]
    pub fn root(&self) -> &brent::Config {
        &self.root
    }

    #[must_use]
    pub fn midpoints(&self) -> bool {
        self.midpoints
    }

    #[must_use]
    pub fn corners(&self) -> bool {
        self.corners
    }

    /// Iterates over the probe service levels in ascending order.
    pub fn probes(&self) -> impl Iterator<Item = f64> + '_ {
        let count = self.probe_count;
        let limit = self.probe_limit;
        (0..count).map(move |i| {
            if count == 1 {
                0.0
            } else {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64 / (count - 1) as f64;
                -limit + 2.0 * limit * t
            }
        })
    }
}
