use thiserror::Error;

/// Configuration for the Brent root solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    max_iters: usize,
    x_abs_tol: f64,
    residual_tol: f64,
}

/// Errors that can occur when validating a Brent solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("x_abs_tol must be finite and non-negative")]
    XAbs,

    #[error("residual_tol must be finite and non-negative")]
    Residual,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(100, 1e-12, 1e-12).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated tolerances.
    ///
    /// # Errors
    ///
    /// Returns an error if any tolerance is negative or non-finite.
    pub fn new(max_iters: usize, x_abs_tol: f64, residual_tol: f64) -> Result<Self, ConfigError> {
        if !x_abs_tol.is_finite() || x_abs_tol < 0.0 {
            return Err(ConfigError::XAbs);
        }
        if !residual_tol.is_finite() || residual_tol < 0.0 {
            return Err(ConfigError::Residual);
        }

        Ok(Self {
            max_iters,
            x_abs_tol,
            residual_tol,
        })
    }

    /// Returns the maximum number of iterations.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Returns the absolute tolerance for x convergence.
    #[must_use]
    pub fn x_abs_tol(&self) -> f64 {
        self.x_abs_tol
    }

    /// Returns the residual magnitude accepted as a root.
    #[must_use]
    pub fn residual_tol(&self) -> f64 {
        self.residual_tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_tolerances() {
        assert_eq!(Config::new(10, -1.0, 0.0), Err(ConfigError::XAbs));
        assert_eq!(Config::new(10, f64::NAN, 0.0), Err(ConfigError::XAbs));
        assert_eq!(
            Config::new(10, 0.0, f64::INFINITY),
            Err(ConfigError::Residual)
        );
    }

    #[test]
    fn accepts_zero_tolerances() {
        let config = Config::new(5, 0.0, 0.0).expect("valid config");
        assert_eq!(config.max_iters(), 5);
        assert_eq!(config.x_abs_tol(), 0.0);
        assert_eq!(config.residual_tol(), 0.0);
    }
}
