use std::{fmt, str::FromStr, time::Duration};

use thiserror::Error;

use crate::relaxation;

/// Policy for choosing the free item to branch on at a fractional node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchRule {
    /// The free item whose relaxed value is closest to 0.5 among the items
    /// that are not integral within tolerance.
    #[default]
    Fractional,

    /// The free item with the largest attractiveness at the node's service level.
    Attractiveness,
}

impl FromStr for BranchRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fractional" => Ok(Self::Fractional),
            "attractiveness" => Ok(Self::Attractiveness),
            other => Err(ConfigError::UnknownBranchRule(other.to_string())),
        }
    }
}

impl fmt::Display for BranchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fractional => "fractional",
            Self::Attractiveness => "attractiveness",
        })
    }
}

/// Configuration for the branch-and-bound engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rule: BranchRule,
    tol: f64,
    time_limit: Duration,
    logging: bool,
    relaxation: relaxation::Config,
}

/// Errors that can occur when validating a branch-and-bound config.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown branch rule {0:?}, expected \"fractional\" or \"attractiveness\"")]
    UnknownBranchRule(String),

    #[error("tol must be finite and non-negative")]
    Tol,

    #[error("relaxation config: {0}")]
    Relaxation(#[from] relaxation::ConfigError),
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(BranchRule::Fractional, 1e-5, Duration::from_secs(600)).unwrap()
    }
}

impl Config {
    /// Creates a config with the given rule, tolerance and time limit.
    ///
    /// The tolerance is used for integrality, bound pruning, and the
    /// relaxation's boundary snapping. Logging starts disabled.
    ///
    /// # Errors
    ///
    /// Returns an error if `tol` is negative or non-finite.
    pub fn new(rule: BranchRule, tol: f64, time_limit: Duration) -> Result<Self, ConfigError> {
        if !tol.is_finite() || tol < 0.0 {
            return Err(ConfigError::Tol);
        }
        let relaxation =
            relaxation::Config::new(tol, 1e-10, crate::equation::brent::Config::default())?;

        Ok(Self {
            rule,
            tol,
            time_limit,
            logging: false,
            relaxation,
        })
    }

    /// Enables or disables `tracing` output during the search.
    #[must_use]
    pub fn with_logging(self, logging: bool) -> Self {
        Self { logging, ..self }
    }

    /// Replaces the relaxation settings.
    #[must_use]
    pub fn with_relaxation(self, relaxation: relaxation::Config) -> Self {
        Self { relaxation, ..self }
    }

    #[must_use]
    pub fn rule(&self) -> BranchRule {
        self.rule
    }

    /// Returns the tolerance for integrality and bound pruning.
    #[must_use]
    pub fn tol(&self) -> f64 {
        self.tol
    }

    /// Returns the wall-clock budget, checked once per node.
    #[must_use]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[must_use]
    pub fn logging(&self) -> bool {
        self.logging
    }

    #[must_use]
    pub fn relaxation(&self) -> &relaxation::Config {
        &self.relaxation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_branch_rules() {
        assert_eq!("fractional".parse(), Ok(BranchRule::Fractional));
        assert_eq!("attractiveness".parse(), Ok(BranchRule::Attractiveness));
        assert_eq!(
            "random".parse::<BranchRule>(),
            Err(ConfigError::UnknownBranchRule("random".to_string()))
        );
    }

    #[test]
    fn display_round_trips() {
        for rule in [BranchRule::Fractional, BranchRule::Attractiveness] {
            assert_eq!(rule.to_string().parse(), Ok(rule));
        }
    }

    #[test]
    fn tol_flows_into_relaxation() {
        let config =
            Config::new(BranchRule::Attractiveness, 1e-3, Duration::from_secs(1)).expect("valid");
        assert_eq!(config.relaxation().tol(), 1e-3);
        assert!(!config.logging());
        assert!(config.with_logging(true).logging());
    }

    #[test]
    fn rejects_bad_tol() {
        assert_eq!(
            Config::new(BranchRule::Fractional, f64::NAN, Duration::ZERO),
            Err(ConfigError::Tol)
        );
    }
}
