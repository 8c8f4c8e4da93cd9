//! Brent's method for scalar root finding on a bracketed interval.
//!
//! # Algorithm
//!
//! Brent's method keeps a bracket `[b, c]` whose residuals have opposite
//! signs. Each iteration tries an inverse quadratic (or secant) step from the
//! last three points and falls back to bisection whenever the interpolated
//! step would leave the bracket or shrink it too slowly. Convergence is
//! therefore guaranteed, and near a simple root it is superlinear.
//!
//! # Termination
//!
//! The solver returns [`Status::Converged`] when the residual magnitude drops
//! to `residual_tol` or the bracket half-width drops below `x_abs_tol` (plus a
//! machine-precision term relative to `|x|`). Otherwise it stops after
//! `max_iters` iterations with [`Status::MaxIters`] and the endpoint with the
//! smaller residual.
//!
//! A bracket whose endpoint residuals share a sign is reported as
//! [`Error::NoSignChange`]. Callers that treat "no root in range" as an
//! ordinary outcome should match on that variant.

mod config;
mod error;
mod solution;

pub use config::{Config, ConfigError};
pub use error::Error;
pub use solution::{Solution, Status};

/// Finds a root of `f` within `bracket` using Brent's method.
///
/// The bracket may be given in either order. If either endpoint already has a
/// residual within `residual_tol`, that endpoint is returned immediately with
/// zero iterations, checking the left endpoint first.
///
/// # Errors
///
/// Returns an error if the bracket is non-finite or has zero width, if any
/// residual is non-finite, or if the endpoint residuals share a sign.
pub fn solve<F>(mut f: F, bracket: [f64; 2], config: &Config) -> Result<Solution, Error>
where
    F: FnMut(f64) -> f64,
{
    let (left, right) = validate_bracket(bracket)?;

    let left_residual = checked(&mut f, left)?;
    if left_residual.abs() <= config.residual_tol() {
        return Ok(converged(left, left_residual, 0));
    }

    let right_residual = checked(&mut f, right)?;
    if right_residual.abs() <= config.residual_tol() {
        return Ok(converged(right, right_residual, 0));
    }

    if same_sign(left_residual, right_residual) {
        return Err(Error::NoSignChange {
            left,
            right,
            left_residual,
            right_residual,
        });
    }

    // `b` is the current estimate, `a` the previous one, and `c` the
    // contrapoint with residual opposite to `b`.
    let (mut a, mut fa) = (left, left_residual);
    let (mut b, mut fb) = (right, right_residual);
    let (mut c, mut fc) = (right, right_residual);
    let mut d = b - a;
    let mut e = d;

    for iter in 1..=config.max_iters() {
        if same_sign(fb, fc) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * config.x_abs_tol();
        let half = 0.5 * (c - b);
        if half.abs() <= tol || fb.abs() <= config.residual_tol() {
            return Ok(converged(b, fb, iter));
        }

        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            #[allow(clippy::float_cmp)]
            let (mut p, mut q) = if a == c {
                (2.0 * half * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * half * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let interpolation_limit = 3.0 * half * q - (tol * q).abs();
            let step_limit = (e * q).abs();
            if 2.0 * p < interpolation_limit.min(step_limit) {
                e = d;
                d = p / q;
            } else {
                d = half;
                e = d;
            }
        } else {
            d = half;
            e = d;
        }

        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(half) };
        fb = checked(&mut f, b)?;
    }

    let (x, residual) = [(a, fa), (c, fc)]
        .into_iter()
        .fold((b, fb), |best, point| {
            if point.1.abs() < best.1.abs() { point } else { best }
        });
    Ok(Solution {
        status: Status::MaxIters,
        x,
        residual,
        iters: config.max_iters(),
    })
}

fn converged(x: f64, residual: f64, iters: usize) -> Solution {
    Solution {
        status: Status::Converged,
        x,
        residual,
        iters,
    }
}

fn same_sign(lhs: f64, rhs: f64) -> bool {
    (lhs > 0.0 && rhs > 0.0) || (lhs < 0.0 && rhs < 0.0)
}

/// Evaluates `f` and rejects non-finite residuals.
fn checked<F>(f: &mut F, x: f64) -> Result<f64, Error>
where
    F: FnMut(f64) -> f64,
{
    let residual = f(x);
    if residual.is_finite() {
        Ok(residual)
    } else {
        Err(Error::NonFiniteResidual { x, residual })
    }
}

/// Validates bracket values and returns them in normalized (left < right) order.
fn validate_bracket(bracket: [f64; 2]) -> Result<(f64, f64), Error> {
    let [left, right] = bracket;

    if !left.is_finite() {
        return Err(Error::NonFiniteBracket { value: left });
    }

    if !right.is_finite() {
        return Err(Error::NonFiniteBracket { value: right });
    }

    #[allow(clippy::float_cmp)]
    if left == right {
        return Err(Error::ZeroWidthBracket { value: left });
    }

    if left < right {
        Ok((left, right))
    } else {
        Ok((right, left))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn finds_square_root() {
        let solution =
            solve(|x| x * x - 9.0, [0.0, 10.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn finds_root_of_transcendental_function() {
        // cos(x) = x near 0.739.
        let solution =
            solve(|x| x.cos() - x, [0.0, 1.0], &Config::default()).expect("should solve");

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x, 0.739_085_133_215_160_6, epsilon = 1e-10);
    }

    #[test]
    fn converges_faster_than_bisection() {
        let solution =
            solve(|x| x * x * x - 2.0, [0.0, 2.0], &Config::default()).expect("should solve");

        // Bisection needs about 40 halvings for this tolerance.
        assert!(solution.iters < 20, "took {} iterations", solution.iters);
        assert_relative_eq!(solution.x, 2.0_f64.cbrt(), epsilon = 1e-10);
    }

    #[test]
    fn normalizes_reversed_bracket() {
        let solution =
            solve(|x| x * x - 36.0, [10.0, 0.0], &Config::default()).expect("should solve");

        assert_relative_eq!(solution.x, 6.0, epsilon = 1e-10);
    }

    #[test]
    fn returns_endpoint_roots_immediately() {
        let mut calls = 0;
        let solution = solve(
            |x| {
                calls += 1;
                x - 1.0
            },
            [0.0, 1.0],
            &Config::default(),
        )
        .expect("should solve");

        assert_eq!(solution.iters, 0);
        assert_eq!(calls, 2);
        assert_relative_eq!(solution.x, 1.0);

        // The left endpoint wins when both are roots.
        let solution = solve(|_| 0.0, [0.0, 1.0], &Config::default()).expect("should solve");
        assert_relative_eq!(solution.x, 0.0);
    }

    #[test]
    fn errors_on_no_sign_change() {
        let result = solve(|x| x * x - 9.0, [5.0, 10.0], &Config::default());
        assert!(matches!(result, Err(Error::NoSignChange { .. })));
    }

    #[test]
    fn errors_on_bad_bracket() {
        let result = solve(|x| x, [5.0, 5.0], &Config::default());
        assert!(matches!(result, Err(Error::ZeroWidthBracket { .. })));

        let result = solve(|x| x, [f64::NAN, 1.0], &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteBracket { .. })));
    }

    #[test]
    fn errors_on_non_finite_residual() {
        let result = solve(|x| 1.0 / x, [0.0, 1.0], &Config::default());
        assert!(matches!(result, Err(Error::NonFiniteResidual { .. })));
    }

    #[test]
    fn zero_iters_returns_best_endpoint() {
        let config = Config::new(0, 1e-12, 1e-12).expect("valid config");
        let solution = solve(|x| x * x - 9.0, [2.0, 10.0], &config).expect("should return");

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 0);
        // |f(2)| = 5 beats |f(10)| = 91.
        assert_relative_eq!(solution.x, 2.0);
    }
}
