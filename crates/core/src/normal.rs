//! Standard normal distribution functions.
//!
//! Everything the solvers need from the normal distribution lives here:
//! density, distribution and survival functions, the quantile function, and
//! the first-order loss function `L(z) = φ(z) − z·(1 − Φ(z))`.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// `1 / sqrt(2π)`.
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Returns the standard normal density `φ(z)`.
#[must_use]
pub fn pdf(z: f64) -> f64 {
    FRAC_1_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Returns the standard normal distribution function `Φ(z)`.
#[must_use]
pub fn cdf(z: f64) -> f64 {
    0.5 * libm::erfc(-z * FRAC_1_SQRT_2)
}

/// Returns the survival function `1 − Φ(z)`.
///
/// Computed directly from `erfc` so the upper tail keeps full precision.
#[must_use]
pub fn sf(z: f64) -> f64 {
    0.5 * libm::erfc(z * FRAC_1_SQRT_2)
}

/// Returns the first-order loss function `L(z) = φ(z) − z·(1 − Φ(z))`.
///
/// `L(z)` is the expected excess `E[(Z − z)⁺]` of a standard normal variable.
/// It is strictly positive, strictly decreasing and convex, and satisfies
/// `L(−z) = L(z) + z`.
#[must_use]
pub fn loss(z: f64) -> f64 {
    if z == f64::INFINITY {
        return 0.0;
    }
    if z == f64::NEG_INFINITY {
        return f64::INFINITY;
    }
    pdf(z) - z * sf(z)
}

/// Returns the quantile `Φ⁻¹(q)` of the standard normal distribution.
///
/// Uses Acklam's rational approximation followed by one Halley refinement
/// step against [`cdf`], which brings the result to near machine precision.
/// Returns `-∞` for `q = 0`, `+∞` for `q = 1`, and NaN outside `[0, 1]`.
#[must_use]
pub fn quantile(q: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969_683_028_665_376e1,
        2.209_460_984_245_205e2,
        -2.759_285_104_469_687e2,
        1.383_577_518_672_69e2,
        -3.066_479_806_614_716e1,
        2.506_628_277_459_239,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e1,
        1.615_858_368_580_409e2,
        -1.556_989_798_598_866e2,
        6.680_131_188_771_972e1,
        -1.328_068_155_288_572e1,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-3,
        -3.223_964_580_411_365e-1,
        -2.400_758_277_161_838,
        -2.549_732_539_343_734,
        4.374_664_141_464_968,
        2.938_163_982_698_783,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-3,
        3.224_671_290_700_398e-1,
        2.445_134_137_142_996,
        3.754_408_661_907_416,
    ];
    const Q_LOW: f64 = 0.024_25;

    if q.is_nan() || !(0.0..=1.0).contains(&q) {
        return f64::NAN;
    }
    if q == 0.0 {
        return f64::NEG_INFINITY;
    }
    if q == 1.0 {
        return f64::INFINITY;
    }

    let x = if q < Q_LOW {
        let t = (-2.0 * q.ln()).sqrt();
        (((((C[0] * t + C[1]) * t + C[2]) * t + C[3]) * t + C[4]) * t + C[5])
            / ((((D[0] * t + D[1]) * t + D[2]) * t + D[3]) * t + 1.0)
    } else if q <= 1.0 - Q_LOW {
        let t = q - 0.5;
        let s = t * t;
        (((((A[0] * s + A[1]) * s + A[2]) * s + A[3]) * s + A[4]) * s + A[5]) * t
            / (((((B[0] * s + B[1]) * s + B[2]) * s + B[3]) * s + B[4]) * s + 1.0)
    } else {
        let t = (-2.0 * (1.0 - q).ln()).sqrt();
        -(((((C[0] * t + C[1]) * t + C[2]) * t + C[3]) * t + C[4]) * t + C[5])
            / ((((D[0] * t + D[1]) * t + D[2]) * t + D[3]) * t + 1.0)
    };

    // Halley step on Φ(x) − q.
    let e = cdf(x) - q;
    let u = e * (2.0 * PI).sqrt() * (0.5 * x * x).exp();
    x - u / (1.0 + 0.5 * x * u)
}
