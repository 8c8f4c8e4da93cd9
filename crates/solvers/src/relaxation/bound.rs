//! Certified upper bound on every binary completion of a fixing.
//!
//! For a total size `S ~ N(m, V)` and any service level `z₀`,
//!
//! ```text
//! E[(S − C)⁺] ≥ τ·(m − C) + w·sqrt(V),    τ = 1 − Φ(z₀), w = φ(z₀)
//! ```
//!
//! and the limits `z₀ → −∞` and `z₀ → +∞` give `(τ, w) = (1, 0)` and
//! `(0, 0)`. Over a node, `V` ranges over `[V_lo, V_hi]`: the variance of the
//! items fixed to one, plus at most every free variance. `sqrt` is concave, so
//! it lies above its chord on that range. Substituting both bounds leaves a
//! profit estimate that is linear in the free variables and is maximized over
//! the unit box by taking every item with a positive coefficient.

use sskp_core::{Instance, normal};

use super::partition::Partition;

pub(super) struct Bound<'a> {
    instance: &'a Instance,
    free: &'a [usize],
    fixed_revenue: f64,
    /// `M_f − C` for the items fixed to one.
    fixed_excess: f64,
    low_sd: f64,
    slope: f64,
}

impl<'a> Bound<'a> {
    pub fn new(instance: &'a Instance, partition: &'a Partition) -> Self {
        let low = partition.fixed.variance;
        let high = low + partition.free_totals.variance;
        let low_sd = low.sqrt();
        let slope = if high > low {
            (high.sqrt() - low_sd) / (high - low)
        } else {
            0.0
        };

        Self {
            instance,
            free: &partition.free,
            fixed_revenue: partition.fixed.revenue,
            fixed_excess: partition.fixed.mean - instance.capacity(),
            low_sd,
            slope,
        }
    }

    /// Returns the box maximum of the linearized profit for one `(τ, w)`.
    fn at(&self, tau: f64, w: f64) -> f64 {
        let p = self.instance.penalty();
        let base = self.fixed_revenue - p * tau * self.fixed_excess - p * w * self.low_sd;
        self.free.iter().fold(base, |acc, &index| {
            let item = self.instance.item(index);
            let gain = item.revenue - p * tau * item.mean - p * w * self.slope * item.variance;
            acc + gain.max(0.0)
        })
    }

    /// Returns the tightest bound over the limit pairs and `levels`.
    pub fn minimize(&self, levels: impl IntoIterator<Item = f64>) -> f64 {
        levels
            .into_iter()
            .map(|z| self.at(normal::sf(z), normal::pdf(z)))
            .fold(self.at(1.0, 0.0).min(self.at(0.0, 0.0)), f64::min)
    }
}
