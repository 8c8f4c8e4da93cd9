//! Continuous relaxation of the SSKP for a partial fixing.
//!
//! # Algorithm
//!
//! The relaxation enumerates a finite set of service levels `z` (see
//! [`Config`] for the variants). At each level the free items are ranked by
//! ascending attractiveness `ρ(z)`, and every threshold position `k` is tried:
//! items ranked after `k` go to one, items before it to zero, and item `k`
//! takes the fraction that solves the capacity equation
//! `f·μ_k + S_μ + z·sqrt(f·v_k + S_v) = C`. A candidate scores
//! `rᵀx − p·L(z)·sqrt(V)`.
//!
//! Each fractional candidate is compared with its two boundary variants (item
//! `k` forced to zero, then to one) under the exact binary objective, and is
//! replaced by the better variant when that beats it by more than `tol`.
//! The best candidate wins on a strictly greater objective, enumerating `z`
//! ascending and then `k` ascending, so ties keep the first one found. When
//! enabled, the two corners "all free at one" and "all free at zero" are then
//! evaluated the same way.
//!
//! # Bound
//!
//! The winning point is feasible for the relaxation, so its objective alone
//! does not bound the binary completions of the fixing. Every returned
//! [`RelaxationPoint`] carries a separate certified `bound` for pruning.

mod bound;
mod candidates;
mod config;
mod partition;
mod point;


pub use config::{Config, ConfigError};
pub use point::{Infeasible, RelaxationPoint};

use sskp_core::{Bit, Fixing, Instance};

use crate::capacity::{CapacityEquation, Fraction};

use bound::Bound;
use candidates::service_levels;
use partition::Partition;
use point::Candidate;

/// Solves the continuous relaxation of `instance` under `fixing`.
///
/// # Errors
///
/// Returns [`Infeasible`] if no service level and threshold position yields a
/// root of the capacity equation in `[0, 1]` and corner candidates are
/// disabled.
///
/// # Panics
///
/// Panics if `fixing` does not cover exactly the instance's items.
pub fn solve(
    instance: &Instance,
    fixing: &Fixing,
    config: &Config,
) -> Result<RelaxationPoint, Infeasible> {
    let partition = Partition::new(instance, fixing);

    if partition.free.is_empty() {
        let candidate = exact(instance, partition.base.clone());
        let objective = candidate.objective;
        return Ok(candidate.into_point(objective));
    }

    let levels = service_levels(instance, &partition, config);
    let mut best: Option<Candidate> = None;
    let mut tried = 0;

    for &z in &levels {
        for candidate in thresholds(instance, &partition, z, config, &mut tried) {
            if best
                .as_ref()
                .is_none_or(|best| candidate.objective > best.objective)
            {
                best = Some(candidate);
            }
        }
    }

    if config.corners() {
        for bit in [Bit::One, Bit::Zero] {
            let candidate = exact(instance, partition.corner(bit));
            if best
                .as_ref()
                .is_none_or(|best| candidate.objective > best.objective)
            {
                best = Some(candidate);
            }
        }
    }

    let best = best.ok_or(Infeasible { tried })?;

    let probes = config.probes();
    let bound = Bound::new(instance, &partition)
        .minimize(probes.chain(levels.iter().copied()).chain([best.z]));

    Ok(best.into_point(bound))
}

/// Enumerates the accepted candidates at one service level in threshold order.
fn thresholds(
    instance: &Instance,
    partition: &Partition,
    z: f64,
    config: &Config,
    tried: &mut usize,
) -> Vec<Candidate> {
    let penalty = instance.penalty();
    let mut ranked: Vec<(usize, f64)> = partition
        .free
        .iter()
        .map(|&index| (index, instance.item(index).attractiveness(z, penalty)))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));

    // Suffix sums over the ranking: `above[k]` totals the items ranked at or
    // after position `k`.
    let m = ranked.len();
    let mut above = vec![(0.0, 0.0, 0.0); m + 1];
    for k in (0..m).rev() {
        let item = instance.item(ranked[k].0);
        let (mean, variance, revenue) = above[k + 1];
        above[k] = (
            mean + item.mean,
            variance + item.variance,
            revenue + item.revenue,
        );
    }

    let fixed = partition.fixed;
    let mut accepted = Vec::new();

    for (k, &(threshold, _)) in ranked.iter().enumerate() {
        *tried += 1;
        let item = instance.item(threshold);
        let (mean, variance, revenue) = above[k + 1];

        let equation = CapacityEquation {
            mean: item.mean,
            variance: item.variance,
            base_mean: fixed.mean + mean,
            base_variance: fixed.variance + variance,
            capacity: instance.capacity(),
            z,
        };
        let Ok(Fraction {
            fraction,
            variance: total_variance,
        }) = equation.solve(config.root())
        else {
            continue;
        };

        let mut allocation = partition.base.clone();
        for &(index, _) in &ranked[k + 1..] {
            allocation[index] = 1.0;
        }
        allocation[threshold] = fraction;

        let total_revenue = fixed.revenue + revenue + fraction * item.revenue;
        let objective = instance.relaxed_objective(total_revenue, z, total_variance);

        let mut snapped: Option<Candidate> = None;
        for bit in [Bit::Zero, Bit::One] {
            let mut variant = allocation.clone();
            variant[threshold] = bit.value();
            let candidate = exact(instance, variant);
            if candidate.objective > objective + config.tol()
                && snapped
                    .as_ref()
                    .is_none_or(|snapped| candidate.objective > snapped.objective)
            {
                snapped = Some(candidate);
            }
        }

        accepted.push(snapped.unwrap_or(Candidate {
            allocation,
            z,
            variance: total_variance,
            objective,
            threshold: Some(threshold),
        }));
    }

    accepted
}

/// Builds a candidate scored with the exact binary objective.
fn exact(instance: &Instance, allocation: Vec<f64>) -> Candidate {
    let totals = instance.totals(&allocation);
    Candidate {
        z: instance.service_level(&totals),
        variance: totals.variance,
        objective: instance.evaluate(&allocation),
        allocation,
        threshold: None,
    }
}
