use sskp_core::{Instance, normal};

use super::{Config, partition::Partition};

/// Builds the ascending, duplicate-free list of service levels to enumerate.
///
/// Candidates are the crossings of the attractiveness curves of every pair of
/// free stochastic items, the ratio crossing of every free deterministic item,
/// zero, and the service levels implied by "all free at one" and "all free at
/// zero". With midpoints enabled, the midpoint between each consecutive pair
/// is added as well.
pub(super) fn service_levels(instance: &Instance, partition: &Partition, config: &Config) -> Vec<f64> {
    let penalty = instance.penalty();
    let (stochastic, deterministic): (Vec<usize>, Vec<usize>) = partition
        .free
        .iter()
        .partition(|&&index| !instance.item(index).is_deterministic());

    let mut levels = Vec::new();

    for (position, &i) in stochastic.iter().enumerate() {
        let a = instance.item(i);
        for &j in &stochastic[position + 1..] {
            let b = instance.item(j);
            let slope = penalty * (a.mean * b.variance - b.mean * a.variance);
            if slope.abs() < config.pair_tol() {
                continue;
            }
            let ratio = (a.revenue * b.variance - b.revenue * a.variance) / slope;
            if let Some(z) = crossing(ratio) {
                levels.push(z);
            }
        }
    }

    for &index in &deterministic {
        let item = instance.item(index);
        if let Some(z) = crossing(item.revenue / (penalty * item.mean)) {
            levels.push(z);
        }
    }

    levels.push(0.0);

    let fixed = partition.fixed;
    let all_variance = fixed.variance + partition.free_totals.variance;
    levels.push(if all_variance > 0.0 {
        (instance.capacity() - fixed.mean - partition.free_totals.mean) / all_variance.sqrt()
    } else {
        0.0
    });
    levels.push(if fixed.variance > 0.0 {
        (instance.capacity() - fixed.mean) / fixed.variance.sqrt()
    } else {
        0.0
    });

    levels.sort_by(f64::total_cmp);
    levels.dedup();

    if config.midpoints() && levels.len() >= 2 {
        let midpoints: Vec<f64> = levels.windows(2).map(|w| 0.5 * (w[0] + w[1])).collect();
        levels.extend(midpoints);
        levels.sort_by(f64::total_cmp);
    }

    levels
}

/// Maps a probability ratio in `(0, 1)` to the service level `Φ⁻¹(1 − ratio)`.
fn crossing(ratio: f64) -> Option<f64> {
    (ratio > 0.0 && ratio < 1.0).then(|| normal::quantile(1.0 - ratio))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use sskp_core::{Fixing, Item};

    fn levels(instance: &Instance, config: &Config) -> Vec<f64> {
        let partition = Partition::new(instance, &Fixing::free(instance.len()));
        service_levels(instance, &partition, config)
    }

    #[test]
    fn deterministic_items_cross_at_ratio() {
        // Ratios r/(p·μ): 10/20 = 0.5 and 9/30 = 0.3.
        let instance = Instance::new(
            vec![Item::new(4.0, 0.0, 10.0), Item::new(6.0, 0.0, 9.0)],
            9.0,
            5.0,
        )
        .expect("valid instance");

        let levels = levels(&instance, &Config::default());

        // Zero appears once even though three sources produce it.
        assert_eq!(levels.len(), 2);
        assert_relative_eq!(levels[0], 0.0);
        assert_relative_eq!(levels[1], normal::quantile(0.7), epsilon = 1e-12);
    }

    #[test]
    fn stochastic_pair_crossing_equalizes_attractiveness() {
        let instance = Instance::new(
            vec![Item::new(4.0, 1.0, 6.0), Item::new(3.0, 2.0, 5.0)],
            20.0,
            3.0,
        )
        .expect("valid instance");

        let levels = levels(&instance, &Config::default());
        let p = instance.penalty();
        let crossings: Vec<f64> = levels
            .iter()
            .copied()
            .filter(|&z| {
                let a = instance.item(0).attractiveness(z, p);
                let b = instance.item(1).attractiveness(z, p);
                (a - b).abs() < 1e-9
            })
            .collect();

        assert_eq!(crossings.len(), 1);
    }

    #[test]
    fn includes_fill_levels_and_sorts() {
        let instance = Instance::new(
            vec![Item::new(4.0, 4.0, 1.0), Item::new(5.0, 5.0, 1.0)],
            6.0,
            1.0,
        )
        .expect("valid instance");

        let levels = levels(&instance, &Config::default());

        // All free at one gives (6 − 9) / 3 = −1.
        assert!(levels.contains(&-1.0));
        assert!(levels.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn midpoints_interleave() {
        let instance = Instance::new(
            vec![Item::new(4.0, 4.0, 1.0), Item::new(5.0, 5.0, 1.0)],
            6.0,
            1.0,
        )
        .expect("valid instance");

        let plain = levels(&instance, &Config::default());
        let exhaustive = levels(&instance, &Config::default().with_midpoints(true));

        assert_eq!(exhaustive.len(), 2 * plain.len() - 1);
        assert_relative_eq!(exhaustive[1], 0.5 * (plain[0] + plain[1]));
    }
}
