use sskp_core::{Bit, Fixing, Instance, Totals};

/// Split of an instance's items into fixed and free under a [`Fixing`].
#[derive(Debug, Clone)]
pub(super) struct Partition {
    /// Allocation with fixed bits applied and free items at zero.
    pub base: Vec<f64>,
    /// Free item indices in ascending order.
    pub free: Vec<usize>,
    /// Totals of the items fixed to one.
    pub fixed: Totals,
    /// Totals of every free item.
    pub free_totals: Totals,
}

impl Partition {
    /// Partitions `instance` according to `fixing`.
    ///
    /// # Panics
    ///
    /// Panics if the fixing does not cover exactly the instance's items.
    pub fn new(instance: &Instance, fixing: &Fixing) -> Self {
        assert_eq!(
            fixing.len(),
            instance.len(),
            "fixing length must match the number of items"
        );

        let base = fixing.allocation();
        let free: Vec<usize> = fixing.free_indices().collect();
        let fixed = instance.totals(&base);

        let mut free_totals = Totals::default();
        for &index in &free {
            let item = instance.item(index);
            free_totals.mean += item.mean;
            free_totals.variance += item.variance;
            free_totals.revenue += item.revenue;
        }

        Self {
            base,
            free,
            fixed,
            free_totals,
        }
    }

    /// Returns the base allocation with every free item set to `bit`.
    pub fn corner(&self, bit: Bit) -> Vec<f64> {
        let mut allocation = self.base.clone();
        for &index in &self.free {
            allocation[index] = bit.value();
        }
        allocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use sskp_core::Item;

    #[test]
    fn splits_fixed_and_free_totals() {
        let instance = Instance::new(
            vec![
                Item::new(1.0, 0.5, 2.0),
                Item::new(2.0, 1.0, 3.0),
                Item::new(4.0, 2.0, 5.0),
            ],
            5.0,
            1.0,
        )
        .expect("valid instance");
        let mut fixing = Fixing::free(3);
        fixing.fix(0, Bit::One);
        fixing.fix(1, Bit::Zero);

        let partition = Partition::new(&instance, &fixing);

        assert_eq!(partition.base, vec![1.0, 0.0, 0.0]);
        assert_eq!(partition.free, vec![2]);
        assert_relative_eq!(partition.fixed.mean, 1.0);
        assert_relative_eq!(partition.fixed.variance, 0.5);
        assert_relative_eq!(partition.free_totals.revenue, 5.0);
        assert_eq!(partition.corner(Bit::One), vec![1.0, 0.0, 1.0]);
    }
}
