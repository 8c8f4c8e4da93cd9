use thiserror::Error;

#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

use crate::normal;

/// An item whose size is normally distributed.
///
/// The item's position in its [`Instance`] is its index.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Item {
    /// Expected size `μ`.
    pub mean: f64,
    /// Size variance `v`; zero means the size is deterministic.
    pub variance: f64,
    /// Expected revenue `r` earned by selecting the item.
    pub revenue: f64,
}

impl Item {
    /// Creates an item from its mean size, size variance and revenue.
    #[must_use]
    pub const fn new(mean: f64, variance: f64, revenue: f64) -> Self {
        Self {
            mean,
            variance,
            revenue,
        }
    }

    /// Creates an item from a size standard deviation instead of a variance.
    #[must_use]
    pub fn from_std_dev(mean: f64, std_dev: f64, revenue: f64) -> Self {
        Self::new(mean, std_dev * std_dev, revenue)
    }

    /// Returns true if the item's size has zero variance.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.variance == 0.0
    }

    /// Returns the attractiveness `ρ(z)` of the item at service level `z`.
    ///
    /// For a stochastic item this is `(r − p·μ·(1 − Φ(z))) / v`. A
    /// deterministic item scores `+∞` when `r ≥ p·μ·(1 − Φ(z))` and `−∞`
    /// otherwise, so it always sorts to one end of a ranking.
    #[must_use]
    pub fn attractiveness(&self, z: f64, penalty: f64) -> f64 {
        let expected_penalty = penalty * self.mean * normal::sf(z);
        if self.variance > 0.0 {
            (self.revenue - expected_penalty) / self.variance
        } else if self.revenue >= expected_penalty {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    }
}

/// Errors that can occur when building an [`Instance`].
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum InstanceError {
    #[error("item {index}: mean must be finite and positive, got {value}")]
    Mean { index: usize, value: f64 },

    #[error("item {index}: variance must be finite and non-negative, got {value}")]
    Variance { index: usize, value: f64 },

    #[error("item {index}: revenue must be finite, got {value}")]
    Revenue { index: usize, value: f64 },

    #[error("capacity must be finite and positive, got {0}")]
    Capacity(f64),

    #[error("penalty must be finite and positive, got {0}")]
    Penalty(f64),

    #[error("column lengths differ: {means} means, {deviations} deviations, {revenues} revenues")]
    LengthMismatch {
        means: usize,
        deviations: usize,
        revenues: usize,
    },
}

/// Aggregate mean, variance and revenue of an allocation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub mean: f64,
    pub variance: f64,
    pub revenue: f64,
}

/// A static stochastic knapsack instance.
///
/// Holds the items, the deterministic capacity `C`, and the per-unit
/// overflow penalty `p`. Instances are validated on construction and are
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(Serialize))]
pub struct Instance {
    items: Vec<Item>,
    capacity: f64,
    penalty: f64,
}

impl Instance {
    /// Creates a validated instance.
    ///
    /// # Errors
    ///
    /// Returns an error if any item has a non-positive or non-finite mean, a
    /// negative or non-finite variance, or a non-finite revenue, or if the
    /// capacity or penalty is not finite and positive.
    pub fn new(items: Vec<Item>, capacity: f64, penalty: f64) -> Result<Self, InstanceError> {
        for (index, item) in items.iter().enumerate() {
            if !item.mean.is_finite() || item.mean <= 0.0 {
                return Err(InstanceError::Mean {
                    index,
                    value: item.mean,
                });
            }
            if !item.variance.is_finite() || item.variance < 0.0 {
                return Err(InstanceError::Variance {
                    index,
                    value: item.variance,
                });
            }
            if !item.revenue.is_finite() {
                return Err(InstanceError::Revenue {
                    index,
                    value: item.revenue,
                });
            }
        }
        if !capacity.is_finite() || capacity <= 0.0 {
            return Err(InstanceError::Capacity(capacity));
        }
        if !penalty.is_finite() || penalty <= 0.0 {
            return Err(InstanceError::Penalty(penalty));
        }

        Ok(Self {
            items,
            capacity,
            penalty,
        })
    }

    /// Creates an instance from parallel columns of means, size standard
    /// deviations and revenues.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::LengthMismatch`] if the columns differ in
    /// length, or any error reported by [`Instance::new`].
    pub fn from_columns(
        means: &[f64],
        std_devs: &[f64],
        revenues: &[f64],
        capacity: f64,
        penalty: f64,
    ) -> Result<Self, InstanceError> {
        if means.len() != std_devs.len() || means.len() != revenues.len() {
            return Err(InstanceError::LengthMismatch {
                means: means.len(),
                deviations: std_devs.len(),
                revenues: revenues.len(),
            });
        }

        let items = means
            .iter()
            .zip(std_devs)
            .zip(revenues)
            .map(|((&mean, &std_dev), &revenue)| Item::from_std_dev(mean, std_dev, revenue))
            .collect();

        Self::new(items, capacity, penalty)
    }

    /// Returns the items in index order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn item(&self, index: usize) -> &Item {
        &self.items[index]
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the instance has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    #[must_use]
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    /// Sums mean, variance and revenue weighted by `allocation`.
    ///
    /// Entries beyond the number of items are ignored.
    #[must_use]
    pub fn totals(&self, allocation: &[f64]) -> Totals {
        self.items
            .iter()
            .zip(allocation)
            .fold(Totals::default(), |acc, (item, &x)| Totals {
                mean: acc.mean + item.mean * x,
                variance: acc.variance + item.variance * x,
                revenue: acc.revenue + item.revenue * x,
            })
    }

    /// Returns the service level `(C − μᵀx) / sqrt(V)` implied by `totals`,
    /// or zero when the total variance is zero.
    #[must_use]
    pub fn service_level(&self, totals: &Totals) -> f64 {
        if totals.variance > 0.0 {
            (self.capacity - totals.mean) / totals.variance.sqrt()
        } else {
            0.0
        }
    }

    /// Returns the expected overflow penalty `p·E[(S − C)⁺]` for a total
    /// size `S ~ N(mean, variance)`.
    #[must_use]
    pub fn expected_penalty(&self, mean: f64, variance: f64) -> f64 {
        if variance > 0.0 {
            let sd = variance.sqrt();
            self.penalty * sd * normal::loss((self.capacity - mean) / sd)
        } else {
            self.penalty * (mean - self.capacity).max(0.0)
        }
    }

    /// Returns the exact expected profit of `allocation`.
    ///
    /// This is `rᵀx − p·E[(μᵀx + sqrt(vᵀx)·Z − C)⁺]`, the objective used for
    /// every fully binary allocation.
    #[must_use]
    pub fn evaluate(&self, allocation: &[f64]) -> f64 {
        let totals = self.totals(allocation);
        totals.revenue - self.expected_penalty(totals.mean, totals.variance)
    }

    /// Returns the relaxation objective `R − p·L(z)·sqrt(V)` for an
    /// allocation with revenue `revenue` and total variance `variance` whose
    /// capacity equation holds at service level `z`.
    #[must_use]
    pub fn relaxed_objective(&self, revenue: f64, z: f64, variance: f64) -> f64 {
        revenue - self.penalty * normal::loss(z) * variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn deterministic_pair() -> Instance {
        Instance::new(
            vec![Item::new(4.0, 0.0, 10.0), Item::new(6.0, 0.0, 9.0)],
            9.0,
            5.0,
        )
        .expect("valid instance")
    }

    #[test]
    fn evaluates_deterministic_allocations() {
        let instance = deterministic_pair();

        assert_relative_eq!(instance.evaluate(&[0.0, 0.0]), 0.0);
        assert_relative_eq!(instance.evaluate(&[1.0, 0.0]), 10.0);
        assert_relative_eq!(instance.evaluate(&[0.0, 1.0]), 9.0);
        // Weight 10 overflows capacity 9 by one unit.
        assert_relative_eq!(instance.evaluate(&[1.0, 1.0]), 14.0);
    }

    #[test]
    fn evaluates_stochastic_allocation() {
        let instance =
            Instance::new(vec![Item::new(10.0, 4.0, 20.0)], 10.0, 3.0).expect("valid instance");

        // At z = 0 the expected overflow is sd·φ(0).
        let expected = 20.0 - 3.0 * 2.0 * normal::pdf(0.0);
        assert_relative_eq!(instance.evaluate(&[1.0]), expected, epsilon = 1e-12);
    }

    #[test]
    fn relaxed_objective_matches_exact_when_consistent() {
        let instance = Instance::new(
            vec![Item::new(3.0, 1.0, 5.0), Item::new(5.0, 2.0, 7.0)],
            7.0,
            4.0,
        )
        .expect("valid instance");
        let allocation = [1.0, 0.6];
        let totals = instance.totals(&allocation);
        let z = instance.service_level(&totals);

        assert_relative_eq!(
            instance.relaxed_objective(totals.revenue, z, totals.variance),
            instance.evaluate(&allocation),
            epsilon = 1e-12
        );
    }

    #[test]
    fn service_level_of_zero_variance_is_zero() {
        let instance = deterministic_pair();
        let totals = instance.totals(&[1.0, 1.0]);
        assert_eq!(instance.service_level(&totals), 0.0);
    }

    #[test]
    fn attractiveness_of_stochastic_item() {
        let item = Item::new(2.0, 4.0, 6.0);
        // At z = 0 the expected penalty is p·μ/2.
        assert_relative_eq!(item.attractiveness(0.0, 3.0), (6.0 - 3.0) / 4.0);
    }

    #[test]
    fn attractiveness_of_deterministic_item_is_infinite() {
        let item = Item::new(4.0, 0.0, 10.0);
        assert_eq!(item.attractiveness(0.0, 5.0), f64::INFINITY);
        assert_eq!(item.attractiveness(-1.0, 5.0), f64::NEG_INFINITY);
    }

    #[test]
    fn from_columns_squares_deviations() {
        let instance = Instance::from_columns(&[4.0, 6.0], &[0.5, 2.0], &[1.0, 2.0], 9.0, 5.0)
            .expect("valid columns");
        assert_relative_eq!(instance.item(0).variance, 0.25);
        assert_relative_eq!(instance.item(1).variance, 4.0);
    }

    #[test]
    fn rejects_invalid_data() {
        let bad_mean = Instance::new(vec![Item::new(0.0, 1.0, 1.0)], 1.0, 1.0);
        assert!(matches!(bad_mean, Err(InstanceError::Mean { index: 0, .. })));

        let bad_variance = Instance::new(
            vec![Item::new(1.0, 1.0, 1.0), Item::new(1.0, -1.0, 1.0)],
            1.0,
            1.0,
        );
        assert!(matches!(
            bad_variance,
            Err(InstanceError::Variance { index: 1, .. })
        ));

        let bad_revenue = Instance::new(vec![Item::new(1.0, 1.0, f64::NAN)], 1.0, 1.0);
        assert!(matches!(bad_revenue, Err(InstanceError::Revenue { .. })));

        assert!(matches!(
            Instance::new(vec![], 0.0, 1.0),
            Err(InstanceError::Capacity(_))
        ));
        assert!(matches!(
            Instance::new(vec![], 1.0, f64::INFINITY),
            Err(InstanceError::Penalty(_))
        ));
        assert!(matches!(
            Instance::from_columns(&[1.0], &[], &[1.0], 1.0, 1.0),
            Err(InstanceError::LengthMismatch { .. })
        ));
    }
}
