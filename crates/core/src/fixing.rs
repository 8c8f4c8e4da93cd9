#[cfg(feature = "serde-derive")]
use serde::{Deserialize, Serialize};

/// A binary value assigned to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    /// Returns the bit as an allocation value, `0.0` or `1.0`.
    #[must_use]
    pub fn value(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::One => 1.0,
        }
    }
}

impl From<bool> for Bit {
    fn from(selected: bool) -> Self {
        if selected { Self::One } else { Self::Zero }
    }
}

/// A partial assignment of binary values to item indices.
///
/// Indices without an assigned [`Bit`] are free. Because a fixing only ever
/// stores `Bit` values, it can never hold anything outside `{0, 1}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-derive", derive(Serialize, Deserialize))]
pub struct Fixing {
    bits: Vec<Option<Bit>>,
}

impl Fixing {
    /// Creates a fixing over `len` items with every item free.
    #[must_use]
    pub fn free(len: usize) -> Self {
        Self {
            bits: vec![None; len],
        }
    }

    /// Returns the number of items covered by the fixing.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit assigned to `index`, or `None` if it is free.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Bit> {
        self.bits[index]
    }

    /// Assigns `bit` to `index`, replacing any earlier assignment.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn fix(&mut self, index: usize, bit: Bit) {
        self.bits[index] = Some(bit);
    }

    /// Returns a copy of the fixing with `index` assigned to `bit`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn with(&self, index: usize, bit: Bit) -> Self {
        let mut fixing = self.clone();
        fixing.fix(index, bit);
        fixing
    }

    /// Returns true if `index` has no assigned bit.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[must_use]
    pub fn is_free(&self, index: usize) -> bool {
        self.bits[index].is_none()
    }

    /// Iterates over free indices in ascending order.
    pub fn free_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, bit)| bit.is_none().then_some(index))
    }

    /// Iterates over `(index, bit)` pairs for assigned indices in ascending order.
    pub fn fixed(&self) -> impl Iterator<Item = (usize, Bit)> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(index, bit)| bit.map(|bit| (index, bit)))
    }

    /// Returns the number of free indices.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.bits.iter().filter(|bit| bit.is_none()).count()
    }

    /// Returns the allocation implied by the fixing, with free items at zero.
    #[must_use]
    pub fn allocation(&self) -> Vec<f64> {
        self.bits
            .iter()
            .map(|bit| bit.map_or(0.0, Bit::value))
            .collect()
    }
}
