//! Core types for the static stochastic knapsack problem (SSKP).
//!
//! An SSKP instance holds items whose sizes are independent normal random
//! variables. Selecting an item earns its expected revenue, and every unit by
//! which the total size overflows the capacity costs a fixed penalty. This
//! crate defines the shared pieces that the solvers build on:
//!
//! - [`Item`] and [`Instance`]: validated instance data and exact objective
//!   evaluation
//! - [`Fixing`] and [`Bit`]: partial binary assignments threaded through a search
//! - [`normal`]: density, distribution, quantile and loss functions
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - `InstanceRecord`: the external instance shape (feature `serde-derive`)

mod fixing;
mod instance;
mod observer;

#[cfg(feature = "serde-derive")]
mod record;

pub mod normal;

pub use fixing::{Bit, Fixing};
pub use instance::{Instance, InstanceError, Item, Totals};
pub use observer::Observer;

#[cfg(feature = "serde-derive")]
pub use record::InstanceRecord;
