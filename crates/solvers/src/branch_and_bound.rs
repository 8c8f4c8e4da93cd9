//! Exact branch-and-bound search for the SSKP.
//!
//! # Algorithm
//!
//! The engine walks the binary search tree depth-first with an explicit stack,
//! so depth is bounded by memory rather than the call stack. Each popped node
//! is relaxed with [`relaxation::solve`](crate::relaxation::solve):
//!
//! - an infeasible relaxation prunes the node;
//! - a bound no better than the incumbent plus `tol` prunes the node;
//! - an integral point updates the incumbent when its exact objective is
//!   strictly better, and ends the node once the bound is within `tol` of it;
//! - otherwise the engine picks a free item with the configured
//!   [`BranchRule`] and pushes the "item at one" child, then the "item at zero"
//!   child, so the zero branch is explored first.
//!
//! The time limit is checked once per node. Hitting it is a soft stop: the
//! incumbent is returned with [`Status::TimeLimit`] so callers can tell it
//! apart from a proven optimum.
//!
//! # Observer Events
//!
//! The engine emits an [`Event`] when a node is relaxed, pruned, or branched,
//! and when the incumbent improves. Observers can return
//! [`Action::StopEarly`] to end the search with [`Status::StoppedByObserver`].
//!
//! # Logging
//!
//! With [`Config::with_logging`] enabled, the engine emits `tracing` events:
//! `info` for new incumbents, the time limit, and the final summary, and
//! `debug` for per-node decisions.

mod action;
mod config;
mod error;
mod event;
mod node;
mod search;
mod solution;
mod stats;


pub use action::Action;
pub use config::{BranchRule, Config, ConfigError};
pub use error::Error;
pub use event::{Event, Prune};
pub use solution::{Incumbent, Solution, Status};
pub use stats::Stats;

use sskp_core::{Fixing, Instance, Observer};

use search::search;

/// Solves `instance` to optimality, or until the time limit.
///
/// The observer receives an [`Event`] for each node decision.
/// See the [module docs](self) for details.
#[must_use]
pub fn solve<Obs>(instance: &Instance, config: &Config, observer: Obs) -> Solution
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    search(instance, &Fixing::free(instance.len()), config, observer)
}

/// Solves `instance` without observer support.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
#[must_use]
pub fn solve_unobserved(instance: &Instance, config: &Config) -> Solution {
    solve(instance, config, ())
}

/// Solves `instance` with the items in `root` fixed in advance.
///
/// # Errors
///
/// Returns [`Error::FixingLength`] if `root` does not cover exactly the
/// instance's items.
pub fn solve_from<Obs>(
    instance: &Instance,
    root: &Fixing,
    config: &Config,
    observer: Obs,
) -> Result<Solution, Error>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    if root.len() != instance.len() {
        return Err(Error::FixingLength {
            expected: instance.len(),
            found: root.len(),
        });
    }
    Ok(search(instance, root, config, observer))
}
