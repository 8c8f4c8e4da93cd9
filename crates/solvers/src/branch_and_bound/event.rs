use sskp_core::Fixing;

use crate::relaxation::RelaxationPoint;

use super::Incumbent;

/// Why a node was discarded without branching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Prune {
    /// The relaxation found no candidate.
    Infeasible,

    /// The node's bound cannot beat the incumbent by more than the tolerance.
    Bound { bound: f64, incumbent: f64 },
}

/// Events emitted by the branch-and-bound engine.
///
/// `node` is the 1-based processing order of the node the event refers to.
#[derive(Debug)]
pub enum Event<'a> {
    /// The node's relaxation produced a point.
    Relaxed {
        node: usize,
        depth: usize,
        fixing: &'a Fixing,
        point: &'a RelaxationPoint,
    },

    /// The node was discarded.
    Pruned { node: usize, reason: Prune },

    /// A new incumbent was found.
    Improved {
        node: usize,
        incumbent: &'a Incumbent,
    },

    /// Two children were pushed, fixing `index` to each bit. `value` is the
    /// item's relaxed value at this node.
    ///
    /// The child with the item at zero is processed first.
    Branched {
        node: usize,
        index: usize,
        value: f64,
    },
}

impl Event<'_> {
    /// Returns the node the event refers to.
    #[must_use]
    pub fn node(&self) -> usize {
        match self {
            Self::Relaxed { node, .. }
            | Self::Pruned { node, .. }
            | Self::Improved { node, .. }
            | Self::Branched { node, .. } => *node,
        }
    }
}
