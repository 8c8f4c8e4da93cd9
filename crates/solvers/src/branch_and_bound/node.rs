use std::rc::Rc;

use sskp_core::{Bit, Fixing};

/// One branching decision, linked to the decisions above it.
#[derive(Debug)]
struct Decision {
    index: usize,
    bit: Bit,
    parent: Option<Rc<Decision>>,
}

/// A search node: the chain of decisions from the root.
///
/// Branching shares the parent chain, so creating a child is O(1). The dense
/// [`Fixing`] is rebuilt only when the node is processed.
#[derive(Debug, Clone, Default)]
pub(super) struct Node {
    last: Option<Rc<Decision>>,
    depth: usize,
}

impl Node {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, index: usize, bit: Bit) -> Self {
        Self {
            last: Some(Rc::new(Decision {
                index,
                bit,
                parent: self.last.clone(),
            })),
            depth: self.depth + 1,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Applies the node's decisions on top of `root`.
    pub fn fixing(&self, root: &Fixing) -> Fixing {
        let mut fixing = root.clone();
        let mut cursor = self.last.as_deref();
        while let Some(decision) = cursor {
            fixing.fix(decision.index, decision.bit);
            cursor = decision.parent.as_deref();
        }
        fixing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilds_fixing_from_chain() {
        let root = Fixing::free(4);
        let node = Node::root().child(2, Bit::One).child(0, Bit::Zero);

        let fixing = node.fixing(&root);

        assert_eq!(node.depth(), 2);
        assert_eq!(fixing.get(0), Some(Bit::Zero));
        assert_eq!(fixing.get(2), Some(Bit::One));
        assert_eq!(fixing.free_indices().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn siblings_share_parent_without_interfering() {
        let root = Fixing::free(2);
        let parent = Node::root().child(0, Bit::One);
        let one = parent.child(1, Bit::One);
        let zero = parent.child(1, Bit::Zero);

        assert_eq!(one.fixing(&root).get(1), Some(Bit::One));
        assert_eq!(zero.fixing(&root).get(1), Some(Bit::Zero));
        assert_eq!(parent.fixing(&root).get(1), None);
    }

    #[test]
    fn root_node_keeps_root_fixing() {
        let root = Fixing::free(3).with(1, Bit::One);
        assert_eq!(Node::root().fixing(&root), root);
    }
}
