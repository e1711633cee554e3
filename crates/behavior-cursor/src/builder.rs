//! Builder utilities for ergonomic behavior tree construction.
//!
//! Instead of writing `Tree::node(NodeKind::Sequence(Sequence), vec![...])`,
//! use the shorter `sequence(vec![...])`. Builders that take a list of
//! children validate it and return [`BuildError`](crate::BuildError) for malformed input;
//! single-child decorators cannot be malformed and return the tree directly.

use std::sync::Arc;

use crate::behavior::Behavior;
use crate::composite::{Random, RandomWeighted, Selector, Sequence};
use crate::decorator::{
    AlwaysFail, AlwaysSucceed, Inverter, RepeatN, RepeatUntilFail, RepeatUntilSucceed,
};
use crate::error::Result;
use crate::tree::{Node, NodeKind, Tree};

/// Wraps a value as a leaf.
#[inline]
pub fn leaf<L>(value: L) -> Tree<L> {
    Tree::leaf(value)
}

/// Creates a sequence node.
#[inline]
pub fn sequence<L>(children: impl IntoIterator<Item = Tree<L>>) -> Result<Tree<L>> {
    Tree::node(NodeKind::Sequence(Sequence), children.into_iter().collect())
}

/// Creates a selector node.
#[inline]
pub fn select<L>(children: impl IntoIterator<Item = Tree<L>>) -> Result<Tree<L>> {
    Tree::node(NodeKind::Select(Selector), children.into_iter().collect())
}

/// Creates a node that enters one child chosen uniformly at random.
#[inline]
pub fn random<L>(children: impl IntoIterator<Item = Tree<L>>) -> Result<Tree<L>> {
    Tree::node(NodeKind::Random(Random), children.into_iter().collect())
}

/// Creates a node that enters one child chosen by weight.
///
/// Each pair is a child and its positive weight.
pub fn random_weighted<L>(pairs: impl IntoIterator<Item = (Tree<L>, u32)>) -> Result<Tree<L>> {
    let (children, weights): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
    let kind = RandomWeighted::new(weights)?;
    Tree::node(NodeKind::RandomWeighted(kind), children)
}

/// Creates a loop that re-enters `child` until it fails.
#[inline]
pub fn repeat_until_fail<L>(child: Tree<L>) -> Tree<L> {
    decorate(NodeKind::RepeatUntilFail(RepeatUntilFail), child)
}

/// Creates a loop that re-enters `child` until it succeeds.
#[inline]
pub fn repeat_until_succeed<L>(child: Tree<L>) -> Tree<L> {
    decorate(NodeKind::RepeatUntilSucceed(RepeatUntilSucceed), child)
}

/// Creates a loop that runs `child` exactly `n` times; `n` must exceed 1.
pub fn repeat_n<L>(n: u32, child: Tree<L>) -> Result<Tree<L>> {
    Ok(decorate(NodeKind::RepeatN(RepeatN::new(n)?), child))
}

/// Creates an always-succeed node.
#[inline]
pub fn always_succeed<L>(child: Tree<L>) -> Tree<L> {
    decorate(NodeKind::AlwaysSucceed(AlwaysSucceed), child)
}

/// Creates an always-fail node.
#[inline]
pub fn always_fail<L>(child: Tree<L>) -> Tree<L> {
    decorate(NodeKind::AlwaysFail(AlwaysFail), child)
}

/// Creates an inverter node.
#[inline]
pub fn negate<L>(child: Tree<L>) -> Tree<L> {
    decorate(NodeKind::Negate(Inverter), child)
}

/// Creates a node with user-defined traversal rules.
pub fn custom<L, B>(behavior: B, children: impl IntoIterator<Item = Tree<L>>) -> Result<Tree<L>>
where
    B: Behavior<L> + 'static,
{
    Tree::node(
        NodeKind::Custom(Arc::new(behavior)),
        children.into_iter().collect(),
    )
}

fn decorate<L>(kind: NodeKind<L>, child: Tree<L>) -> Tree<L> {
    Tree::from(Node::decorate(kind, child))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    #[test]
    fn list_builders_reject_empty_children() {
        let none = Vec::<Tree<u8>>::new;
        assert_eq!(
            sequence(none()).unwrap_err(),
            BuildError::EmptyChildren { kind: "sequence" }
        );
        assert_eq!(
            select(none()).unwrap_err(),
            BuildError::EmptyChildren { kind: "select" }
        );
        assert_eq!(
            random(none()).unwrap_err(),
            BuildError::EmptyChildren { kind: "random" }
        );
        assert_eq!(
            random_weighted(Vec::<(Tree<u8>, u32)>::new()).unwrap_err(),
            BuildError::EmptyChildren {
                kind: "random_weighted"
            }
        );
    }

    #[test]
    fn random_weighted_rejects_zero_weight() {
        let err = random_weighted(vec![(leaf('a'), 2), (leaf('b'), 0)]).unwrap_err();
        assert_eq!(err, BuildError::ZeroWeight { index: 1 });
    }

    #[test]
    fn random_weighted_stores_parallel_weights() {
        let tree = random_weighted(vec![(leaf('a'), 3), (leaf('b'), 2)]).unwrap();
        let node = tree.as_node().unwrap();
        let NodeKind::RandomWeighted(kind) = node.kind() else {
            panic!("expected random_weighted");
        };
        assert_eq!(kind.weights(), &[3, 2]);
        assert_eq!(node.children()[1].as_leaf(), Some(&'b'));
    }

    #[test]
    fn weights_must_match_children() {
        let kind = RandomWeighted::new(vec![1, 2, 3]).unwrap();
        let err = Tree::node(
            NodeKind::RandomWeighted(kind),
            vec![leaf('a'), leaf('b')],
        )
        .unwrap_err();
        assert_eq!(
            err,
            BuildError::WeightCountMismatch {
                weights: 3,
                children: 2
            }
        );
    }

    #[test]
    fn repeat_n_requires_more_than_one() {
        assert_eq!(
            repeat_n(1, leaf(())).unwrap_err(),
            BuildError::RepeatCountTooSmall { count: 1 }
        );
        let tree = repeat_n(4, leaf(())).unwrap();
        let Some(NodeKind::RepeatN(kind)) = tree.as_node().map(Node::kind) else {
            panic!("expected repeat_n");
        };
        assert_eq!(kind.count(), 4);
    }

    #[test]
    fn decorators_wrap_one_child() {
        let builders: [fn(Tree<u8>) -> Tree<u8>; 5] = [
            repeat_until_fail,
            repeat_until_succeed,
            always_succeed,
            always_fail,
            negate,
        ];
        let names = [
            "repeat_until_fail",
            "repeat_until_succeed",
            "always_succeed",
            "always_fail",
            "negate",
        ];
        for (build, name) in builders.into_iter().zip(names) {
            let tree = build(leaf(1));
            let node = tree.as_node().unwrap();
            assert_eq!(node.kind().name(), name);
            assert_eq!(node.child_count(), 1);
        }
    }
}
