//! Composite behavior nodes.
//!
//! Composite nodes choose among several children. This module provides the
//! ordered kinds, [`Sequence`] (AND logic) and [`Selector`] (OR logic), and the
//! randomized kinds, [`Random`] and [`RandomWeighted`], which enter one child
//! picked by the injected RNG and pass its result straight through.

use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::behavior::{Behavior, Step};
use crate::cursor::Cursor;
use crate::error::{BuildError, Result};
use crate::tree::Node;

/// Runs children left to right until one fails.
///
/// # Semantics
///
/// - A child's `Success` moves the cursor to the next sibling
/// - Success of the rightmost child is reported as `Success`
/// - Any child's `Failure` is reported as `Failure` immediately
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequence;

impl<L> Behavior<L> for Sequence {
    fn name(&self) -> &str {
        "sequence"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, child: Cursor<L>) -> Step<L> {
        match child.right() {
            Ok(next) => Step::Move(next),
            Err(_) => Step::Succeed,
        }
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Fail
    }
}

/// Runs children left to right until one succeeds.
///
/// # Semantics
///
/// - Any child's `Success` is reported as `Success` immediately
/// - A child's `Failure` moves the cursor to the next sibling
/// - Failure of the rightmost child is reported as `Failure`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selector;

impl<L> Behavior<L> for Selector {
    fn name(&self) -> &str {
        "select"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }

    fn on_fail(&self, _parent: &Cursor<L>, child: Cursor<L>) -> Step<L> {
        match child.right() {
            Ok(next) => Step::Move(next),
            Err(_) => Step::Fail,
        }
    }
}

/// Enters one child chosen uniformly at random and reports its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Random;

impl<L> Behavior<L> for Random {
    fn name(&self) -> &str {
        "random"
    }

    fn first_child(&self, node: &Node<L>, rng: &mut dyn RngCore) -> usize {
        rng.gen_range(0..node.child_count())
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Fail
    }
}

/// Enters one child chosen with probability proportional to its weight and
/// reports its result.
///
/// Weights run parallel to the node's children and are all positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomWeighted {
    weights: Arc<[u32]>,
}

impl RandomWeighted {
    /// Creates the kind from a list of positive weights.
    pub fn new(weights: Vec<u32>) -> Result<Self> {
        if let Some(index) = weights.iter().position(|&weight| weight == 0) {
            return Err(BuildError::ZeroWeight { index });
        }
        Ok(Self {
            weights: weights.into(),
        })
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Sum of all weights.
    pub fn total(&self) -> u64 {
        self.weights.iter().map(|&weight| u64::from(weight)).sum()
    }

    pub(crate) fn validate(&self, children: usize) -> Result<()> {
        if self.weights.len() != children {
            return Err(BuildError::WeightCountMismatch {
                weights: self.weights.len(),
                children,
            });
        }
        Ok(())
    }
}

impl<L> Behavior<L> for RandomWeighted {
    fn name(&self) -> &str {
        "random_weighted"
    }

    fn first_child(&self, _node: &Node<L>, rng: &mut dyn RngCore) -> usize {
        let draw = rng.gen_range(1..=self.total());
        weighted_index(&self.weights, draw)
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Fail
    }
}

/// Maps a draw in `[1, sum(weights)]` to the first index whose running sum
/// reaches it.
///
/// Draws beyond the total select the last index.
pub fn weighted_index(weights: &[u32], draw: u64) -> usize {
    let mut running = 0u64;
    for (index, &weight) in weights.iter().enumerate() {
        running += u64::from(weight);
        if running >= draw {
            return index;
        }
    }
    weights.len().saturating_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{leaf, random, random_weighted, select, sequence};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn sequence_moves_right_then_succeeds() {
        let root = Cursor::new(sequence(vec![leaf("a"), leaf("b")]).unwrap());
        let a = root.down().unwrap();

        let Step::Move(b) = Sequence.on_succeed(&root, a) else {
            panic!("expected move to next sibling");
        };
        assert_eq!(b.focus().as_leaf(), Some(&"b"));
        assert!(matches!(Sequence.on_succeed(&root, b.clone()), Step::Succeed));
        assert!(matches!(Sequence.on_fail(&root, b), Step::Fail));
    }

    #[test]
    fn selector_moves_right_then_fails() {
        let root = Cursor::new(select(vec![leaf("a"), leaf("b")]).unwrap());
        let a = root.down().unwrap();

        assert!(matches!(Selector.on_succeed(&root, a.clone()), Step::Succeed));
        let Step::Move(b) = Selector.on_fail(&root, a) else {
            panic!("expected move to next sibling");
        };
        assert_eq!(b.focus().as_leaf(), Some(&"b"));
        assert!(matches!(Selector.on_fail(&root, b), Step::Fail));
    }

    #[test]
    fn weighted_index_walks_running_sum() {
        let weights = [3, 2, 1];
        assert_eq!(weighted_index(&weights, 1), 0);
        assert_eq!(weighted_index(&weights, 3), 0);
        assert_eq!(weighted_index(&weights, 4), 1);
        assert_eq!(weighted_index(&weights, 5), 1);
        assert_eq!(weighted_index(&weights, 6), 2);
        assert_eq!(weighted_index(&weights, 7), 2);
    }

    #[test]
    fn zero_weight_rejected() {
        assert_eq!(
            RandomWeighted::new(vec![1, 0, 2]).unwrap_err(),
            BuildError::ZeroWeight { index: 1 }
        );
    }

    #[test]
    fn random_first_child_stays_in_range() {
        let tree = random(vec![leaf(0), leaf(1), leaf(2)]).unwrap();
        let node = tree.as_node().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let index = Random.first_child(node, &mut rng);
            seen[index] = true;
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn random_weighted_favors_heavier_children() {
        let tree = random_weighted(vec![(leaf("a"), 3), (leaf("b"), 2), (leaf("c"), 1)]).unwrap();
        let node = tree.as_node().unwrap();
        let crate::NodeKind::RandomWeighted(kind) = node.kind() else {
            panic!("expected random_weighted");
        };
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0u32; 3];
        for _ in 0..6_000 {
            counts[kind.first_child(node, &mut rng)] += 1;
        }
        assert!(counts[0] > counts[1], "{counts:?}");
        assert!(counts[1] > counts[2], "{counts:?}");
    }
}
