//! Stateful traversal of a behavior tree.
//!
//! A [`BehaviorTree`] holds a cursor that always rests on exactly one leaf.
//! Callers report the outcome of that leaf's behavior with
//! [`succeed`](BehaviorTree::succeed) or [`fail`](BehaviorTree::fail); the
//! signal climbs the cursor's path, each ancestor's [`Behavior`] deciding
//! whether to move the cursor, pass the signal on, or flip it. A signal that
//! climbs past the root restarts the tree from its first leaf, so an instance
//! never runs out of leaves.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::behavior::Step;
use crate::cursor::Cursor;
use crate::status::Status;
use crate::tree::Tree;

#[cfg(doc)]
use crate::behavior::Behavior;

/// Settings for [`BehaviorTree::with_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the RNG behind random and weighted nodes. `None` seeds from
    /// OS entropy.
    pub seed: Option<u64>,
}

/// A running instance of a tree definition.
///
/// The definition is shared, never modified; node-local state such as repeat
/// counters lives on this instance's cursor path only. Many instances may be
/// started from one definition and driven independently.
pub struct BehaviorTree<L, R = StdRng> {
    definition: Tree<L>,
    cursor: Cursor<L>,
    leaf: Arc<L>,
    rng: R,
    restarts: u64,
}

impl<L> BehaviorTree<L> {
    /// Starts `tree` with an entropy-seeded RNG.
    pub fn start(tree: Tree<L>) -> Self {
        Self::with_config(tree, &EngineConfig::default())
    }

    /// Starts `tree` with an RNG built from `config`.
    pub fn with_config(tree: Tree<L>, config: &EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(tree, rng)
    }
}

impl<L, R: RngCore> BehaviorTree<L, R> {
    /// Starts `tree`, drawing random choices from `rng`.
    pub fn with_rng(tree: Tree<L>, mut rng: R) -> Self {
        let (cursor, leaf) = descend_to_leaf(Cursor::new(tree.clone()), &mut rng);
        tracing::debug!(path = ?cursor.path(), "started tree");
        Self {
            definition: tree,
            cursor,
            leaf,
            rng,
            restarts: 0,
        }
    }

    /// The leaf the cursor rests on.
    pub fn value(&self) -> &L {
        &self.leaf
    }

    pub fn cursor(&self) -> &Cursor<L> {
        &self.cursor
    }

    pub fn definition(&self) -> &Tree<L> {
        &self.definition
    }

    /// Number of times traversal has run past the root and started over.
    pub fn restarts(&self) -> u64 {
        self.restarts
    }

    /// Reports that the current leaf's behavior succeeded.
    pub fn succeed(&mut self) {
        self.signal(Status::Success);
    }

    /// Reports that the current leaf's behavior failed.
    pub fn fail(&mut self) {
        self.signal(Status::Failure);
    }

    /// Reports `status` for the current leaf and moves to the next one.
    pub fn signal(&mut self, mut status: Status) {
        let mut child = self.cursor.rewind();
        loop {
            // Past the root: nothing is left to intercept the signal.
            let Ok(parent) = child.up() else {
                self.restart();
                return;
            };

            let step = match parent.focus() {
                Tree::Node(node) => {
                    let behavior = node.kind().behavior();
                    let step = match status {
                        Status::Success => behavior.on_succeed(&parent, child),
                        Status::Failure => behavior.on_fail(&parent, child),
                    };
                    tracing::trace!(
                        depth = parent.depth(),
                        kind = behavior.name(),
                        ?status,
                        ?step,
                        "child reported"
                    );
                    step
                }
                // Leaves keep the cursor where it is.
                Tree::Leaf(_) => Step::Move(child),
            };

            match step {
                Step::Move(next) => {
                    self.settle(next);
                    return;
                }
                Step::Succeed => status = Status::Success,
                Step::Fail => status = Status::Failure,
            }
            child = parent.rewind();
        }
    }

    /// Re-enters the definition from the root.
    pub fn restart(&mut self) {
        self.restarts += 1;
        tracing::debug!(restarts = self.restarts, "traversal exhausted; restarting");
        self.settle(Cursor::new(self.definition.clone()));
    }

    fn settle(&mut self, cursor: Cursor<L>) {
        let (cursor, leaf) = descend_to_leaf(cursor, &mut self.rng);
        tracing::debug!(path = ?cursor.path(), "entered leaf");
        self.cursor = cursor;
        self.leaf = leaf;
    }
}

/// Follows each node's first-child choice down to a leaf.
fn descend_to_leaf<L, R: RngCore>(mut cursor: Cursor<L>, rng: &mut R) -> (Cursor<L>, Arc<L>) {
    loop {
        match cursor.focus().clone() {
            Tree::Leaf(leaf) => return (cursor, leaf),
            Tree::Node(node) => {
                let index = node.kind().behavior().first_child(&node, rng);
                cursor = cursor.enter(&node, index);
            }
        }
    }
}

impl<L, R: Clone> Clone for BehaviorTree<L, R> {
    fn clone(&self) -> Self {
        Self {
            definition: self.definition.clone(),
            cursor: self.cursor.clone(),
            leaf: Arc::clone(&self.leaf),
            rng: self.rng.clone(),
            restarts: self.restarts,
        }
    }
}

impl<L: fmt::Debug, R> fmt::Debug for BehaviorTree<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BehaviorTree")
            .field("value", &self.leaf)
            .field("path", &self.cursor.path())
            .field("restarts", &self.restarts)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::*;

    fn run(tree: Tree<&'static str>) -> BehaviorTree<&'static str> {
        BehaviorTree::with_config(tree, &EngineConfig { seed: Some(1) })
    }

    #[test]
    fn select_tries_next_child_on_failure() {
        let mut bt = run(select(vec![leaf("a"), leaf("b")]).unwrap());
        assert_eq!(*bt.value(), "a");
        bt.fail();
        assert_eq!(*bt.value(), "b");
        bt.fail();
        assert_eq!(*bt.value(), "a");
        assert_eq!(bt.restarts(), 1);
    }

    #[test]
    fn select_success_restarts() {
        let mut bt = run(select(vec![leaf("a"), leaf("b")]).unwrap());
        bt.fail();
        bt.succeed();
        assert_eq!(*bt.value(), "a");
        assert_eq!(bt.restarts(), 1);
    }

    #[test]
    fn sequence_advances_on_success() {
        let mut bt = run(sequence(vec![leaf("a"), leaf("b")]).unwrap());
        assert_eq!(*bt.value(), "a");
        bt.succeed();
        assert_eq!(*bt.value(), "b");
        bt.succeed();
        assert_eq!(*bt.value(), "a");
    }

    #[test]
    fn sequence_failure_restarts() {
        let mut bt = run(sequence(vec![leaf("a"), leaf("b"), leaf("c")]).unwrap());
        bt.succeed();
        bt.fail();
        assert_eq!(*bt.value(), "a");
    }

    #[test]
    fn nested_selects_reach_outer_sibling() {
        let inner = select(vec![leaf("a"), leaf("b")]).unwrap();
        let mut bt = run(select(vec![inner, leaf("c")]).unwrap());
        assert_eq!(*bt.value(), "a");
        bt.fail();
        assert_eq!(*bt.value(), "b");
        bt.fail();
        assert_eq!(*bt.value(), "c");
    }

    #[test]
    fn single_leaf_restarts_in_place() {
        let mut bt = run(leaf("only"));
        assert!(bt.cursor().is_root());
        bt.succeed();
        assert_eq!(*bt.value(), "only");
        bt.fail();
        assert_eq!(*bt.value(), "only");
        assert_eq!(bt.restarts(), 2);
    }

    #[test]
    fn repeat_n_then_moves_on() {
        let mut bt = run(sequence(vec![repeat_n(2, leaf("a")).unwrap(), leaf("b")]).unwrap());
        assert_eq!(*bt.value(), "a");
        bt.fail();
        assert_eq!(*bt.value(), "a");
        bt.fail();
        assert_eq!(*bt.value(), "b");
    }

    #[test]
    fn repeat_n_counter_resets_after_restart() {
        let mut bt = run(sequence(vec![repeat_n(2, leaf("a")).unwrap(), leaf("b")]).unwrap());
        for _ in 0..3 {
            let mut seen = vec![*bt.value()];
            for _ in 0..2 {
                bt.succeed();
                seen.push(*bt.value());
            }
            assert_eq!(seen, ["a", "a", "b"]);
            bt.succeed();
        }
    }

    #[test]
    fn nested_repeat_n_counters_are_independent() {
        let inner = repeat_n(2, leaf("a")).unwrap();
        let outer = repeat_n(3, inner).unwrap();
        let mut bt = run(sequence(vec![outer, leaf("b")]).unwrap());

        let mut runs = 0;
        while *bt.value() == "a" {
            runs += 1;
            bt.succeed();
        }
        assert_eq!(runs, 6);
        assert_eq!(*bt.value(), "b");
    }

    #[test]
    fn negate_turns_success_into_failure() {
        let mut bt = run(sequence(vec![negate(leaf("a")), leaf("b")]).unwrap());
        assert_eq!(*bt.value(), "a");
        bt.succeed();
        assert_eq!(*bt.value(), "a");
        assert_eq!(bt.restarts(), 1);

        bt.fail();
        assert_eq!(*bt.value(), "b");
    }

    #[test]
    fn always_fail_reports_failure_either_way() {
        let mut bt = run(sequence(vec![always_fail(leaf("a")), leaf("b")]).unwrap());
        bt.succeed();
        assert_eq!(*bt.value(), "a");
        bt.fail();
        assert_eq!(*bt.value(), "a");
        assert_eq!(bt.restarts(), 2);
    }

    #[test]
    fn always_succeed_reports_success_either_way() {
        let mut bt = run(sequence(vec![always_succeed(leaf("a")), leaf("b")]).unwrap());
        bt.fail();
        assert_eq!(*bt.value(), "b");
        bt.succeed();
        bt.succeed();
        assert_eq!(*bt.value(), "b");
    }

    #[test]
    fn repeat_until_fail_loops_on_success() {
        let mut bt = run(sequence(vec![repeat_until_fail(leaf("a")), leaf("b")]).unwrap());
        for _ in 0..5 {
            bt.succeed();
            assert_eq!(*bt.value(), "a");
        }
        bt.fail();
        assert_eq!(*bt.value(), "b");
        assert_eq!(bt.restarts(), 0);
    }

    #[test]
    fn repeat_until_succeed_loops_on_failure() {
        let mut bt = run(sequence(vec![repeat_until_succeed(leaf("a")), leaf("b")]).unwrap());
        for _ in 0..5 {
            bt.fail();
            assert_eq!(*bt.value(), "a");
        }
        bt.succeed();
        assert_eq!(*bt.value(), "b");
    }

    #[test]
    fn repeat_until_fail_reenters_child_fresh() {
        let body = sequence(vec![repeat_n(2, leaf("x")).unwrap(), leaf("y")]).unwrap();
        let mut bt = run(repeat_until_fail(body));
        for _ in 0..3 {
            let mut seen = vec![*bt.value()];
            for _ in 0..2 {
                bt.succeed();
                seen.push(*bt.value());
            }
            assert_eq!(seen, ["x", "x", "y"]);
            bt.succeed();
        }
        assert_eq!(bt.restarts(), 0);
    }

    #[test]
    fn manual_restart_returns_to_first_leaf() {
        let mut bt = run(sequence(vec![leaf("a"), leaf("b")]).unwrap());
        bt.succeed();
        bt.restart();
        assert_eq!(*bt.value(), "a");
        assert_eq!(bt.restarts(), 1);
    }

    #[test]
    fn same_seed_same_choices() {
        let tree = random(vec![leaf("a"), leaf("b"), leaf("c"), leaf("d")]).unwrap();
        let mut left = run(tree.clone());
        let mut right = run(tree);
        for _ in 0..50 {
            assert_eq!(left.value(), right.value());
            left.succeed();
            right.succeed();
        }
    }
}
