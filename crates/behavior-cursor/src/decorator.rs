//! Decorator behavior nodes.
//!
//! Decorators wrap a single child and change how its result is reported
//! upward, or whether it is reported at all. This module provides the result
//! rewriters [`Inverter`] (NOT logic), [`AlwaysSucceed`] and [`AlwaysFail`],
//! and the loops [`RepeatUntilFail`], [`RepeatUntilSucceed`] and [`RepeatN`].

use crate::behavior::{Behavior, Step};
use crate::cursor::Cursor;
use crate::error::{BuildError, Result};
use crate::tree::{NodeKind, Tree};

/// Inverts the result of its child.
///
/// - If the child succeeds, the inverter reports `Failure`
/// - If the child fails, the inverter reports `Success`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Inverter;

impl<L> Behavior<L> for Inverter {
    fn name(&self) -> &str {
        "negate"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Fail
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }
}

/// Reports `Success`, regardless of the child's result.
///
/// Useful for optional steps that must not break an enclosing sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysSucceed;

impl<L> Behavior<L> for AlwaysSucceed {
    fn name(&self) -> &str {
        "always_succeed"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }
}

/// Reports `Failure`, regardless of the child's result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlwaysFail;

impl<L> Behavior<L> for AlwaysFail {
    fn name(&self) -> &str {
        "always_fail"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Fail
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Fail
    }
}

/// Re-enters its child after every success; the first failure is reported
/// as `Success`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatUntilFail;

impl<L> Behavior<L> for RepeatUntilFail {
    fn name(&self) -> &str {
        "repeat_until_fail"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, child: Cursor<L>) -> Step<L> {
        Step::Move(child)
    }

    fn on_fail(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }
}

/// Re-enters its child after every failure; the first success is reported
/// as `Success`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepeatUntilSucceed;

impl<L> Behavior<L> for RepeatUntilSucceed {
    fn name(&self) -> &str {
        "repeat_until_succeed"
    }

    fn on_succeed(&self, _parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        Step::Succeed
    }

    fn on_fail(&self, _parent: &Cursor<L>, child: Cursor<L>) -> Step<L> {
        Step::Move(child)
    }
}

/// Runs its child a fixed number of times, whatever each run's result, then
/// reports `Success`.
///
/// The remaining count is node-local state. It is decremented on the
/// instance's own cursor path, never in the shared definition, and is back at
/// its initial value whenever the node is entered afresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatN {
    count: u32,
    remaining: u32,
}

impl RepeatN {
    /// Creates a repeat of `count` runs; `count` must be greater than 1.
    pub fn new(count: u32) -> Result<Self> {
        if count <= 1 {
            return Err(BuildError::RepeatCountTooSmall { count });
        }
        Ok(Self {
            count,
            remaining: count,
        })
    }

    /// Number of runs the node was built with.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Runs left, including the one in progress. Never below 1.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    fn next_run<L>(&self, parent: &Cursor<L>) -> Step<L> {
        if self.remaining <= 1 {
            return Step::Succeed;
        }
        let next = Self {
            remaining: self.remaining - 1,
            ..*self
        };
        let parent = parent.edit(|tree| match tree.as_node() {
            Some(node) => Tree::from(node.restate(NodeKind::RepeatN(next))),
            None => tree.clone(),
        });
        Step::Move(parent)
    }
}

impl<L> Behavior<L> for RepeatN {
    fn name(&self) -> &str {
        "repeat_n"
    }

    fn on_succeed(&self, parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        self.next_run(parent)
    }

    fn on_fail(&self, parent: &Cursor<L>, _child: Cursor<L>) -> Step<L> {
        self.next_run(parent)
    }
}
