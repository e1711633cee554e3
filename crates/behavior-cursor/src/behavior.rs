//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, the contract every node kind
//! satisfies to take part in traversal. Built-in kinds implement it in
//! [`composite`](crate::composite) and [`decorator`](crate::decorator);
//! user-defined kinds implement it and are wrapped in
//! [`NodeKind::Custom`](crate::NodeKind::Custom).
//!
//! Child storage is uniform across kinds and lives on [`Node`] itself
//! ([`Node::children`], [`Node::with_children`], [`Node::with_kind`]), so a
//! kind only decides *where to go*. Anything that is not a node is a leaf and
//! needs no implementation at all.

use rand::RngCore;

use crate::cursor::Cursor;
use crate::tree::Node;

/// Where a node sends the cursor after one of its children reports back.
pub enum Step<L> {
    /// Re-enter the tree at this position and descend to a leaf from there.
    Move(Cursor<L>),

    /// Report success to this node's own parent.
    Succeed,

    /// Report failure to this node's own parent.
    Fail,
}

impl<L> std::fmt::Debug for Step<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Move(cursor) => f.debug_tuple("Move").field(&cursor.path()).finish(),
            Step::Succeed => f.write_str("Succeed"),
            Step::Fail => f.write_str("Fail"),
        }
    }
}

/// Traversal rules of an inner node.
pub trait Behavior<L>: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Index of the child to descend into when the node is entered.
    ///
    /// Defaults to the leftmost child. Indices past the end are clamped to
    /// the last child.
    fn first_child(&self, node: &Node<L>, rng: &mut dyn RngCore) -> usize {
        let _ = (node, rng);
        0
    }

    /// Reacts to `child` succeeding.
    ///
    /// `parent` is focused on this node; `child` is focused on the child that
    /// reported, already restored to its unedited state.
    fn on_succeed(&self, parent: &Cursor<L>, child: Cursor<L>) -> Step<L>;

    /// Reacts to `child` failing. Arguments are as for [`Behavior::on_succeed`].
    fn on_fail(&self, parent: &Cursor<L>, child: Cursor<L>) -> Step<L>;
}
