//! Node model.
//!
//! A tree definition is an immutable value: [`Tree`] is either an opaque leaf
//! or an inner [`Node`], and both variants sit behind an [`Arc`], so cloning a
//! tree (or handing it to many instances) only bumps reference counts.
//! Editing never writes through; every `with_*` method returns a new node that
//! shares the untouched parts with the original.

use std::fmt;
use std::sync::Arc;

use crate::behavior::Behavior;
use crate::composite::{Random, RandomWeighted, Selector, Sequence};
use crate::decorator::{
    AlwaysFail, AlwaysSucceed, Inverter, RepeatN, RepeatUntilFail, RepeatUntilSucceed,
};
use crate::error::{BuildError, Result};

/// A behavior tree: an opaque leaf value or an inner node.
///
/// Leaves are never inspected by the engine; any `L` can be a leaf.
pub enum Tree<L> {
    Leaf(Arc<L>),
    Node(Arc<Node<L>>),
}

impl<L> Tree<L> {
    /// Wraps a value as a leaf.
    pub fn leaf(value: L) -> Self {
        Tree::Leaf(Arc::new(value))
    }

    /// Builds an inner node after validating `children` against `kind`.
    pub fn node(kind: NodeKind<L>, children: Vec<Tree<L>>) -> Result<Self> {
        Node::new(kind, children).map(Tree::from)
    }

    /// Returns `true` if this tree has no children to traverse.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&L> {
        match self {
            Tree::Leaf(value) => Some(value.as_ref()),
            Tree::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node<L>> {
        match self {
            Tree::Leaf(_) => None,
            Tree::Node(node) => Some(node.as_ref()),
        }
    }

    /// Children of this tree; always empty for a leaf.
    pub fn children(&self) -> &[Tree<L>] {
        match self {
            Tree::Leaf(_) => &[],
            Tree::Node(node) => node.children(),
        }
    }

    /// Returns a copy of this tree with its children replaced.
    ///
    /// A leaf has no children to replace and is returned as is.
    pub fn with_children(&self, children: Vec<Tree<L>>) -> Result<Self> {
        match self {
            Tree::Leaf(_) => Ok(self.clone()),
            Tree::Node(node) => node.with_children(children).map(Tree::from),
        }
    }

    /// Returns `true` if both trees are the same allocation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Tree::Leaf(a), Tree::Leaf(b)) => Arc::ptr_eq(a, b),
            (Tree::Node(a), Tree::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<L> Clone for Tree<L> {
    fn clone(&self) -> Self {
        match self {
            Tree::Leaf(value) => Tree::Leaf(Arc::clone(value)),
            Tree::Node(node) => Tree::Node(Arc::clone(node)),
        }
    }
}

impl<L> From<Node<L>> for Tree<L> {
    fn from(node: Node<L>) -> Self {
        Tree::Node(Arc::new(node))
    }
}

impl<L: fmt::Debug> fmt::Debug for Tree<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Leaf(value) => f.debug_tuple("Leaf").field(value).finish(),
            Tree::Node(node) => fmt::Debug::fmt(node, f),
        }
    }
}

/// An inner node: a kind plus a nonempty, shared list of children.
pub struct Node<L> {
    kind: NodeKind<L>,
    children: Arc<[Tree<L>]>,
}

impl<L> Node<L> {
    /// Creates a node, rejecting children that do not fit the kind.
    pub fn new(kind: NodeKind<L>, children: Vec<Tree<L>>) -> Result<Self> {
        kind.validate(children.len())?;
        Ok(Self {
            kind,
            children: children.into(),
        })
    }

    pub fn kind(&self) -> &NodeKind<L> {
        &self.kind
    }

    pub fn children(&self) -> &[Tree<L>] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Tree<L>> {
        self.children.get(index)
    }

    /// Number of children; never zero.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns a copy with a different kind, sharing the children.
    pub fn with_kind(&self, kind: NodeKind<L>) -> Result<Self> {
        kind.validate(self.children.len())?;
        Ok(self.restate(kind))
    }

    /// Returns a copy with different children, keeping the kind.
    pub fn with_children(&self, children: Vec<Tree<L>>) -> Result<Self> {
        Self::new(self.kind.clone(), children)
    }

    /// Swaps kind-local state where the shape is known to be unchanged.
    pub(crate) fn restate(&self, kind: NodeKind<L>) -> Self {
        debug_assert!(kind.validate(self.children.len()).is_ok());
        Self {
            kind,
            children: Arc::clone(&self.children),
        }
    }

    /// Copies the child list with one slot replaced.
    pub(crate) fn with_child(&self, index: usize, child: Tree<L>) -> Self {
        let mut children = self.children.to_vec();
        children[index] = child;
        Self {
            kind: self.kind.clone(),
            children: children.into(),
        }
    }

    /// Builds a single-child node whose arity is fixed by construction.
    pub(crate) fn decorate(kind: NodeKind<L>, child: Tree<L>) -> Self {
        Self {
            kind,
            children: Arc::from([child]),
        }
    }
}

impl<L> Clone for Node<L> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            children: Arc::clone(&self.children),
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for Node<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .finish()
    }
}

/// The traversal rules a node follows, with any state they carry.
///
/// Built-in kinds are closed variants; [`NodeKind::Custom`] is the extension
/// point for user-defined traversal semantics.
pub enum NodeKind<L> {
    Sequence(Sequence),
    Select(Selector),
    RepeatUntilFail(RepeatUntilFail),
    RepeatUntilSucceed(RepeatUntilSucceed),
    RepeatN(RepeatN),
    Random(Random),
    RandomWeighted(RandomWeighted),
    AlwaysSucceed(AlwaysSucceed),
    AlwaysFail(AlwaysFail),
    Negate(Inverter),
    Custom(Arc<dyn Behavior<L>>),
}

impl<L> NodeKind<L> {
    /// The traversal rules of this kind.
    pub fn behavior(&self) -> &dyn Behavior<L> {
        match self {
            NodeKind::Sequence(kind) => kind,
            NodeKind::Select(kind) => kind,
            NodeKind::RepeatUntilFail(kind) => kind,
            NodeKind::RepeatUntilSucceed(kind) => kind,
            NodeKind::RepeatN(kind) => kind,
            NodeKind::Random(kind) => kind,
            NodeKind::RandomWeighted(kind) => kind,
            NodeKind::AlwaysSucceed(kind) => kind,
            NodeKind::AlwaysFail(kind) => kind,
            NodeKind::Negate(kind) => kind,
            NodeKind::Custom(kind) => kind.as_ref(),
        }
    }

    pub fn name(&self) -> &str {
        self.behavior().name()
    }

    /// Exact number of children this kind takes, if fixed.
    pub fn arity(&self) -> Option<usize> {
        match self {
            NodeKind::RepeatUntilFail(_)
            | NodeKind::RepeatUntilSucceed(_)
            | NodeKind::RepeatN(_)
            | NodeKind::AlwaysSucceed(_)
            | NodeKind::AlwaysFail(_)
            | NodeKind::Negate(_) => Some(1),
            NodeKind::Sequence(_)
            | NodeKind::Select(_)
            | NodeKind::Random(_)
            | NodeKind::RandomWeighted(_)
            | NodeKind::Custom(_) => None,
        }
    }

    fn validate(&self, children: usize) -> Result<()> {
        if children == 0 {
            return Err(BuildError::EmptyChildren {
                kind: self.static_name(),
            });
        }
        if let Some(expected) = self.arity()
            && expected != children
        {
            return Err(BuildError::WrongArity {
                kind: self.static_name(),
                expected,
                actual: children,
            });
        }
        if let NodeKind::RandomWeighted(weighted) = self {
            weighted.validate(children)?;
        }
        Ok(())
    }

    fn static_name(&self) -> &'static str {
        match self {
            NodeKind::Sequence(_) => "sequence",
            NodeKind::Select(_) => "select",
            NodeKind::RepeatUntilFail(_) => "repeat_until_fail",
            NodeKind::RepeatUntilSucceed(_) => "repeat_until_succeed",
            NodeKind::RepeatN(_) => "repeat_n",
            NodeKind::Random(_) => "random",
            NodeKind::RandomWeighted(_) => "random_weighted",
            NodeKind::AlwaysSucceed(_) => "always_succeed",
            NodeKind::AlwaysFail(_) => "always_fail",
            NodeKind::Negate(_) => "negate",
            NodeKind::Custom(_) => "custom",
        }
    }
}

impl<L> Clone for NodeKind<L> {
    fn clone(&self) -> Self {
        match self {
            NodeKind::Sequence(kind) => NodeKind::Sequence(*kind),
            NodeKind::Select(kind) => NodeKind::Select(*kind),
            NodeKind::RepeatUntilFail(kind) => NodeKind::RepeatUntilFail(*kind),
            NodeKind::RepeatUntilSucceed(kind) => NodeKind::RepeatUntilSucceed(*kind),
            NodeKind::RepeatN(kind) => NodeKind::RepeatN(*kind),
            NodeKind::Random(kind) => NodeKind::Random(*kind),
            NodeKind::RandomWeighted(kind) => NodeKind::RandomWeighted(kind.clone()),
            NodeKind::AlwaysSucceed(kind) => NodeKind::AlwaysSucceed(*kind),
            NodeKind::AlwaysFail(kind) => NodeKind::AlwaysFail(*kind),
            NodeKind::Negate(kind) => NodeKind::Negate(*kind),
            NodeKind::Custom(kind) => NodeKind::Custom(Arc::clone(kind)),
        }
    }
}

impl<L> fmt::Debug for NodeKind<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::RepeatN(kind) => fmt::Debug::fmt(kind, f),
            NodeKind::RandomWeighted(kind) => fmt::Debug::fmt(kind, f),
            NodeKind::Custom(kind) => f.debug_tuple("Custom").field(&kind.name()).finish(),
            other => f.write_str(other.static_name()),
        }
    }
}
