//! Persistent cursor over an immutable tree.
//!
//! A [`Cursor`] is a focused subtree plus a linked path of crumbs back to the
//! root. Each crumb keeps the parent node as it was when the cursor went
//! down, and the index of the focus within it; left and right siblings are
//! read out of that shared child list. Edits replace the focus only. They are
//! written into the parent when the cursor moves up (or sideways), and nothing
//! reachable from another cursor or from the original tree is ever modified.
//!
//! Crumbs are reference counted, so cloning a cursor is O(1) and every
//! navigation step allocates at most one crumb. Moving up from an unedited
//! focus hands back the recorded parent allocation unchanged.

use std::fmt;
use std::sync::Arc;

use crate::error::NavError;
use crate::tree::{Node, Tree};

/// A navigable, editable position inside a tree.
pub struct Cursor<L> {
    focus: Tree<L>,
    path: Option<Arc<Crumb<L>>>,
    changed: bool,
}

struct Crumb<L> {
    parent: Arc<Node<L>>,
    index: usize,
    /// Whether `parent` differs from the node recorded one level higher.
    changed: bool,
    up: Option<Arc<Crumb<L>>>,
}

impl<L> Cursor<L> {
    /// Creates a cursor focused on the root of `tree`.
    pub fn new(tree: Tree<L>) -> Self {
        Self {
            focus: tree,
            path: None,
            changed: false,
        }
    }

    pub fn focus(&self) -> &Tree<L> {
        &self.focus
    }

    /// Returns `true` if no crumbs remain above the focus.
    pub fn is_root(&self) -> bool {
        self.path.is_none()
    }

    /// Returns `true` if the focus differs from the tree it was reached in.
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Position of the focus among its siblings, `None` at the root.
    pub fn index(&self) -> Option<usize> {
        self.path.as_deref().map(|crumb| crumb.index)
    }

    pub fn depth(&self) -> usize {
        self.crumbs().count()
    }

    /// Child indices leading from the root to the focus.
    pub fn path(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.crumbs().map(|crumb| crumb.index).collect();
        indices.reverse();
        indices
    }

    /// Moves to the leftmost child of the focus.
    pub fn down(&self) -> Result<Self, NavError> {
        self.down_to(0)
    }

    /// Moves to the child at `index`.
    pub fn down_to(&self, index: usize) -> Result<Self, NavError> {
        let Tree::Node(node) = &self.focus else {
            return Err(NavError::NoChildren);
        };
        let len = node.child_count();
        if index >= len {
            return Err(NavError::ChildOutOfRange { index, len });
        }
        Ok(self.enter(node, index))
    }

    /// Descends into `node`, which must be the current focus. Out-of-range
    /// indices are clamped to the last child.
    pub(crate) fn enter(&self, node: &Arc<Node<L>>, index: usize) -> Self {
        let index = index.min(node.child_count().saturating_sub(1));
        Self {
            focus: node.children()[index].clone(),
            path: Some(Arc::new(Crumb {
                parent: Arc::clone(node),
                index,
                changed: self.changed,
                up: self.path.clone(),
            })),
            changed: false,
        }
    }

    /// Moves to the next sibling.
    pub fn right(&self) -> Result<Self, NavError> {
        let crumb = self.path.as_deref().ok_or(NavError::RightFromRightmost)?;
        let next = crumb.index + 1;
        if next >= crumb.parent.child_count() {
            return Err(NavError::RightFromRightmost);
        }
        Ok(self.sibling(crumb, next))
    }

    /// Moves to the previous sibling.
    pub fn left(&self) -> Result<Self, NavError> {
        let crumb = self.path.as_deref().ok_or(NavError::LeftFromLeftmost)?;
        let prev = crumb
            .index
            .checked_sub(1)
            .ok_or(NavError::LeftFromLeftmost)?;
        Ok(self.sibling(crumb, prev))
    }

    fn sibling(&self, crumb: &Crumb<L>, index: usize) -> Self {
        let (parent, changed) = if self.changed {
            let parent = crumb.parent.with_child(crumb.index, self.focus.clone());
            (Arc::new(parent), true)
        } else {
            (Arc::clone(&crumb.parent), crumb.changed)
        };
        Self {
            focus: parent.children()[index].clone(),
            path: Some(Arc::new(Crumb {
                parent,
                index,
                changed,
                up: crumb.up.clone(),
            })),
            changed: false,
        }
    }

    /// Moves to the parent, rebuilding it if the focus was edited.
    pub fn up(&self) -> Result<Self, NavError> {
        let crumb = self.path.as_deref().ok_or(NavError::UpFromRoot)?;
        let cursor = if self.changed {
            Self {
                focus: Tree::from(crumb.parent.with_child(crumb.index, self.focus.clone())),
                path: crumb.up.clone(),
                changed: true,
            }
        } else {
            Self {
                focus: Tree::Node(Arc::clone(&crumb.parent)),
                path: crumb.up.clone(),
                changed: crumb.changed,
            }
        };
        Ok(cursor)
    }

    /// Replaces the focus with `f(focus)`; ancestors are rebuilt lazily.
    pub fn edit<F>(&self, f: F) -> Self
    where
        F: FnOnce(&Tree<L>) -> Tree<L>,
    {
        self.replace(f(&self.focus))
    }

    pub fn replace(&self, tree: Tree<L>) -> Self {
        Self {
            focus: tree,
            path: self.path.clone(),
            changed: true,
        }
    }

    /// Discards edits to the focus, restoring the subtree its parent holds.
    ///
    /// At the root there is no parent to restore from and the cursor is
    /// returned unchanged.
    pub fn rewind(&self) -> Self {
        match self.path.as_deref() {
            Some(crumb) => Self {
                focus: crumb.parent.children()[crumb.index].clone(),
                path: self.path.clone(),
                changed: false,
            },
            None => self.clone(),
        }
    }

    /// Walks to the root and returns the tree with every edit applied.
    pub fn root(&self) -> Tree<L> {
        let mut cursor = self.clone();
        while let Ok(parent) = cursor.up() {
            cursor = parent;
        }
        cursor.focus
    }

    fn crumbs(&self) -> impl Iterator<Item = &Crumb<L>> {
        std::iter::successors(self.path.as_deref(), |crumb| crumb.up.as_deref())
    }
}

impl<L> Clone for Cursor<L> {
    fn clone(&self) -> Self {
        Self {
            focus: self.focus.clone(),
            path: self.path.clone(),
            changed: self.changed,
        }
    }
}

impl<L: fmt::Debug> fmt::Debug for Cursor<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("path", &self.path())
            .field("changed", &self.changed)
            .field("focus", &self.focus)
            .finish()
    }
}
