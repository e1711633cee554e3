//! Error types for tree construction and cursor navigation.
//!
//! Only [`BuildError`] ever reaches users of the engine: it is returned by the
//! builder functions when asked to construct a malformed node. [`NavError`] is
//! the vocabulary of the cursor; the engine interprets every one of them
//! during propagation, so `succeed`/`fail` themselves never fail.

use thiserror::Error;

/// Invalid arguments passed to a node constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("{kind} requires at least one child")]
    EmptyChildren { kind: &'static str },

    #[error("{kind} takes exactly {expected} child(ren), got {actual}")]
    WrongArity {
        kind: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("repeat_n requires a count greater than 1, got {count}")]
    RepeatCountTooSmall { count: u32 },

    #[error("weight at index {index} must be positive")]
    ZeroWeight { index: usize },

    #[error("{weights} weight(s) given for {children} child(ren)")]
    WeightCountMismatch { weights: usize, children: usize },
}

/// Navigation outcomes that do not produce a new cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NavError {
    #[error("focus is a leaf and has no children")]
    NoChildren,

    #[error("child index {index} out of range for {len} child(ren)")]
    ChildOutOfRange { index: usize, len: usize },

    #[error("focus is the rightmost sibling")]
    RightFromRightmost,

    #[error("focus is the leftmost sibling")]
    LeftFromLeftmost,

    #[error("focus is the root")]
    UpFromRoot,
}

pub type Result<T, E = BuildError> = std::result::Result<T, E>;
