//! Cursor-driven behavior tree engine.
//!
//! A tree definition is built once from composable nodes and never modified.
//! Starting it yields a [`BehaviorTree`] whose cursor rests on one leaf at a
//! time; the caller decides what that leaf means, performs it, and reports
//! back with `succeed` or `fail`. The engine then moves the cursor to the next
//! leaf according to each ancestor's traversal rules.
//!
//! - **No ticking**: the engine never evaluates leaves, it only responds to
//!   the two signals
//! - **No end state**: running past the root restarts the tree
//! - **Shared definitions**: per-instance state lives on the cursor path
//! - **Injected randomness**: random nodes draw from the instance's RNG
//!
//! # Architecture
//!
//! - [`Tree`], [`Node`], [`NodeKind`]: the immutable node model
//! - [`Behavior`]: traversal rules of a node kind, open to custom kinds
//! - [`Cursor`]: persistent path used to navigate and locally edit a tree
//! - [`BehaviorTree`]: the running instance
//! - Composite nodes: [`Sequence`], [`Selector`], [`Random`], [`RandomWeighted`]
//! - Decorator nodes: [`Inverter`], [`AlwaysSucceed`], [`AlwaysFail`],
//!   [`RepeatUntilFail`], [`RepeatUntilSucceed`], [`RepeatN`]
//!
//! # Example
//!
//! ```
//! use behavior_cursor::builder::{leaf, negate, select, sequence};
//! use behavior_cursor::BehaviorTree;
//!
//! let patrol = sequence(vec![leaf("walk"), leaf("look")])?;
//! let tree = select(vec![negate(leaf("enemy_visible")), patrol])?;
//!
//! let mut bt = BehaviorTree::start(tree);
//! assert_eq!(*bt.value(), "enemy_visible");
//! bt.fail();
//! assert_eq!(*bt.value(), "enemy_visible");
//! bt.succeed();
//! assert_eq!(*bt.value(), "walk");
//! # Ok::<(), behavior_cursor::BuildError>(())
//! ```

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod cursor;
pub mod decorator;
pub mod engine;
pub mod error;
pub mod status;
pub mod tree;

// Re-export core types for ergonomic API
pub use behavior::{Behavior, Step};
pub use composite::{Random, RandomWeighted, Selector, Sequence, weighted_index};
pub use cursor::Cursor;
pub use decorator::{
    AlwaysFail, AlwaysSucceed, Inverter, RepeatN, RepeatUntilFail, RepeatUntilSucceed,
};
pub use engine::{BehaviorTree, EngineConfig};
pub use error::{BuildError, NavError};
pub use status::Status;
pub use tree::{Node, NodeKind, Tree};
