//! Diff engine for ywire.
//!
//! Flattens two trees of the same node type and compares their leaves,
//! producing the update and delete sets that turn one into the other.
//!
//! # Key Types
//!
//! - [`LeafDiff`] / [`LeafChange`] -- Leaf-level diff (added/removed/modified paths)
//! - [`DiffOptions`] -- Diff settings
//! - [`diff`] -- The diff as a [`Notification`](ywire_render::Notification)

pub mod error;
pub mod leaf_diff;
pub mod tree_diff;

pub use error::{DiffError, DiffResult};
pub use leaf_diff::{diff_leaves, LeafChange, LeafDiff};
pub use tree_diff::{diff, diff_trees, DiffOptions};
