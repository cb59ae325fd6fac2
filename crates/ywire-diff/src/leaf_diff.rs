//! Leaf-level diff: compare two flattened trees.
//!
//! A flattened tree maps every present leaf path to its resolved value. The
//! diff detects path additions, removals, and value modifications. Values
//! compare as rendered: bytes bytewise, floats by bit pattern.

use std::collections::BTreeMap;

use ywire_path::Path;
use ywire_render::LeafValue;

/// The result of comparing two flattened trees.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LeafDiff {
    /// Changes in path order.
    pub changes: Vec<LeafChange>,
}

impl LeafDiff {
    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, LeafChange::Added { .. }))
            .count()
    }

    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, LeafChange::Removed { .. }))
            .count()
    }

    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, LeafChange::Modified { .. }))
            .count()
    }
}

/// A single change between two flattened trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeafChange {
    Added { path: Path, value: LeafValue },
    Removed { path: Path, value: LeafValue },
    Modified {
        path: Path,
        old: LeafValue,
        new: LeafValue,
    },
}

impl LeafChange {
    pub fn path(&self) -> &Path {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }
}

/// Compute the diff between two flattened trees.
///
/// Paths present only in `new` are `Added`, paths present only in `old` are
/// `Removed`, and paths present in both with different values are `Modified`.
pub fn diff_leaves(
    old: &BTreeMap<Path, LeafValue>,
    new: &BTreeMap<Path, LeafValue>,
) -> LeafDiff {
    let mut changes = Vec::new();

    for (path, old_val) in old {
        match new.get(path) {
            Some(new_val) if old_val != new_val => changes.push(LeafChange::Modified {
                path: path.clone(),
                old: old_val.clone(),
                new: new_val.clone(),
            }),
            Some(_) => {}
            None => changes.push(LeafChange::Removed {
                path: path.clone(),
                value: old_val.clone(),
            }),
        }
    }

    for (path, new_val) in new {
        if !old.contains_key(path) {
            changes.push(LeafChange::Added {
                path: path.clone(),
                value: new_val.clone(),
            });
        }
    }

    changes.sort_by(|a, b| a.path().cmp(b.path()));
    LeafDiff { changes }
}
