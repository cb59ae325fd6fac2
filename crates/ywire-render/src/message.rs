use serde::{Deserialize, Serialize};
use ywire_path::WirePath;

use crate::value::TypedValue;

/// One path-addressed value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Relative to the notification prefix. A leaf at the prefix itself has
    /// an empty wire path.
    pub path: WirePath,
    pub val: TypedValue,
}

/// A set of updates and deletes sharing a timestamp and an optional prefix.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    pub prefix: Option<WirePath>,
    pub update: Vec<Update>,
    pub delete: Vec<WirePath>,
}

impl Notification {
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.update.is_empty() && self.delete.is_empty()
    }
}
