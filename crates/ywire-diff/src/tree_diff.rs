//! Tree-level diff: updates and deletes between two trees of one type.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::debug;
use ywire_path::Path;
use ywire_render::{encode_typed_value, flatten, Notification, Update};
use ywire_types::Node;

use crate::error::{DiffError, DiffResult};
use crate::leaf_diff::{diff_leaves, LeafChange, LeafDiff};

/// Diff settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    /// Report only modifications and deletions; leaves that exist in the
    /// modified tree but not in the original produce no update.
    pub ignore_additions: bool,
}

/// Compare the flattened leaves of two trees.
///
/// Both trees are rooted at the structured root.
pub fn diff_trees(original: &dyn Node, modified: &dyn Node) -> DiffResult<LeafDiff> {
    if original.type_name() != modified.type_name() {
        return Err(DiffError::TypeMismatch {
            original: original.type_name(),
            modified: modified.type_name(),
        });
    }
    let root = Path::structured_root();
    let old = flatten(original, &root)?;
    let new = flatten(modified, &root)?;
    Ok(diff_leaves(&old, &new))
}

/// The notification that turns `original` into `modified`.
///
/// Every leaf that is new or changed in `modified` becomes an update with
/// its new value, and every leaf of `original` missing from `modified`
/// becomes a delete. The timestamp is the current time.
pub fn diff(
    original: &dyn Node,
    modified: &dyn Node,
    options: &DiffOptions,
) -> DiffResult<Notification> {
    let changes = diff_trees(original, modified)?;

    let mut notification = Notification::new(now_nanos());
    for change in changes.changes {
        match change {
            LeafChange::Added { .. } if options.ignore_additions => {}
            LeafChange::Added { path, value } | LeafChange::Modified { path, new: value, .. } => {
                notification.update.push(Update {
                    path: path.to_wire().unwrap_or_default(),
                    val: encode_typed_value(&value),
                });
            }
            LeafChange::Removed { path, .. } => {
                notification.delete.push(path.to_wire().unwrap_or_default());
            }
        }
    }
    debug!(
        node = original.type_name(),
        updates = notification.update.len(),
        deletes = notification.delete.len(),
        "diffed trees"
    );
    Ok(notification)
}

fn now_nanos() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| i64::try_from(d.as_nanos()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ywire_path::WirePath;
    use ywire_render::{LeafValue, TypedValue};
    use ywire_types::fixtures::{root_with_list, Color, Interface, Interfaces, Item, Root};

    use super::*;

    fn texts(paths: &[WirePath]) -> Vec<String> {
        paths
            .iter()
            .map(|p| Path::from_wire(p).unwrap().to_text())
            .collect()
    }

    fn populated() -> Root {
        let mut root = root_with_list();
        root.str_leaf = Some("x".into());
        root.color = Color::Red;
        root.tags = vec!["a".into(), "b".into()];
        root.blob = Some(vec![1, 2, 3]);
        let mut interfaces = Interfaces::default();
        interfaces
            .interface
            .insert("eth0".into(), Interface::new("eth0"));
        root.interfaces = Some(Box::new(interfaces));
        root
    }

    #[test]
    fn identical_trees_no_diff() {
        let root = populated();
        let n = diff(&root, &root, &DiffOptions::default()).unwrap();
        assert!(n.update.is_empty());
        assert!(n.delete.is_empty());
        assert!(n.timestamp > 0);
    }

    #[test]
    fn added_string_leaf() {
        let original = Root::default();
        let modified = Root {
            str_leaf: Some("cabernet-sauvignon".into()),
            ..Default::default()
        };
        let n = diff(&original, &modified, &DiffOptions::default()).unwrap();
        assert!(n.delete.is_empty());
        assert_eq!(n.update.len(), 1);
        assert_eq!(
            texts(&[n.update[0].path.clone()]),
            vec!["/str".to_string()]
        );
        assert_eq!(
            n.update[0].val,
            TypedValue::String("cabernet-sauvignon".into())
        );
    }

    #[test]
    fn removed_list_member_deletes_every_path() {
        let original = root_with_list();
        let mut modified = root_with_list();
        modified.list.remove("p2");

        let n = diff(&original, &modified, &DiffOptions::default()).unwrap();
        assert!(n.update.is_empty());
        assert_eq!(
            texts(&n.delete),
            vec![
                "/list[val=p2]/config/val",
                "/list[val=p2]/config/value",
                "/list[val=p2]/val",
            ]
        );
    }

    #[test]
    fn modified_value_is_an_update() {
        let original = root_with_list();
        let mut modified = root_with_list();
        if let Some(item) = modified.list.get_mut("p1") {
            item.value = Some(10);
        }
        let n = diff(&original, &modified, &DiffOptions::default()).unwrap();
        assert_eq!(n.update.len(), 1);
        assert_eq!(texts(&[n.update[0].path.clone()]), vec!["/list[val=p1]/config/value"]);
        assert_eq!(n.update[0].val, TypedValue::Uint(10));
    }

    #[test]
    fn ignore_additions() {
        let original = root_with_list();
        let mut modified = root_with_list();
        modified.str_leaf = Some("new".into());
        modified.list.insert("p3".into(), Item::new("p3", None));
        modified.list.remove("p1");
        if let Some(item) = modified.list.get_mut("p2") {
            item.value = Some(20);
        }

        let options = DiffOptions {
            ignore_additions: true,
        };
        let n = diff(&original, &modified, &options).unwrap();
        assert_eq!(texts(&n.update.iter().map(|u| u.path.clone()).collect::<Vec<_>>()), vec![
            "/list[val=p2]/config/value"
        ]);
        assert_eq!(n.delete.len(), 3);

        let n = diff(&original, &modified, &DiffOptions::default()).unwrap();
        assert_eq!(n.update.len(), 4);
    }

    #[test]
    fn type_mismatch() {
        let err = diff(&Root::default(), &Interfaces::default(), &DiffOptions::default())
            .unwrap_err();
        assert!(matches!(err, DiffError::TypeMismatch { .. }));
    }

    #[test]
    fn walk_errors_propagate() {
        let original = root_with_list();
        let mut modified = root_with_list();
        modified.list.insert("broken".into(), Item::default());
        let err = diff(&original, &modified, &DiffOptions::default()).unwrap_err();
        assert!(matches!(err, DiffError::Walk(_)));
    }

    #[test]
    fn applying_diff_reproduces_modified_leaves() {
        let original = populated();
        let mut modified = populated();
        modified.str_leaf = None;
        modified.color = Color::Blue;
        modified.tags.push("c".into());
        modified.list.remove("p1");
        modified.list.insert("p9".into(), Item::new("p9", Some(9)));
        if let Some(interfaces) = modified.interfaces.as_mut() {
            interfaces.interface.clear();
        }

        let root = Path::structured_root();
        let mut applied: BTreeMap<Path, LeafValue> = flatten(&original, &root).unwrap();
        for change in diff_trees(&original, &modified).unwrap().changes {
            match change {
                LeafChange::Added { path, value } | LeafChange::Modified { path, new: value, .. } => {
                    applied.insert(path, value);
                }
                LeafChange::Removed { path, .. } => {
                    applied.remove(&path);
                }
            }
        }
        assert_eq!(applied, flatten(&modified, &root).unwrap());
    }
}
