//! Flattening a tree into path-addressed updates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ywire_path::Path;
use ywire_types::{Leaf, Node, TypeResult};
use ywire_walk::{walk, FieldContext, Visitor, WalkError, WalkOptions, WalkResult};

use crate::error::RenderResult;
use crate::message::{Notification, Update};
use crate::value::{encode_typed_value, LeafValue};

/// Renderer settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Build structured paths when no prefix is given. A prefix's own
    /// representation always wins.
    pub use_path_elem: bool,
    /// Root the walk here and report update paths relative to it.
    pub prefix: Option<Path>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_path_elem: true,
            prefix: None,
        }
    }
}

impl RenderConfig {
    /// Render with string-element paths.
    pub fn string_paths() -> Self {
        Self {
            use_path_elem: false,
            ..Self::default()
        }
    }

    pub fn with_prefix(prefix: Path) -> Self {
        Self {
            prefix: Some(prefix),
            ..Self::default()
        }
    }

    fn root(&self) -> Path {
        match &self.prefix {
            Some(prefix) => prefix.clone(),
            None if self.use_path_elem => Path::structured_root(),
            None => Path::string_root(),
        }
    }
}

#[derive(Default)]
struct Collector {
    leaves: BTreeMap<Path, LeafValue>,
}

impl Visitor for Collector {
    type Error = WalkError;

    fn leaf(&mut self, _: &FieldContext, path: &Path, leaf: &Leaf) -> WalkResult<()> {
        self.leaves.insert(path.clone(), LeafValue::Scalar(leaf.resolve()?));
        Ok(())
    }

    fn leaf_list(&mut self, _: &FieldContext, path: &Path, leaves: &[Leaf]) -> WalkResult<()> {
        let items = leaves.iter().map(Leaf::resolve).collect::<TypeResult<Vec<_>>>()?;
        self.leaves.insert(path.clone(), LeafValue::List(items));
        Ok(())
    }
}

/// Every present leaf and leaf-list of `node`, by absolute path.
///
/// Paths are rooted at `root`. Fields reachable through several schema paths
/// appear once per path.
pub fn flatten(node: &dyn Node, root: &Path) -> WalkResult<BTreeMap<Path, LeafValue>> {
    let mut collector = Collector::default();
    walk(node, root, &WalkOptions::flatten(), &mut collector)?;
    Ok(collector.leaves)
}

/// Render `node` into a notification of updates, sorted by path.
pub fn render(node: &dyn Node, timestamp: i64, config: &RenderConfig) -> RenderResult<Notification> {
    let root = config.root();
    let leaves = flatten(node, &root)?;

    let mut update = Vec::with_capacity(leaves.len());
    for (path, value) in &leaves {
        let relative = path.strip_prefix(&root)?;
        update.push(Update {
            path: relative.to_wire().unwrap_or_default(),
            val: encode_typed_value(value),
        });
    }
    debug!(node = node.type_name(), updates = update.len(), prefix = %root, "rendered tree");

    Ok(Notification {
        timestamp,
        prefix: config.prefix.as_ref().and_then(Path::to_wire),
        update,
        delete: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use ywire_path::{PathElem, WirePath};
    use ywire_types::fixtures::{root_with_list, Color, Interface, Interfaces, Number, Root};
    use ywire_types::{Empty, Scalar};

    use super::*;
    use crate::error::RenderError;
    use crate::value::TypedValue;

    fn find<'a>(n: &'a Notification, text: &str) -> Option<&'a TypedValue> {
        n.update.iter().find_map(|u| {
            let path = Path::from_wire(&u.path).ok()?;
            (path.to_text() == text).then_some(&u.val)
        })
    }

    #[test]
    fn empty_tree_renders_nothing() {
        let n = render(&Root::default(), 42, &RenderConfig::default()).unwrap();
        assert_eq!(n.timestamp, 42);
        assert!(n.is_empty());
        assert!(n.prefix.is_none());
    }

    #[test]
    fn scalar_leaves() {
        let root = Root {
            str_leaf: Some("cabernet-sauvignon".into()),
            counter: Some(-9),
            flag: Empty(true),
            blob: Some(vec![0xde, 0xad]),
            color: Color::Red,
            ..Default::default()
        };
        let n = render(&root, 0, &RenderConfig::default()).unwrap();
        assert_eq!(n.update.len(), 5);
        assert_eq!(find(&n, "/str"), Some(&TypedValue::String("cabernet-sauvignon".into())));
        assert_eq!(find(&n, "/counter"), Some(&TypedValue::Int(-9)));
        assert_eq!(find(&n, "/flag"), Some(&TypedValue::Bool(true)));
        assert_eq!(find(&n, "/blob"), Some(&TypedValue::Bytes(vec![0xde, 0xad])));
        assert_eq!(find(&n, "/color"), Some(&TypedValue::String("RED".into())));
        assert_eq!(
            n.update[0].path,
            WirePath {
                element: vec![],
                elem: vec![PathElem::new("blob")],
            }
        );
    }

    #[test]
    fn leaf_list_is_one_update() {
        let root = Root {
            numbers: vec![Number::Small(-1), Number::Medium(300), Number::Colour(Color::Blue)],
            ..Default::default()
        };
        let n = render(&root, 0, &RenderConfig::default()).unwrap();
        assert_eq!(n.update.len(), 1);
        assert_eq!(
            find(&n, "/numbers"),
            Some(&TypedValue::LeafList(vec![
                TypedValue::Int(-1),
                TypedValue::Uint(300),
                TypedValue::String("BLUE".into()),
            ]))
        );
    }

    #[test]
    fn list_members_are_keyed() {
        let n = render(&root_with_list(), 0, &RenderConfig::default()).unwrap();
        assert_eq!(n.update.len(), 6);
        assert_eq!(find(&n, "/list[val=p2]/config/value"), Some(&TypedValue::Uint(2)));
        assert_eq!(find(&n, "/list[val=p1]/val"), Some(&TypedValue::String("p1".into())));
        let paths: Vec<_> = n.update.iter().map(|u| u.path.clone()).collect();
        let mut sorted = paths.clone();
        sorted.sort_by_key(|p| Path::from_wire(p).unwrap());
        assert_eq!(paths, sorted);
    }

    #[test]
    fn string_paths_render_scalars() {
        let root = Root {
            augmented: Some("x".into()),
            ..Default::default()
        };
        let n = render(&root, 0, &RenderConfig::string_paths()).unwrap();
        assert_eq!(n.update[0].path.element, vec!["config", "augmented"]);
        assert!(n.update[0].path.elem.is_empty());
    }

    #[test]
    fn prefix_is_stripped_from_updates() {
        let mut interfaces = Interfaces::default();
        let mut eth0 = Interface::new("eth0");
        eth0.mtu = Some(9000);
        interfaces.interface.insert("eth0".into(), eth0);

        let prefix = Path::parse_structured("/interfaces").unwrap();
        let n = render(&interfaces, 0, &RenderConfig::with_prefix(prefix.clone())).unwrap();
        assert_eq!(n.prefix, prefix.to_wire());
        assert_eq!(find(&n, "/interface[name=eth0]/config/mtu"), Some(&TypedValue::Uint(9000)));
        assert_eq!(find(&n, "/interface[name=eth0]/name"), Some(&TypedValue::String("eth0".into())));
    }

    #[test]
    fn walk_errors_abort_render() {
        let mut root = root_with_list();
        root.list.get_mut("p1").unwrap().val = None;
        let err = render(&root, 0, &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, RenderError::Walk(_)));
    }

    #[test]
    fn flatten_keeps_resolved_scalars() {
        let root = Root {
            ratio: Some(0.25),
            ..Default::default()
        };
        let leaves = flatten(&root, &Path::structured_root()).unwrap();
        let path = Path::parse_structured("/ratio").unwrap();
        assert_eq!(leaves[&path], LeafValue::Scalar(Scalar::Float64(0.25)));
    }
}
