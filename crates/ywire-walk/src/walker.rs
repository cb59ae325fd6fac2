//! The depth-first traversal shared by the renderer and the JSON encoders.
//!
//! For each field of a node the walker resolves every declared schema path
//! against the parent path and dispatches on the field's value shape. In
//! [`WalkMode::Flatten`] it recurses into containers and keyed-list members
//! itself, so the visitor only ever sees leaves. In [`WalkMode::Nest`] it
//! stays on one level and hands containers and lists to the visitor, which
//! builds a nested document by walking each child on its own.
//!
//! Fields with no value are skipped silently. The failures of sibling
//! fields are collected and reported together.

use tracing::trace;
use ywire_path::Path;
use ywire_types::{Annotation, FieldDescriptor, Leaf, ListMember, Node, TypeError, Value};

use crate::error::{finish, Aggregate, WalkError};

/// Whether the walker recurses (flatten) or stays on one level (nest).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WalkMode {
    #[default]
    Flatten,
    Nest,
}

/// Walk parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkOptions {
    pub mode: WalkMode,
    /// Use a field's shadow paths instead of its primary paths when it has
    /// any.
    pub prefer_shadow_paths: bool,
}

impl WalkOptions {
    pub fn flatten() -> Self {
        Self::default()
    }

    pub fn nest() -> Self {
        Self {
            mode: WalkMode::Nest,
            ..Self::default()
        }
    }
}

/// The field being visited, and which of its declared paths.
#[derive(Clone, Copy, Debug)]
pub struct FieldContext {
    pub descriptor: &'static FieldDescriptor,
    /// The node type that owns the field.
    pub node: &'static str,
    /// Index into the primary or shadow path set.
    pub path_index: usize,
    pub shadow: bool,
    /// The owning node's full field table.
    pub siblings: &'static [FieldDescriptor],
}

impl FieldContext {
    /// The schema path being visited, relative to the owning node.
    pub fn schema_path(&self) -> &'static str {
        let paths = if self.shadow {
            self.descriptor.shadow_paths
        } else {
            self.descriptor.paths
        };
        paths[self.path_index]
    }

    /// The module annotation of the schema path being visited.
    ///
    /// An annotation field without one of its own takes the module of the
    /// field it annotates: the sibling whose path is the annotation's path
    /// with the `@` removed from its last segment.
    pub fn module(&self) -> Option<&'static str> {
        self.descriptor
            .module_for(self.path_index, self.shadow)
            .or_else(|| self.annotated_module())
    }

    fn annotated_module(&self) -> Option<&'static str> {
        if !self.descriptor.annotation {
            return None;
        }
        let path = self.schema_path();
        let target = match path.rsplit_once('/') {
            Some((parent, last)) => format!("{parent}/{}", last.strip_prefix('@')?),
            None => path.strip_prefix('@')?.to_string(),
        };
        if target.is_empty() || target.ends_with('/') {
            return None;
        }
        self.siblings
            .iter()
            .filter(|d| !d.annotation)
            .find_map(|d| {
                let paths = if self.shadow { d.shadow_paths } else { d.paths };
                let index = paths.iter().position(|p| *p == target)?;
                d.module_for(index, self.shadow)
            })
    }
}

/// Callbacks invoked by [`walk`], one per value shape.
///
/// `path` is the field's resolved path: the parent path passed to [`walk`]
/// with the schema path's segments appended.
pub trait Visitor {
    type Error: From<WalkError> + Aggregate;

    fn leaf(&mut self, field: &FieldContext, path: &Path, leaf: &Leaf) -> Result<(), Self::Error>;

    fn leaf_list(
        &mut self,
        field: &FieldContext,
        path: &Path,
        leaves: &[Leaf],
    ) -> Result<(), Self::Error>;

    /// Called in nest mode only.
    fn container(
        &mut self,
        _field: &FieldContext,
        _path: &Path,
        _node: &dyn Node,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called in nest mode only.
    fn list(
        &mut self,
        _field: &FieldContext,
        _path: &Path,
        _members: &[ListMember<'_>],
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called in nest mode only; annotations are never path-addressed.
    fn annotations(
        &mut self,
        _field: &FieldContext,
        _path: &Path,
        _values: &[&dyn Annotation],
    ) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk `node`, whose own path is `parent`.
pub fn walk<V: Visitor>(
    node: &dyn Node,
    parent: &Path,
    options: &WalkOptions,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let mut errors = Vec::new();
    for (index, descriptor) in node.schema().iter().enumerate() {
        if let Err(e) = walk_field(node, index, descriptor, parent, options, visitor) {
            errors.push(e);
        }
    }
    finish(errors)
}

fn walk_field<V: Visitor>(
    node: &dyn Node,
    index: usize,
    descriptor: &'static FieldDescriptor,
    parent: &Path,
    options: &WalkOptions,
    visitor: &mut V,
) -> Result<(), V::Error> {
    if descriptor.paths.is_empty() {
        return Err(WalkError::MissingPathAnnotation {
            node: node.type_name(),
            field: descriptor.name,
        }
        .into());
    }
    let Some(value) = node.field_value(index) else {
        return Ok(());
    };

    let shadow = options.prefer_shadow_paths && !descriptor.shadow_paths.is_empty();
    let schema_paths = if shadow {
        descriptor.shadow_paths
    } else {
        descriptor.paths
    };

    for (path_index, schema_path) in schema_paths.iter().enumerate() {
        if schema_path.is_empty() {
            continue;
        }
        let path = resolve_path(parent, schema_path);
        let field = FieldContext {
            descriptor,
            node: node.type_name(),
            path_index,
            shadow,
            siblings: node.schema(),
        };
        trace!(node = field.node, field = descriptor.name, path = %path, "visiting field");
        dispatch(&field, &path, &value, options, visitor)?;
    }
    Ok(())
}

fn dispatch<V: Visitor>(
    field: &FieldContext,
    path: &Path,
    value: &Value<'_>,
    options: &WalkOptions,
    visitor: &mut V,
) -> Result<(), V::Error> {
    let nest = options.mode == WalkMode::Nest;
    match value {
        Value::Leaf(leaf) if leaf.is_unset() => Ok(()),
        Value::Leaf(leaf) => visitor.leaf(field, path, leaf),
        Value::LeafList(leaves) => visitor.leaf_list(field, path, leaves),
        Value::Container(child) if nest => visitor.container(field, path, *child),
        Value::Container(child) => walk(*child, path, options, visitor),
        Value::List(members) if nest => visitor.list(field, path, members),
        Value::List(members) => {
            for member in members {
                let child_path = member_path(path, member)?;
                walk(member.node, &child_path, options, visitor)?;
            }
            Ok(())
        }
        Value::UnkeyedList(_) => Err(WalkError::UnsupportedShape {
            node: field.node,
            field: field.descriptor.name,
        }
        .into()),
        Value::Annotations(values) if nest => visitor.annotations(field, path, values),
        Value::Annotations(_) => Ok(()),
    }
}

/// Append each `/`-separated segment of `schema_path` to `parent`.
pub fn resolve_path(parent: &Path, schema_path: &str) -> Path {
    let mut path = parent.clone();
    for segment in schema_path.split('/') {
        path.append_name(segment);
    }
    path
}

/// The path of one keyed-list member: the list's path with the member's
/// keys attached to its last element.
pub fn member_path(list_path: &Path, member: &ListMember<'_>) -> Result<Path, WalkError> {
    let key = member.key.clone()?;
    if key.is_empty() {
        return Err(TypeError::EmptyKey(member.node.type_name()).into());
    }
    Ok(list_path.append_keyed(key.to_key_map()?)?)
}
