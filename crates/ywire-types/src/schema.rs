//! The schema boundary: per-node field descriptor tables and the erased
//! value view the tree walker consumes.
//!
//! Generated code implements [`Node`] for every container and list member
//! type (usually through [`yang_node!`](crate::yang_node)), and
//! [`KeyedNode`] for every list member type.

use std::collections::BTreeMap;
use std::fmt;

use crate::annotation::Annotation;
use crate::error::{TypeError, TypeResult};
use crate::leaf::{Leaf, ToLeaf};

/// Static metadata for one field of a node type.
///
/// Paths are schema paths relative to the owning node, `/`-separated. A
/// field can carry several paths when schema compression makes the same
/// leaf reachable in more than one place (`config/name` and `name`).
///
/// `modules` is aligned with `paths`: entry `i` names the defining module of
/// each segment of `paths[i]`, `/`-separated. A single module name applies to
/// every segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub paths: &'static [&'static str],
    pub modules: &'static [&'static str],
    pub shadow_paths: &'static [&'static str],
    pub shadow_modules: &'static [&'static str],
    /// Metadata fields are carried out-of-band, never as path updates.
    pub annotation: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, paths: &'static [&'static str]) -> Self {
        Self {
            name,
            paths,
            modules: &[],
            shadow_paths: &[],
            shadow_modules: &[],
            annotation: false,
        }
    }

    pub const fn modules(mut self, modules: &'static [&'static str]) -> Self {
        self.modules = modules;
        self
    }

    pub const fn shadow(
        mut self,
        paths: &'static [&'static str],
        modules: &'static [&'static str],
    ) -> Self {
        self.shadow_paths = paths;
        self.shadow_modules = modules;
        self
    }

    pub const fn annotation(mut self) -> Self {
        self.annotation = true;
        self
    }

    /// The module annotation for path `index` of the primary (or shadow)
    /// path set.
    pub fn module_for(&self, index: usize, shadow: bool) -> Option<&'static str> {
        let modules = if shadow {
            self.shadow_modules
        } else {
            self.modules
        };
        modules.get(index).or_else(|| modules.first()).copied()
    }
}

/// A node of the typed tree: a container or a list member.
pub trait Node: fmt::Debug {
    /// Fully qualified Rust type name, used to check that two trees share
    /// a type.
    fn type_name(&self) -> &'static str;

    /// The node type's field table.
    fn schema(&self) -> &'static [FieldDescriptor];

    /// The current value of field `index` of [`Node::schema`], or `None`
    /// when the field is unset.
    fn field_value(&self, index: usize) -> Option<Value<'_>>;
}

/// A member of a keyed list.
pub trait KeyedNode: Node {
    /// The member's key fields, in declaration order.
    fn list_key(&self) -> TypeResult<ListKey>;
}

/// The key of one keyed-list member, as ordered (name, leaf) pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListKey {
    fields: Vec<(&'static str, Leaf)>,
}

impl ListKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add key field `name`. Fails if the field is unset.
    pub fn field<T: ToLeaf + ?Sized>(mut self, name: &'static str, value: &T) -> TypeResult<Self> {
        let leaf = value.to_leaf().ok_or(TypeError::MissingKey(name))?;
        self.fields.push((name, leaf));
        Ok(self)
    }

    pub fn fields(&self) -> &[(&'static str, Leaf)] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Key name to canonical key string.
    pub fn to_key_map(&self) -> TypeResult<BTreeMap<String, String>> {
        self.fields
            .iter()
            .map(|(name, leaf)| Ok((name.to_string(), leaf.to_key_string()?)))
            .collect()
    }

    /// Canonical key strings in declaration order, joined by a space.
    pub fn to_joined_string(&self) -> TypeResult<String> {
        let parts = self
            .fields
            .iter()
            .map(|(_, leaf)| leaf.to_key_string())
            .collect::<TypeResult<Vec<_>>>()?;
        Ok(parts.join(" "))
    }
}

/// One member of a keyed list, with its key already extracted.
#[derive(Debug)]
pub struct ListMember<'a> {
    pub node: &'a dyn Node,
    pub key: TypeResult<ListKey>,
}

/// The erased value of a present field.
#[derive(Debug)]
pub enum Value<'a> {
    Leaf(Leaf),
    LeafList(Vec<Leaf>),
    Container(&'a dyn Node),
    List(Vec<ListMember<'a>>),
    /// A list of containers with no key. Paths into it cannot be formed.
    UnkeyedList(Vec<&'a dyn Node>),
    Annotations(Vec<&'a dyn Annotation>),
}

/// Implemented by the collection types generated code uses for keyed lists.
///
/// A `BTreeMap` reports an empty map as absent; an `Option<BTreeMap>`
/// holding an empty map reports a present, empty list.
pub trait KeyedMembers {
    fn members(&self) -> Option<Vec<ListMember<'_>>>;
}

fn collect_members<'a, K, V: KeyedNode>(map: &'a BTreeMap<K, V>) -> Vec<ListMember<'a>> {
    map.values()
        .map(|member| ListMember {
            node: member,
            key: member.list_key(),
        })
        .collect()
}

impl<K, V: KeyedNode> KeyedMembers for BTreeMap<K, V> {
    fn members(&self) -> Option<Vec<ListMember<'_>>> {
        (!self.is_empty()).then(|| collect_members(self))
    }
}

impl<K, V: KeyedNode> KeyedMembers for Option<BTreeMap<K, V>> {
    fn members(&self) -> Option<Vec<ListMember<'_>>> {
        self.as_ref().map(collect_members)
    }
}

/// Field accessors used by generated [`Node::field_value`] implementations,
/// one per value shape.
pub mod access {
    use super::*;

    pub fn leaf<T: ToLeaf>(value: &T) -> Option<Value<'_>> {
        value.to_leaf().map(Value::Leaf)
    }

    pub fn leaf_list<T: ToLeaf>(values: &[T]) -> Option<Value<'_>> {
        if values.is_empty() {
            return None;
        }
        Some(Value::LeafList(
            values.iter().filter_map(ToLeaf::to_leaf).collect(),
        ))
    }

    pub fn container<T: Node>(value: &Option<Box<T>>) -> Option<Value<'_>> {
        value.as_deref().map(|node| Value::Container(node))
    }

    pub fn keyed_list<L: KeyedMembers>(list: &L) -> Option<Value<'_>> {
        list.members().map(Value::List)
    }

    pub fn unkeyed_list<T: Node>(values: &[T]) -> Option<Value<'_>> {
        if values.is_empty() {
            return None;
        }
        Some(Value::UnkeyedList(
            values.iter().map(|v| v as &dyn Node).collect(),
        ))
    }

    pub fn annotations(values: &[Box<dyn Annotation>]) -> Option<Value<'_>> {
        if values.is_empty() {
            return None;
        }
        Some(Value::Annotations(
            values.iter().map(|a| a.as_ref()).collect(),
        ))
    }
}

/// Implement [`Node`] for a struct from a field table.
///
/// Each entry names the value shape (an accessor in [`access`]), the struct
/// field, and its [`FieldDescriptor`]:
///
/// ```
/// use ywire_types::{yang_node, FieldDescriptor, Node};
///
/// #[derive(Debug, Default)]
/// struct System {
///     hostname: Option<String>,
///     domains: Vec<String>,
/// }
///
/// yang_node!(System {
///     leaf hostname: FieldDescriptor::new("hostname", &["config/hostname"]),
///     leaf_list domains: FieldDescriptor::new("domains", &["config/domain"]),
/// });
///
/// let s = System { hostname: Some("r1".into()), ..Default::default() };
/// assert_eq!(s.schema().len(), 2);
/// assert!(s.field_value(0).is_some());
/// assert!(s.field_value(1).is_none());
/// ```
#[macro_export]
macro_rules! yang_node {
    ($ty:ident { $( $kind:ident $field:ident : $desc:expr ),* $(,)? }) => {
        impl $crate::Node for $ty {
            fn type_name(&self) -> &'static str {
                ::std::any::type_name::<Self>()
            }

            fn schema(&self) -> &'static [$crate::FieldDescriptor] {
                static FIELDS: &[$crate::FieldDescriptor] = &[ $( $desc ),* ];
                FIELDS
            }

            #[allow(unused_assignments, unused_mut, unused_variables)]
            fn field_value(&self, index: usize) -> ::std::option::Option<$crate::Value<'_>> {
                let mut i = 0usize;
                $(
                    if index == i {
                        return $crate::access::$kind(&self.$field);
                    }
                    i += 1;
                )*
                ::std::option::Option::None
            }
        }
    };
}
