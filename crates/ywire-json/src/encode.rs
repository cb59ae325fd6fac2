//! Building JSON documents from a typed tree.
//!
//! Both dialects walk the tree in nest mode: every node becomes one JSON
//! object, built by its own walk. A field's schema path is split into
//! segments and the value is inserted under the nested keys those segments
//! name, so `config/mtu` lands in a `config` object shared with the field's
//! siblings.
//!
//! In the RFC 7951 dialect with module names appended, each segment is
//! compared with the module of the segment before it (the enclosing node's
//! module for the first segment) and qualified as `module:segment` where the
//! two differ. A field whose module annotation has fewer entries than its
//! path has segments repeats the first entry for the leading segments.

use std::cmp::Ordering;
use std::iter;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value as JsonValue};
use tracing::debug;
use ywire_path::Path;
use ywire_types::{Annotation, EnumKind, Leaf, ListMember, Node, Scalar, TypeError, TypeResult};
use ywire_walk::{walk, FieldContext, Visitor, WalkMode, WalkOptions};

use crate::config::Rfc7951Config;
use crate::error::{JsonError, JsonResult};

/// A JSON object.
pub type JsonMap = Map<String, JsonValue>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Dialect {
    Ietf,
    Internal,
}

/// Build the RFC 7951 document for `node`.
///
/// Keyed lists become arrays of member objects ordered by key string, 64-bit
/// integers and floats are quoted, and an `empty` leaf is `[null]`.
pub fn construct_ietf_json(node: &dyn Node, config: &Rfc7951Config) -> JsonResult<JsonMap> {
    let encoder = Encoder {
        dialect: Dialect::Ietf,
        config,
    };
    let doc = encoder.encode_node(node, None)?;
    debug!(node = node.type_name(), dialect = "ietf", keys = doc.len(), "encoded json");
    Ok(doc)
}

/// Build the internal document for `node`.
///
/// Keyed lists become objects keyed by the member's key (composite keys
/// space-joined in declaration order) and module names never appear.
pub fn construct_internal_json(node: &dyn Node) -> JsonResult<JsonMap> {
    let config = Rfc7951Config::default();
    let encoder = Encoder {
        dialect: Dialect::Internal,
        config: &config,
    };
    let doc = encoder.encode_node(node, None)?;
    debug!(node = node.type_name(), dialect = "internal", keys = doc.len(), "encoded json");
    Ok(doc)
}

struct Encoder<'c> {
    dialect: Dialect,
    config: &'c Rfc7951Config,
}

impl Encoder<'_> {
    fn ietf(&self) -> bool {
        self.dialect == Dialect::Ietf
    }

    fn encode_node(&self, node: &dyn Node, parent_module: Option<&str>) -> JsonResult<JsonMap> {
        let options = WalkOptions {
            mode: WalkMode::Nest,
            prefer_shadow_paths: self.ietf() && self.config.prefer_shadow_path,
        };
        let mut builder = Builder {
            encoder: self,
            parent_module: parent_module.map(str::to_string),
            doc: JsonMap::new(),
        };
        walk(node, &Path::string_root(), &options, &mut builder)?;
        Ok(builder.doc)
    }

    /// `None` when the list is to be left out of its parent.
    fn encode_list(
        &self,
        members: &[ListMember<'_>],
        module: Option<&str>,
    ) -> JsonResult<Option<JsonValue>> {
        let mut encoded = Vec::with_capacity(members.len());
        for member in members {
            let key = member.key.clone()?;
            if key.is_empty() {
                return Err(TypeError::EmptyKey(member.node.type_name()).into());
            }
            encoded.push((key.to_joined_string()?, self.encode_node(member.node, module)?));
        }

        match self.dialect {
            Dialect::Ietf => {
                encoded.sort_by(|a, b| a.0.cmp(&b.0));
                let items = encoded.into_iter().map(|(_, doc)| JsonValue::Object(doc));
                Ok(Some(JsonValue::Array(items.collect())))
            }
            Dialect::Internal if encoded.is_empty() => Ok(None),
            Dialect::Internal => {
                let items = encoded
                    .into_iter()
                    .map(|(key, doc)| (key, JsonValue::Object(doc)));
                Ok(Some(JsonValue::Object(items.collect())))
            }
        }
    }

    /// The module of each segment of the field's path, after rewriting.
    /// Empty when the field carries no module annotation.
    fn segment_modules(&self, field: &FieldContext, segments: usize) -> Vec<String> {
        let Some(annotation) = field.module().filter(|m| !m.is_empty()) else {
            return Vec::new();
        };
        let modules: Vec<&str> = annotation.split('/').collect();
        let aligned: Vec<&str> = match modules.len().cmp(&segments) {
            Ordering::Equal => modules,
            Ordering::Greater => modules[modules.len() - segments..].to_vec(),
            Ordering::Less => iter::repeat(modules[0])
                .take(segments - modules.len())
                .chain(modules)
                .collect(),
        };
        aligned
            .into_iter()
            .map(|m| self.config.module_name(m).to_string())
            .collect()
    }

    /// The document keys a field's value nests under, and the module of the
    /// innermost one.
    fn field_keys(
        &self,
        field: &FieldContext,
        parent_module: Option<&str>,
    ) -> (Vec<String>, Option<String>) {
        let segments: Vec<&str> = field
            .schema_path()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        let modules = self.segment_modules(field, segments.len());
        let qualify = self.ietf() && self.config.append_module_name;

        let mut keys = Vec::with_capacity(segments.len());
        let mut previous = parent_module.map(str::to_string);
        for (i, segment) in segments.iter().enumerate() {
            // The `@name` key must stay a sibling of the leaf it annotates.
            let annotation_key = field.descriptor.annotation && i + 1 == segments.len();
            let module = modules.get(i).cloned().or_else(|| previous.clone());
            let key = match &module {
                Some(m) if qualify && !annotation_key && previous.as_ref() != Some(m) => {
                    format!("{m}:{segment}")
                }
                _ => segment.to_string(),
            };
            keys.push(key);
            previous = module;
        }
        (keys, previous)
    }

    fn leaf_value(&self, leaf: &Leaf, path: &Path) -> JsonResult<JsonValue> {
        match leaf {
            Leaf::Scalar(s) => self.scalar_value(s, path),
            Leaf::Union(selected) => self.leaf_value(selected, path),
            Leaf::Enum(e) => {
                let entry = e.entry()?;
                let qualify = self.ietf()
                    && e.kind == EnumKind::Identity
                    && (self.config.append_module_name
                        || self.config.prepend_module_name_identityref);
                Ok(if qualify {
                    let module = self.config.module_name(entry.module);
                    JsonValue::String(format!("{module}:{}", entry.name))
                } else {
                    JsonValue::String(entry.name.to_string())
                })
            }
        }
    }

    fn scalar_value(&self, scalar: &Scalar, path: &Path) -> JsonResult<JsonValue> {
        let ietf = self.ietf();
        Ok(match scalar {
            Scalar::String(v) => JsonValue::String(v.clone()),
            Scalar::Bool(v) => JsonValue::Bool(*v),
            Scalar::Empty if ietf => JsonValue::Array(vec![JsonValue::Null]),
            Scalar::Empty => JsonValue::Bool(true),
            Scalar::Int8(v) => JsonValue::from(*v),
            Scalar::Int16(v) => JsonValue::from(*v),
            Scalar::Int32(v) => JsonValue::from(*v),
            Scalar::Int64(v) if ietf => JsonValue::String(v.to_string()),
            Scalar::Int64(v) => JsonValue::from(*v),
            Scalar::Uint8(v) => JsonValue::from(*v),
            Scalar::Uint16(v) => JsonValue::from(*v),
            Scalar::Uint32(v) => JsonValue::from(*v),
            Scalar::Uint64(v) if ietf => JsonValue::String(v.to_string()),
            Scalar::Uint64(v) => JsonValue::from(*v),
            Scalar::Float32(v) if ietf => JsonValue::String(v.to_string()),
            Scalar::Float32(v) => number(f64::from(*v), path)?,
            Scalar::Float64(v) if ietf => JsonValue::String(v.to_string()),
            Scalar::Float64(v) => number(*v, path)?,
            Scalar::Binary(b) => JsonValue::String(STANDARD.encode(b)),
        })
    }
}

fn number(v: f64, path: &Path) -> JsonResult<JsonValue> {
    serde_json::Number::from_f64(v)
        .map(JsonValue::Number)
        .ok_or_else(|| JsonError::NonFiniteFloat {
            path: path.to_text(),
        })
}

struct Builder<'e, 'c> {
    encoder: &'e Encoder<'c>,
    parent_module: Option<String>,
    doc: JsonMap,
}

impl Builder<'_, '_> {
    fn keys(&self, field: &FieldContext) -> (Vec<String>, Option<String>) {
        self.encoder
            .field_keys(field, self.parent_module.as_deref())
    }
}

impl Visitor for Builder<'_, '_> {
    type Error = JsonError;

    fn leaf(&mut self, field: &FieldContext, path: &Path, leaf: &Leaf) -> JsonResult<()> {
        let value = self.encoder.leaf_value(leaf, path)?;
        let (keys, _) = self.keys(field);
        insert(&mut self.doc, &keys, value, path)
    }

    fn leaf_list(&mut self, field: &FieldContext, path: &Path, leaves: &[Leaf]) -> JsonResult<()> {
        let values = leaves
            .iter()
            .map(|leaf| self.encoder.leaf_value(leaf, path))
            .collect::<JsonResult<Vec<_>>>()?;
        let (keys, _) = self.keys(field);
        insert(&mut self.doc, &keys, JsonValue::Array(values), path)
    }

    fn container(&mut self, field: &FieldContext, path: &Path, node: &dyn Node) -> JsonResult<()> {
        let (keys, module) = self.keys(field);
        let child = self.encoder.encode_node(node, module.as_deref())?;
        if child.is_empty() {
            return Ok(());
        }
        insert(&mut self.doc, &keys, JsonValue::Object(child), path)
    }

    fn list(
        &mut self,
        field: &FieldContext,
        path: &Path,
        members: &[ListMember<'_>],
    ) -> JsonResult<()> {
        let (keys, module) = self.keys(field);
        match self.encoder.encode_list(members, module.as_deref())? {
            Some(value) => insert(&mut self.doc, &keys, value, path),
            None => Ok(()),
        }
    }

    fn annotations(
        &mut self,
        field: &FieldContext,
        path: &Path,
        values: &[&dyn Annotation],
    ) -> JsonResult<()> {
        let marshaled = values
            .iter()
            .map(|a| a.marshal())
            .collect::<TypeResult<Vec<_>>>()?;
        let (keys, _) = self.keys(field);
        insert(&mut self.doc, &keys, JsonValue::Array(marshaled), path)
    }
}

/// Insert `value` under the nested `keys`, creating intermediate objects and
/// merging into objects already present.
fn insert(doc: &mut JsonMap, keys: &[String], value: JsonValue, path: &Path) -> JsonResult<()> {
    let Some((last, parents)) = keys.split_last() else {
        return Ok(());
    };
    let mut target = doc;
    for key in parents {
        let slot = target
            .entry(key.clone())
            .or_insert_with(|| JsonValue::Object(JsonMap::new()));
        target = match slot {
            JsonValue::Object(map) => map,
            _ => return Err(conflict(path, key)),
        };
    }
    match target.get_mut(last) {
        Some(existing) => merge(existing, value, path, last),
        None => {
            target.insert(last.clone(), value);
            Ok(())
        }
    }
}

fn merge(existing: &mut JsonValue, value: JsonValue, path: &Path, key: &str) -> JsonResult<()> {
    match (existing, value) {
        (JsonValue::Object(into), JsonValue::Object(from)) => {
            for (k, v) in from {
                match into.get_mut(&k) {
                    Some(slot) => merge(slot, v, path, &k)?,
                    None => {
                        into.insert(k, v);
                    }
                }
            }
            Ok(())
        }
        (existing, value) if *existing == value => Ok(()),
        _ => Err(conflict(path, key)),
    }
}

fn conflict(path: &Path, key: &str) -> JsonError {
    JsonError::Conflict {
        path: path.to_text(),
        key: key.to_string(),
    }
}
