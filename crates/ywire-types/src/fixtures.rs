//! A small schema shared by the tests of the downstream crates.
//!
//! The root module is `test`. `interfaces` comes from `oc-if`, one leaf is
//! augmented into the root's `config` container from `test-aug`, and list
//! member leaves use compressed `config/x|x` paths.

use std::collections::BTreeMap;

use crate::annotation::Annotation;
use crate::error::TypeResult;
use crate::leaf::Empty;
use crate::schema::{FieldDescriptor, KeyedNode, ListKey};
use crate::{yang_enum, yang_node, yang_union};

yang_enum! {
    pub enum Color: Enumeration {
        Red = 1 => ("RED", "test"),
        Blue = 2 => ("BLUE", "test"),
    }
}

yang_enum! {
    pub enum Level: Identity {
        Low = 1 => ("low", "test-types"),
        High = 2 => ("high", "test-types"),
    }
}

yang_enum! {
    pub enum IfType: Identity {
        Ethernet = 1 => ("ethernetCsmacd", "iana-if-type"),
        Loopback = 2 => ("softwareLoopback", "iana-if-type"),
    }
}

yang_union! {
    pub enum Threshold {
        Percent(u8),
        Named(Level),
    }
}

yang_union! {
    pub enum Number {
        Small(i8),
        Medium(u16),
        Large(i32),
        Colour(Color),
    }
}

#[derive(Debug, Default)]
pub struct Root {
    pub str_leaf: Option<String>,
    pub counter: Option<i64>,
    pub ratio: Option<f64>,
    pub flag: Empty,
    pub blob: Option<Vec<u8>>,
    pub color: Color,
    pub threshold: Option<Threshold>,
    pub numbers: Vec<Number>,
    pub tags: Vec<String>,
    pub augmented: Option<String>,
    pub list: BTreeMap<String, Item>,
    pub pairs: BTreeMap<(String, u32), Pair>,
    pub interfaces: Option<Box<Interfaces>>,
    pub legacy: Vec<LegacyEntry>,
    pub annotations: Vec<Box<dyn Annotation>>,
}

yang_node!(Root {
    leaf str_leaf: FieldDescriptor::new("str_leaf", &["str"]).modules(&["test"]),
    leaf counter: FieldDescriptor::new("counter", &["counter"]).modules(&["test"]),
    leaf ratio: FieldDescriptor::new("ratio", &["ratio"]).modules(&["test"]),
    leaf flag: FieldDescriptor::new("flag", &["flag"]).modules(&["test"]),
    leaf blob: FieldDescriptor::new("blob", &["blob"]).modules(&["test"]),
    leaf color: FieldDescriptor::new("color", &["color"]).modules(&["test"]),
    leaf threshold: FieldDescriptor::new("threshold", &["threshold"]).modules(&["test"]),
    leaf_list numbers: FieldDescriptor::new("numbers", &["numbers"]).modules(&["test"]),
    leaf_list tags: FieldDescriptor::new("tags", &["tags"]).modules(&["test"]),
    leaf augmented: FieldDescriptor::new("augmented", &["config/augmented"]).modules(&["test/test-aug"]),
    keyed_list list: FieldDescriptor::new("list", &["list"]).modules(&["test"]),
    keyed_list pairs: FieldDescriptor::new("pairs", &["pair"]).modules(&["test"]),
    container interfaces: FieldDescriptor::new("interfaces", &["interfaces"]).modules(&["oc-if"]),
    unkeyed_list legacy: FieldDescriptor::new("legacy", &["legacy"]).modules(&["test"]),
    annotations annotations: FieldDescriptor::new("annotations", &["@"]).annotation(),
});

/// Member of `list`, keyed by `val`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Item {
    pub val: Option<String>,
    pub value: Option<u32>,
}

yang_node!(Item {
    leaf val: FieldDescriptor::new("val", &["config/val", "val"]).modules(&["test/test", "test"]),
    leaf value: FieldDescriptor::new("value", &["config/value"])
        .modules(&["test/test"])
        .shadow(&["state/value"], &["test/test"]),
});

impl KeyedNode for Item {
    fn list_key(&self) -> TypeResult<ListKey> {
        ListKey::new().field("val", &self.val)
    }
}

impl Item {
    pub fn new(val: &str, value: Option<u32>) -> Self {
        Self {
            val: Some(val.to_string()),
            value,
        }
    }
}

/// Member of `pair`, keyed by (`name`, `index`).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Pair {
    pub name: Option<String>,
    pub index: Option<u32>,
    pub note: Option<String>,
}

yang_node!(Pair {
    leaf name: FieldDescriptor::new("name", &["name"]).modules(&["test"]),
    leaf index: FieldDescriptor::new("index", &["index"]).modules(&["test"]),
    leaf note: FieldDescriptor::new("note", &["note"]).modules(&["test"]),
});

impl KeyedNode for Pair {
    fn list_key(&self) -> TypeResult<ListKey> {
        ListKey::new()
            .field("name", &self.name)?
            .field("index", &self.index)
    }
}

#[derive(Debug, Default)]
pub struct Interfaces {
    pub interface: BTreeMap<String, Interface>,
}

yang_node!(Interfaces {
    keyed_list interface: FieldDescriptor::new("interface", &["interface"]).modules(&["oc-if"]),
});

#[derive(Debug, Default)]
pub struct Interface {
    pub name: Option<String>,
    pub mtu: Option<u16>,
    pub if_type: IfType,
    pub description: Option<String>,
    pub description_meta: Vec<Box<dyn Annotation>>,
}

yang_node!(Interface {
    leaf name: FieldDescriptor::new("name", &["config/name", "name"]).modules(&["oc-if/oc-if", "oc-if"]),
    leaf mtu: FieldDescriptor::new("mtu", &["config/mtu"]).modules(&["oc-if/oc-if"]),
    leaf if_type: FieldDescriptor::new("if_type", &["config/type"]).modules(&["oc-if/oc-if"]),
    leaf description: FieldDescriptor::new("description", &["config/description"]).modules(&["oc-if/oc-if"]),
    annotations description_meta: FieldDescriptor::new("description_meta", &["config/@description"]).annotation(),
});

impl KeyedNode for Interface {
    fn list_key(&self) -> TypeResult<ListKey> {
        ListKey::new().field("name", &self.name)
    }
}

impl Interface {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Default::default()
        }
    }
}

/// A list with no key. Paths into it cannot be formed.
#[derive(Debug, Default)]
pub struct LegacyEntry {
    pub text: Option<String>,
}

yang_node!(LegacyEntry {
    leaf text: FieldDescriptor::new("text", &["text"]).modules(&["test"]),
});

/// A root with `list` members `p1` and `p2`.
pub fn root_with_list() -> Root {
    let mut root = Root::default();
    for (val, value) in [("p1", 1), ("p2", 2)] {
        root.list.insert(val.to_string(), Item::new(val, Some(value)));
    }
    root
}
