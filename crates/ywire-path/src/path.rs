//! The dual path representation and its algebra.
//!
//! A [`Path`] is either a sequence of opaque string elements (where a keyed
//! element carries its keys inline as `name[k=v]`) or a sequence of
//! structured [`PathElem`]s holding a name and a key map. The two forms never
//! mix: every binary operation requires both operands to hold the same
//! representation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PathError, PathResult};
use crate::parse::{escape_name, format_element, parse_string_path, parse_structured_path};

/// One element of a structured path.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PathElem {
    /// Schema node name.
    pub name: String,
    /// List keys, by key name. Empty for non-list elements.
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

impl PathElem {
    /// A keyless element.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: BTreeMap::new(),
        }
    }

    /// An element carrying the given keys.
    pub fn with_keys<K, V>(name: impl Into<String>, keys: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            keys: keys
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A borrowed view of a single element, in whichever representation the
/// owning path holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element<'a> {
    String(&'a str),
    Structured(&'a PathElem),
}

/// A path through a schema-typed tree.
///
/// The root path has zero elements. `Path::default()` is the structured root.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Path {
    /// Flat string elements; keys, when present, are encoded in the element.
    Strings(Vec<String>),
    /// Structured name + key-map elements.
    Elems(Vec<PathElem>),
}

impl Default for Path {
    fn default() -> Self {
        Self::Elems(Vec::new())
    }
}

impl Path {
    /// The empty string-element path.
    pub fn string_root() -> Self {
        Self::Strings(Vec::new())
    }

    /// The empty structured path.
    pub fn structured_root() -> Self {
        Self::Elems(Vec::new())
    }

    /// Build a string-element path from already-canonical elements.
    ///
    /// Elements are stored and rendered as given, so a name containing `/`,
    /// `[`, `]`, `=` or `\\` must arrive escaped. Use [`Path::append_name`]
    /// to add raw names.
    pub fn from_strings<S: Into<String>>(elements: impl IntoIterator<Item = S>) -> Self {
        Self::Strings(elements.into_iter().map(Into::into).collect())
    }

    /// Build a structured path from elements.
    pub fn from_elems(elems: impl IntoIterator<Item = PathElem>) -> Self {
        Self::Elems(elems.into_iter().collect())
    }

    /// Parse the flat string-element form. See [`parse_string_path`].
    pub fn parse_strings(s: &str) -> PathResult<Self> {
        parse_string_path(s)
    }

    /// Parse the structured form. See [`parse_structured_path`].
    pub fn parse_structured(s: &str) -> PathResult<Self> {
        parse_structured_path(s)
    }

    /// Human-readable name of the representation, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Strings(_) => "string path",
            Self::Elems(_) => "structured path",
        }
    }

    /// Returns `true` for the structured representation.
    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Elems(_))
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Strings(s) => s.len(),
            Self::Elems(e) => e.len(),
        }
    }

    /// Returns `true` for a root (zero-element) path.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`.
    pub fn element(&self, index: usize) -> PathResult<Element<'_>> {
        let len = self.len();
        let out_of_range = PathError::IndexOutOfRange { index, len };
        match self {
            Self::Strings(s) => s.get(index).map(|e| Element::String(e.as_str())).ok_or(out_of_range),
            Self::Elems(e) => e.get(index).map(Element::Structured).ok_or(out_of_range),
        }
    }

    /// Append a keyless element named `name`. Empty names are ignored.
    ///
    /// String-element paths hold canonical text, so `name` is escaped first.
    pub fn append_name(&mut self, name: &str) {
        if name.is_empty() {
            return;
        }
        match self {
            Self::Strings(s) => s.push(escape_name(name)),
            Self::Elems(e) => e.push(PathElem::new(name)),
        }
    }

    /// A copy of this path with `name` appended.
    pub fn child(&self, name: &str) -> Self {
        let mut out = self.clone();
        out.append_name(name);
        out
    }

    /// A copy of this path whose last element carries `keys`.
    ///
    /// Used when descending into one member of a keyed list: the list's own
    /// element is already the last element, and the member's keys are
    /// attached to it. Requires the structured representation and at least
    /// one element.
    pub fn append_keyed(&self, keys: BTreeMap<String, String>) -> PathResult<Self> {
        let Self::Elems(elems) = self else {
            return Err(PathError::NotStructured(self.to_text()));
        };
        let mut elems = elems.clone();
        let last = elems.last_mut().ok_or(PathError::EmptyPath)?;
        last.keys = keys;
        Ok(Self::Elems(elems))
    }

    /// Returns `true` if `prefix` holds the same representation and matches
    /// the leading elements of this path.
    pub fn has_prefix(&self, prefix: &Path) -> bool {
        match (self, prefix) {
            (Self::Strings(p), Self::Strings(x)) => p.starts_with(x),
            (Self::Elems(p), Self::Elems(x)) => p.starts_with(x),
            _ => false,
        }
    }

    /// Remove `prefix` from the front of this path, returning the suffix.
    pub fn strip_prefix(&self, prefix: &Path) -> PathResult<Self> {
        if std::mem::discriminant(self) != std::mem::discriminant(prefix) {
            return Err(PathError::RepresentationMismatch {
                left: self.kind(),
                right: prefix.kind(),
            });
        }
        if !self.has_prefix(prefix) {
            return Err(PathError::PrefixMismatch {
                path: self.to_text(),
                prefix: prefix.to_text(),
            });
        }
        let n = prefix.len();
        Ok(match self {
            Self::Strings(s) => Self::Strings(s[n..].to_vec()),
            Self::Elems(e) => Self::Elems(e[n..].to_vec()),
        })
    }

    /// Textual form. The root path renders as `/`.
    pub fn to_text(&self) -> String {
        let parts: Vec<String> = match self {
            Self::Strings(s) => s.clone(),
            Self::Elems(e) => e.iter().map(|el| format_element(&el.name, &el.keys)).collect(),
        };
        format!("/{}", parts.join("/"))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elems(names: &[&str]) -> Path {
        Path::from_elems(names.iter().map(|n| PathElem::new(*n)))
    }

    #[test]
    fn default_is_structured_root() {
        let p = Path::default();
        assert!(p.is_structured());
        assert!(p.is_empty());
        assert_eq!(p.to_text(), "/");
    }

    #[test]
    fn append_name_ignores_empty() {
        let mut p = Path::string_root();
        p.append_name("");
        assert!(p.is_empty());
        p.append_name("interfaces");
        assert_eq!(p, Path::from_strings(["interfaces"]));
    }

    #[test]
    fn appended_string_names_are_escaped() {
        let p = Path::string_root().child("a/b").child("c[d]");
        assert_eq!(p.to_text(), r"/a\/b/c\[d\]");
        let reparsed = Path::parse_strings(&p.to_text()).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert_eq!(reparsed, p);

        let structured = Path::structured_root().child("a/b");
        assert_eq!(structured.to_text(), r"/a\/b");
    }

    #[test]
    fn element_out_of_range() {
        let p = elems(&["a"]);
        assert!(matches!(p.element(0), Ok(Element::Structured(e)) if e.name == "a"));
        assert_eq!(
            p.element(3).unwrap_err(),
            PathError::IndexOutOfRange { index: 3, len: 1 }
        );
    }

    #[test]
    fn append_keyed_sets_last_element_keys() {
        let p = elems(&["interfaces", "interface"]);
        let keyed = p
            .append_keyed(BTreeMap::from([("name".to_string(), "eth0".to_string())]))
            .unwrap();
        assert_eq!(keyed.to_text(), "/interfaces/interface[name=eth0]");
        // The source path is untouched.
        assert_eq!(p.to_text(), "/interfaces/interface");
    }

    #[test]
    fn append_keyed_rejects_string_and_empty_paths() {
        let keys = BTreeMap::from([("k".to_string(), "v".to_string())]);
        assert!(matches!(
            Path::from_strings(["a"]).append_keyed(keys.clone()),
            Err(PathError::NotStructured(_))
        ));
        assert_eq!(
            Path::structured_root().append_keyed(keys).unwrap_err(),
            PathError::EmptyPath
        );
    }

    #[test]
    fn strip_prefix_returns_suffix() {
        let p = elems(&["a", "b", "c"]);
        assert_eq!(p.strip_prefix(&elems(&["a"])).unwrap(), elems(&["b", "c"]));
        assert_eq!(p.strip_prefix(&Path::structured_root()).unwrap(), p);
        assert_eq!(p.strip_prefix(&p).unwrap(), Path::structured_root());
    }

    #[test]
    fn strip_prefix_compares_keys() {
        let p = Path::parse_structured("/list[val=p1]/leaf").unwrap();
        let other = Path::parse_structured("/list[val=p2]").unwrap();
        assert!(matches!(
            p.strip_prefix(&other),
            Err(PathError::PrefixMismatch { .. })
        ));
        let same = Path::parse_structured("/list[val=p1]").unwrap();
        assert_eq!(p.strip_prefix(&same).unwrap(), elems(&["leaf"]));
    }

    #[test]
    fn strip_prefix_rejects_mixed_representations() {
        let p = elems(&["a", "b"]);
        let err = p.strip_prefix(&Path::from_strings(["a"])).unwrap_err();
        assert!(matches!(err, PathError::RepresentationMismatch { .. }));
        assert!(!p.has_prefix(&Path::from_strings(["a"])));
    }

    #[test]
    fn strip_prefix_longer_than_path_fails() {
        let p = Path::from_strings(["a"]);
        assert!(p.strip_prefix(&Path::from_strings(["a", "b"])).is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let p = Path::parse_structured("/a[k=v]/b").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
