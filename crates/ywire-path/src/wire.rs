//! Wire form of a path, as carried in protocol messages.
//!
//! A wire path has two slots, one per representation. A valid wire path
//! populates at most one of them; the empty path is represented by the
//! absence of a wire path altogether.

use serde::{Deserialize, Serialize};

use crate::error::{PathError, PathResult};
use crate::path::{Path, PathElem};

/// Protocol-level path message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePath {
    /// Flat string elements.
    #[serde(default)]
    pub element: Vec<String>,
    /// Structured elements.
    #[serde(default)]
    pub elem: Vec<PathElem>,
}

impl Path {
    /// The wire form of this path, or `None` for the root path.
    pub fn to_wire(&self) -> Option<WirePath> {
        if self.is_empty() {
            return None;
        }
        Some(match self {
            Self::Strings(s) => WirePath {
                element: s.clone(),
                elem: Vec::new(),
            },
            Self::Elems(e) => WirePath {
                element: Vec::new(),
                elem: e.clone(),
            },
        })
    }

    /// Rebuild a path from its wire form.
    ///
    /// A wire path populating both slots is rejected. A wire path populating
    /// neither is the structured root.
    pub fn from_wire(wire: &WirePath) -> PathResult<Self> {
        match (wire.element.is_empty(), wire.elem.is_empty()) {
            (false, false) => Err(PathError::InvalidWirePath(format!(
                "both element ({}) and elem ({}) are populated",
                wire.element.len(),
                wire.elem.len()
            ))),
            (false, true) => Ok(Self::Strings(wire.element.clone())),
            (true, false) => Ok(Self::Elems(wire.elem.clone())),
            (true, true) => Ok(Self::structured_root()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_no_wire_form() {
        assert!(Path::structured_root().to_wire().is_none());
        assert!(Path::string_root().to_wire().is_none());
    }

    #[test]
    fn one_empty_element_is_not_root() {
        let p = Path::from_strings([""]);
        assert_eq!(p.len(), 1);
        assert_eq!(
            p.to_wire(),
            Some(WirePath {
                element: vec![String::new()],
                elem: vec![],
            })
        );
    }

    #[test]
    fn wire_roundtrip_keeps_representation() {
        let s = Path::parse_strings("/a[k=v]/b").unwrap();
        let e = Path::parse_structured("/a[k=v]/b").unwrap();
        assert_eq!(Path::from_wire(&s.to_wire().unwrap()).unwrap(), s);
        assert_eq!(Path::from_wire(&e.to_wire().unwrap()).unwrap(), e);
        assert_eq!(e.to_wire().unwrap().elem[0].keys["k"], "v");
    }

    #[test]
    fn dual_populated_wire_path_rejected() {
        let wire = WirePath {
            element: vec!["a".into()],
            elem: vec![PathElem::new("a")],
        };
        assert!(matches!(
            Path::from_wire(&wire),
            Err(PathError::InvalidWirePath(_))
        ));
    }
}
