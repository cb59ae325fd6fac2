//! Out-of-band metadata attached to tree nodes.
//!
//! Annotations are never addressed by a path update. The JSON encoder emits
//! them under `@`-prefixed sibling keys as whatever JSON their own
//! serialization produces.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{TypeError, TypeResult};

/// A metadata value that can be marshaled to JSON.
pub trait Annotation: fmt::Debug {
    fn marshal(&self) -> TypeResult<serde_json::Value>;
}

impl<T: Serialize + fmt::Debug> Annotation for T {
    fn marshal(&self) -> TypeResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| TypeError::Annotation(e.to_string()))
    }
}

/// Rebuild a typed annotation from its marshaled form.
pub fn unmarshal_annotation<T: DeserializeOwned>(value: &serde_json::Value) -> TypeResult<T> {
    T::deserialize(value).map_err(|e| TypeError::Annotation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Owner {
        team: String,
        since: u32,
    }

    #[test]
    fn marshal_roundtrip() {
        let a = Owner {
            team: "netops".into(),
            since: 2021,
        };
        let json = a.marshal().unwrap();
        assert_eq!(json, serde_json::json!({"team": "netops", "since": 2021}));
        let back: Owner = unmarshal_annotation(&json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn non_string_map_keys_fail_to_marshal() {
        let bad: BTreeMap<Vec<u8>, u8> = BTreeMap::from([(vec![1, 2], 3)]);
        assert!(matches!(bad.marshal(), Err(TypeError::Annotation(_))));
    }

    #[test]
    fn unmarshal_type_mismatch() {
        let json = serde_json::json!({"team": 7});
        assert!(unmarshal_annotation::<Owner>(&json).is_err());
    }
}
