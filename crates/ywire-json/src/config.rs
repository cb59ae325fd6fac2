use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Options for the RFC 7951 dialect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rfc7951Config {
    /// Qualify a key with `module:` wherever its module differs from the
    /// enclosing node's. Identity values are qualified too.
    pub append_module_name: bool,
    /// Module names substituted before any comparison or qualification.
    pub rewrite_module_names: BTreeMap<String, String>,
    /// Qualify identity values even when `append_module_name` is off.
    pub prepend_module_name_identityref: bool,
    /// Emit fields at their shadow paths when they have any.
    pub prefer_shadow_path: bool,
}

impl Rfc7951Config {
    /// Fully module-qualified output, as sent on the wire.
    pub fn qualified() -> Self {
        Self {
            append_module_name: true,
            ..Default::default()
        }
    }

    /// The name `module` is emitted under.
    pub fn module_name<'a>(&'a self, module: &'a str) -> &'a str {
        self.rewrite_module_names
            .get(module)
            .map(String::as_str)
            .unwrap_or(module)
    }
}

/// The two JSON dialects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// RFC 7951, for interoperation.
    Ietf,
    /// Lists as objects keyed by their key, numbers unquoted, no module names.
    #[default]
    Internal,
}

/// Options for [`emit_json`](crate::emit_json).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitJsonConfig {
    pub format: JsonFormat,
    /// Indentation unit for pretty printing.
    pub indent: String,
    /// Only consulted for [`JsonFormat::Ietf`].
    pub rfc7951: Rfc7951Config,
}

impl Default for EmitJsonConfig {
    fn default() -> Self {
        Self {
            format: JsonFormat::Internal,
            indent: "  ".to_string(),
            rfc7951: Rfc7951Config::default(),
        }
    }
}

impl EmitJsonConfig {
    pub fn ietf(rfc7951: Rfc7951Config) -> Self {
        Self {
            format: JsonFormat::Ietf,
            rfc7951,
            ..Default::default()
        }
    }
}
