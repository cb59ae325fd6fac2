use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use ywire_types::Node;

use crate::config::{EmitJsonConfig, JsonFormat};
use crate::encode::{construct_ietf_json, construct_internal_json};
use crate::error::{JsonError, JsonResult};

/// Encode `node` as indented JSON text with keys in sorted order.
pub fn emit_json(node: &dyn Node, config: &EmitJsonConfig) -> JsonResult<String> {
    let doc = match config.format {
        JsonFormat::Ietf => construct_ietf_json(node, &config.rfc7951)?,
        JsonFormat::Internal => construct_internal_json(node)?,
    };

    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(config.indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut serializer)
        .map_err(|e| JsonError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| JsonError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use ywire_types::fixtures::{root_with_list, Root};

    use super::*;
    use crate::config::Rfc7951Config;

    #[test]
    fn internal_text() {
        let root = Root {
            str_leaf: Some("hello".into()),
            counter: Some(7),
            ..Default::default()
        };
        let text = emit_json(&root, &EmitJsonConfig::default()).unwrap();
        assert_eq!(text, "{\n  \"counter\": 7,\n  \"str\": \"hello\"\n}");
    }

    #[test]
    fn ietf_text_with_custom_indent() {
        let root = Root {
            counter: Some(7),
            ..Default::default()
        };
        let config = EmitJsonConfig {
            indent: "\t".into(),
            ..EmitJsonConfig::ietf(Rfc7951Config::qualified())
        };
        let text = emit_json(&root, &config).unwrap();
        assert_eq!(text, "{\n\t\"test:counter\": \"7\"\n}");
    }

    #[test]
    fn empty_tree() {
        let text = emit_json(&Root::default(), &EmitJsonConfig::default()).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn output_parses_back() {
        let text = emit_json(&root_with_list(), &EmitJsonConfig::ietf(Rfc7951Config::default())).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["list"][1]["config"]["value"], serde_json::json!(2));
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: EmitJsonConfig =
            serde_json::from_str(r#"{"format": "ietf", "rfc7951": {"append_module_name": true}}"#).unwrap();
        assert_eq!(config.format, JsonFormat::Ietf);
        assert_eq!(config.indent, "  ");
        assert!(config.rfc7951.append_module_name);
        assert!(config.rfc7951.rewrite_module_names.is_empty());
    }
}
