//! Textual path grammar: `/elem1/elem2[key=value][key2=value2]/elem3`.
//!
//! - The leading `/` is optional; empty elements are ignored.
//! - `\` escapes `/`, `[`, `]`, `=`, `\` and space in any segment.
//! - A `/` inside a bracketed key value does not split elements.
//! - Unescaped spaces are rejected in element names and key names, but are
//!   allowed in key values.

use std::collections::BTreeMap;

use crate::error::{PathError, PathResult};
use crate::path::{Path, PathElem};

const SPECIAL: &[char] = &['\\', '/', '[', ']', '='];

/// Parse `s` into a string-element path.
///
/// Keyed elements keep their keys inline, re-rendered canonically (keys
/// sorted by name, special characters escaped), so that textual variants of
/// the same element compare equal.
pub fn parse_string_path(s: &str) -> PathResult<Path> {
    let elements = split_elements(s)
        .into_iter()
        .map(|raw| {
            let (name, keys) = extract_keys(raw)?;
            Ok(format_element(&name, &keys))
        })
        .collect::<PathResult<Vec<_>>>()?;
    Ok(Path::Strings(elements))
}

/// Parse `s` into a structured path, decomposing every `[k=v]` group of an
/// element into its key map.
pub fn parse_structured_path(s: &str) -> PathResult<Path> {
    let elems = split_elements(s)
        .into_iter()
        .map(|raw| {
            let (name, keys) = extract_keys(raw)?;
            Ok(PathElem { name, keys })
        })
        .collect::<PathResult<Vec<_>>>()?;
    Ok(Path::Elems(elems))
}

/// Escape an element or key name.
pub fn escape_name(name: &str) -> String {
    escape(name, true)
}

/// Escape a key value. Spaces are legal in values and left as-is.
pub fn escape_value(value: &str) -> String {
    escape(value, false)
}

fn escape(s: &str, escape_space: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if SPECIAL.contains(&ch) || (escape_space && ch == ' ') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Render one element in canonical textual form.
pub(crate) fn format_element(name: &str, keys: &BTreeMap<String, String>) -> String {
    let mut out = escape_name(name);
    for (k, v) in keys {
        out.push('[');
        out.push_str(&escape_name(k));
        out.push('=');
        out.push_str(&escape_value(v));
        out.push(']');
    }
    out
}

/// Split on `/` that is neither escaped nor inside brackets.
fn split_elements(s: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut escaped = false;
    let mut in_brackets = false;
    let mut begin = 0;

    for (i, ch) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '[' if !in_brackets => in_brackets = true,
            ']' if in_brackets => in_brackets = false,
            '/' if !in_brackets => {
                if i > begin {
                    out.push(&s[begin..i]);
                }
                begin = i + 1;
            }
            _ => {}
        }
    }
    if s.len() > begin {
        out.push(&s[begin..]);
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Name,
    Key,
    Value,
}

/// Decompose one raw element into its unescaped name and key map.
fn extract_keys(raw: &str) -> PathResult<(String, BTreeMap<String, String>)> {
    let mut name = String::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut keys = BTreeMap::new();
    let mut state = State::Name;
    let mut escaped = false;

    // Errors name the element by its name when one has been read.
    let label = |name: &str| {
        if name.is_empty() {
            raw.to_string()
        } else {
            name.to_string()
        }
    };

    for ch in raw.chars() {
        if escaped {
            escaped = false;
            match state {
                State::Name => name.push(ch),
                State::Key => key.push(ch),
                State::Value => value.push(ch),
            }
            continue;
        }
        match (ch, state) {
            ('\\', _) => escaped = true,
            ('[', State::Name) => state = State::Key,
            ('[', State::Key) => {
                return Err(PathError::syntax(label(&name), "unescaped '[' in key name"));
            }
            (']', State::Name) => {
                return Err(PathError::syntax(label(&name), "unescaped ']' outside of a key"));
            }
            (']', State::Key) => {
                return Err(PathError::syntax(
                    label(&name),
                    format!("missing '=' in key {key:?}"),
                ));
            }
            (']', State::Value) => {
                if name.is_empty() {
                    return Err(PathError::syntax(raw, "key without an element name"));
                }
                if key.is_empty() {
                    return Err(PathError::syntax(label(&name), "empty key name"));
                }
                if value.is_empty() {
                    return Err(PathError::syntax(
                        label(&name),
                        format!("empty value for key {key:?}"),
                    ));
                }
                keys.insert(std::mem::take(&mut key), std::mem::take(&mut value));
                state = State::Name;
            }
            ('=', State::Key) => state = State::Value,
            (' ', State::Name) => {
                return Err(PathError::syntax(label(&name), "unescaped space in element name"));
            }
            (' ', State::Key) => {
                return Err(PathError::syntax(
                    label(&name),
                    format!("unescaped space in key name {key:?}"),
                ));
            }
            (_, State::Name) => {
                if !keys.is_empty() {
                    return Err(PathError::syntax(
                        label(&name),
                        format!("unexpected {ch:?} after key"),
                    ));
                }
                name.push(ch);
            }
            (_, State::Key) => key.push(ch),
            (_, State::Value) => value.push(ch),
        }
    }

    if escaped {
        return Err(PathError::syntax(label(&name), "trailing escape character"));
    }
    if state != State::Name {
        return Err(PathError::syntax(label(&name), "unmatched '['"));
    }
    if name.is_empty() {
        return Err(PathError::syntax(raw, "empty element name"));
    }
    Ok((name, keys))
}
