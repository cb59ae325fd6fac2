//! Path model for ywire.
//!
//! Paths address nodes of a schema-typed tree in one of two representations:
//!
//! - [`Path::Strings`] -- flat string elements, keys encoded inline as
//!   `name[key=value]`
//! - [`Path::Elems`] -- structured [`PathElem`]s with a name and a key map
//!
//! The textual grammar (`/a/b[k=v]/c`, with `\` escapes) is handled by
//! [`parse_string_path`] and [`parse_structured_path`]; [`WirePath`] is the
//! protocol-message form.

pub mod error;
pub mod parse;
pub mod path;
pub mod wire;

pub use error::{PathError, PathResult};
pub use parse::{escape_name, escape_value, parse_string_path, parse_structured_path};
pub use path::{Element, Path, PathElem};
pub use wire::WirePath;
