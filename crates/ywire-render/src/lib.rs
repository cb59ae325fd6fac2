//! Path-addressed renderer for ywire.
//!
//! [`render`] flattens a typed tree into a [`Notification`]: one [`Update`]
//! per present leaf or leaf-list, each addressed by its path relative to an
//! optional prefix. [`flatten`] exposes the intermediate path-to-value map the
//! diff engine works on.

pub mod error;
pub mod message;
pub mod render;
pub mod value;

pub use error::{RenderError, RenderResult};
pub use message::{Notification, Update};
pub use render::{flatten, render, RenderConfig};
pub use value::{encode_typed_value, LeafValue, TypedValue};
