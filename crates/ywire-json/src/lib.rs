//! JSON encoders for ywire.
//!
//! Two dialects are built on the nest-mode tree walk:
//!
//! - [`construct_ietf_json`] -- RFC 7951: keyed lists as arrays, 64-bit
//!   numbers quoted, optional `module:` qualification of keys and identities
//! - [`construct_internal_json`] -- keyed lists as objects keyed by their
//!   key, plain numbers, no module names
//!
//! [`emit_json`] renders either one as indented text.

pub mod config;
pub mod emit;
pub mod encode;
pub mod error;

pub use config::{EmitJsonConfig, JsonFormat, Rfc7951Config};
pub use emit::emit_json;
pub use encode::{construct_ietf_json, construct_internal_json, JsonMap};
pub use error::{JsonError, JsonResult};
