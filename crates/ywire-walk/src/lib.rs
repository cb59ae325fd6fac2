//! Tree walker for ywire.
//!
//! [`walk`] is the one traversal every encoder builds on. It resolves each
//! field's schema paths against a parent [`Path`](ywire_path::Path) and
//! hands the field's value to a [`Visitor`]. Visitors choose their own error
//! type, which only has to absorb [`WalkError`] and fold sibling failures
//! together ([`Aggregate`]).

pub mod error;
pub mod walker;

pub use error::{finish, Aggregate, WalkError, WalkResult};
pub use walker::{
    member_path, resolve_path, walk, FieldContext, Visitor, WalkMode, WalkOptions,
};
