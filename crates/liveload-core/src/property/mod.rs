//! Property definition with two failure-reporting contracts
//!
//! [`reflect::define_property`] answers `false` when a non-configurable
//! property would be altered; [`legacy::define_property`] raises a
//! [`PropertyError::TypeError`] for the same precondition. Both leave the
//! target unchanged on failure.

mod descriptor;
pub mod legacy;
mod object;
pub mod reflect;

pub use descriptor::{Property, PropertyDescriptor};
pub use object::PlainObject;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    #[error("TypeError: {0}")]
    TypeError(String),
}
