//! Result-returning property operations
//!
//! These report a rejected change as `false` instead of an error; a refused
//! definition is an expected outcome the caller branches on.

use super::{PlainObject, PropertyDescriptor};
use crate::value::Value;

/// Define or redefine `key` on `target`
///
/// Returns `false`, with `target` unchanged, when the property is
/// non-configurable and `desc` would alter it, or when `key` is new and
/// `target` is not extensible.
pub fn define_property(target: &mut PlainObject, key: &str, desc: PropertyDescriptor) -> bool {
    target.define_own_property(key, desc)
}

pub fn get(target: &PlainObject, key: &str) -> Value {
    target.get(key)
}

/// Remove `key`; `false` when the property is non-configurable
pub fn delete_property(target: &mut PlainObject, key: &str) -> bool {
    target.delete(key)
}

pub fn own_keys(target: &PlainObject) -> Vec<String> {
    target.keys().into_iter().map(str::to_string).collect()
}

pub fn prevent_extensions(target: &mut PlainObject) -> bool {
    target.prevent_extensions();
    true
}
