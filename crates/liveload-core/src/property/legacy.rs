//! Throwing property definition
//!
//! Same preconditions as [`reflect::define_property`], but a refused change
//! surfaces as a `TypeError` instead of a boolean.
//!
//! [`reflect::define_property`]: super::reflect::define_property

use super::{PlainObject, PropertyDescriptor, PropertyError};

pub fn define_property(
    target: &mut PlainObject,
    key: &str,
    desc: PropertyDescriptor,
) -> Result<(), PropertyError> {
    let existed = target.has_own_property(key);
    if target.define_own_property(key, desc) {
        return Ok(());
    }
    if existed {
        Err(PropertyError::TypeError(format!(
            "Cannot redefine property: {}",
            key
        )))
    } else {
        Err(PropertyError::TypeError(format!(
            "Cannot define property {}, object is not extensible",
            key
        )))
    }
}
