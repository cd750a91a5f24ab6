//! Trap-based object proxy
//!
//! A [`Proxy`] forwards property operations on its target through a
//! [`ProxyHandler`]. Each trap defaults to the matching [`reflect`]
//! operation, so a handler only overrides what it intercepts.

use tracing::debug;

use crate::property::{reflect, PlainObject, PropertyDescriptor, PropertyError};
use crate::value::Value;

pub trait ProxyHandler {
    fn get(&self, target: &PlainObject, key: &str) -> Value {
        reflect::get(target, key)
    }

    fn define_property(
        &self,
        target: &mut PlainObject,
        key: &str,
        desc: PropertyDescriptor,
    ) -> bool {
        reflect::define_property(target, key, desc)
    }
}

/// Handler with no traps
#[derive(Debug, Default, Clone, Copy)]
pub struct ForwardingHandler;

impl ProxyHandler for ForwardingHandler {}

pub struct Proxy<H> {
    target: PlainObject,
    handler: H,
}

impl<H: ProxyHandler> Proxy<H> {
    pub fn new(target: PlainObject, handler: H) -> Self {
        Self { target, handler }
    }

    pub fn target(&self) -> &PlainObject {
        &self.target
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn into_target(self) -> PlainObject {
        self.target
    }

    pub fn get(&self, key: &str) -> Value {
        debug!("proxy get '{}'", key);
        self.handler.get(&self.target, key)
    }

    /// Boolean outcome of the `define_property` trap
    pub fn define_property(&mut self, key: &str, desc: PropertyDescriptor) -> bool {
        debug!("proxy defineProperty '{}'", key);
        self.handler.define_property(&mut self.target, key, desc)
    }

    /// Like [`Proxy::define_property`], but a `false` trap result is an error
    pub fn define_property_or_throw(
        &mut self,
        key: &str,
        desc: PropertyDescriptor,
    ) -> Result<(), PropertyError> {
        if self.define_property(key, desc) {
            Ok(())
        } else {
            Err(PropertyError::TypeError(format!(
                "'defineProperty' on proxy: trap returned falsish for property '{}'",
                key
            )))
        }
    }
}
