//! Fire-time context passed alongside an event.

use super::state::Symbol;
use serde_json::Value;
use std::collections::HashMap;

/// Data accompanying an event for the duration of one `fire` call.
///
/// A context carries the acting role, which may be absent, and an arbitrary
/// attribute bag for guards that look beyond the role.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::Context;
/// use parcelflow::parcel::Role;
///
/// let ctx = Context::with_role(Role::Sender).attribute("amount", 12);
/// assert_eq!(ctx.role(), Some(&Role::Sender));
/// assert_eq!(ctx.get("amount"), Some(&serde_json::json!(12)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Context<R: Symbol> {
    role: Option<R>,
    attributes: HashMap<String, Value>,
}

impl<R: Symbol> Context<R> {
    /// Create a context with no role and no attributes.
    pub fn new() -> Self {
        Self {
            role: None,
            attributes: HashMap::new(),
        }
    }

    /// Create a context acting as `role`.
    pub fn with_role(role: R) -> Self {
        Self {
            role: Some(role),
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute, replacing any previous value under `key`.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn role(&self) -> Option<&R> {
        self.role.as_ref()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &HashMap<String, Value> {
        &self.attributes
    }
}

impl<R: Symbol> Default for Context<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Symbol> From<R> for Context<R> {
    fn from(role: R) -> Self {
        Self::with_role(role)
    }
}
