//! Guard predicates for controlling state transitions.
//!
//! Guards are pure, named predicates over a [`Context`]. They decide which of
//! several candidate rules sharing a (state, event) pair is eligible. Guards
//! fail closed: a missing role, a missing attribute, a predicate error or a
//! predicate panic all count as "not satisfied".

use super::context::Context;
use super::state::Symbol;
use serde_json::Value;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;

/// Reasons a guard could not be evaluated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GuardError {
    #[error("context carries no role")]
    MissingRole,

    #[error("context carries no attribute '{key}'")]
    MissingAttribute { key: String },

    #[error("predicate failed: {0}")]
    Predicate(String),

    #[error("predicate panicked")]
    Panicked,
}

/// Type alias for custom guard predicates.
pub type Predicate<R> = Arc<dyn Fn(&Context<R>) -> Result<bool, GuardError> + Send + Sync>;

enum GuardKind<R: Symbol> {
    Always,
    Role(R),
    AnyRole(Vec<R>),
    AttributeEquals { key: String, value: Value },
    Custom(Predicate<R>),
}

/// Pure predicate that determines if a transition rule is eligible.
///
/// A guard is a small tagged value stored inside its rule. Two guards are
/// equal when their labels are equal, which keeps rule comparison meaningful
/// even for closure-backed guards.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::{Context, Guard};
/// use parcelflow::parcel::Role;
///
/// let guard = Guard::role(Role::Postman).labeled("POSTMAN_COLLECT");
///
/// assert!(guard.evaluate(&Context::with_role(Role::Postman)));
/// assert!(!guard.evaluate(&Context::with_role(Role::Sender)));
/// // No role at all fails closed
/// assert!(!guard.evaluate(&Context::new()));
/// ```
pub struct Guard<R: Symbol> {
    label: String,
    kind: GuardKind<R>,
}

impl<R: Symbol> Guard<R> {
    /// Unconditional guard, satisfied by any context.
    pub fn always() -> Self {
        Self {
            label: "always".to_string(),
            kind: GuardKind::Always,
        }
    }

    /// Satisfied when the context's role equals `role`.
    pub fn role(role: R) -> Self {
        Self {
            label: format!("role:{}", role.name()),
            kind: GuardKind::Role(role),
        }
    }

    /// Satisfied when the context's role is one of `roles`.
    pub fn any_role(roles: impl IntoIterator<Item = R>) -> Self {
        let roles: Vec<R> = roles.into_iter().collect();
        let names: Vec<&str> = roles.iter().map(|r| r.name()).collect();
        Self {
            label: format!("any_role:{}", names.join("|")),
            kind: GuardKind::AnyRole(roles),
        }
    }

    /// Satisfied when the attribute `key` is present and equals `value`.
    pub fn attribute_equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        Self {
            label: format!("attribute:{}={}", key, value),
            kind: GuardKind::AttributeEquals { key, value },
        }
    }

    /// Guard backed by a custom predicate.
    ///
    /// The predicate must be pure and thread-safe. Returning an error, or
    /// panicking, rejects the candidate rule instead of failing the engine.
    /// A panic still passes through the process panic hook first, which by
    /// default prints the message to stderr.
    pub fn predicate<F>(label: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Context<R>) -> Result<bool, GuardError> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            kind: GuardKind::Custom(Arc::new(predicate)),
        }
    }

    /// Replace the guard's label.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Check whether this guard never rejects a context.
    pub fn is_unconditional(&self) -> bool {
        matches!(self.kind, GuardKind::Always)
    }

    /// Evaluate the guard, reporting why evaluation could not complete.
    pub fn try_evaluate(&self, context: &Context<R>) -> Result<bool, GuardError> {
        match &self.kind {
            GuardKind::Always => Ok(true),
            GuardKind::Role(role) => context
                .role()
                .map(|actual| actual == role)
                .ok_or(GuardError::MissingRole),
            GuardKind::AnyRole(roles) => context
                .role()
                .map(|actual| roles.contains(actual))
                .ok_or(GuardError::MissingRole),
            GuardKind::AttributeEquals { key, value } => context
                .get(key)
                .map(|actual| actual == value)
                .ok_or_else(|| GuardError::MissingAttribute { key: key.clone() }),
            GuardKind::Custom(predicate) => {
                catch_unwind(AssertUnwindSafe(|| predicate(context)))
                    .unwrap_or(Err(GuardError::Panicked))
            }
        }
    }

    /// Evaluate the guard, failing closed.
    pub fn evaluate(&self, context: &Context<R>) -> bool {
        self.try_evaluate(context).unwrap_or(false)
    }
}

impl<R: Symbol> Default for Guard<R> {
    fn default() -> Self {
        Self::always()
    }
}

impl<R: Symbol> Clone for Guard<R> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            GuardKind::Always => GuardKind::Always,
            GuardKind::Role(role) => GuardKind::Role(role.clone()),
            GuardKind::AnyRole(roles) => GuardKind::AnyRole(roles.clone()),
            GuardKind::AttributeEquals { key, value } => GuardKind::AttributeEquals {
                key: key.clone(),
                value: value.clone(),
            },
            GuardKind::Custom(predicate) => GuardKind::Custom(Arc::clone(predicate)),
        };
        Self {
            label: self.label.clone(),
            kind,
        }
    }
}

impl<R: Symbol> PartialEq for Guard<R> {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl<R: Symbol> Eq for Guard<R> {}

impl<R: Symbol> fmt::Debug for Guard<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guard").field(&self.label).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parcel::Role;

    #[test]
    fn always_ignores_context() {
        let guard: Guard<Role> = Guard::always();

        assert!(guard.evaluate(&Context::new()));
        assert!(guard.evaluate(&Context::with_role(Role::Auto)));
        assert!(guard.is_unconditional());
    }

    #[test]
    fn role_guard_matches_exact_role() {
        let guard = Guard::role(Role::Recipient);

        assert!(guard.evaluate(&Context::with_role(Role::Recipient)));
        assert!(!guard.evaluate(&Context::with_role(Role::Postman)));
        assert_eq!(guard.label(), "role:Recipient");
    }

    #[test]
    fn missing_role_fails_closed() {
        let guard = Guard::role(Role::Sender);

        assert_eq!(
            guard.try_evaluate(&Context::new()),
            Err(GuardError::MissingRole)
        );
        assert!(!guard.evaluate(&Context::new()));
    }

    #[test]
    fn any_role_accepts_each_listed_role() {
        let guard = Guard::any_role([Role::Transiter, Role::Driver]);

        assert!(guard.evaluate(&Context::with_role(Role::Transiter)));
        assert!(guard.evaluate(&Context::with_role(Role::Driver)));
        assert!(!guard.evaluate(&Context::with_role(Role::Sender)));
        assert_eq!(guard.label(), "any_role:Transiter|Driver");
    }

    #[test]
    fn attribute_guard_requires_present_and_equal_value() {
        let guard: Guard<Role> = Guard::attribute_equals("fragile", true);

        assert!(guard.evaluate(&Context::new().attribute("fragile", true)));
        assert!(!guard.evaluate(&Context::new().attribute("fragile", false)));
        assert_eq!(
            guard.try_evaluate(&Context::new()),
            Err(GuardError::MissingAttribute {
                key: "fragile".to_string()
            })
        );
    }

    #[test]
    fn predicate_errors_and_panics_fail_closed() {
        let failing: Guard<Role> =
            Guard::predicate("failing", |_| Err(GuardError::Predicate("boom".to_string())));
        let panicking: Guard<Role> = Guard::predicate("panicking", |_| panic!("guard bug"));

        assert!(!failing.evaluate(&Context::new()));
        assert_eq!(
            panicking.try_evaluate(&Context::new()),
            Err(GuardError::Panicked)
        );
        assert!(!panicking.evaluate(&Context::new()));
    }

    #[test]
    fn predicate_can_inspect_attributes() {
        let guard: Guard<Role> = Guard::predicate("paid_enough", |ctx| {
            let amount = ctx
                .get("amount")
                .and_then(|v| v.as_f64())
                .ok_or_else(|| GuardError::MissingAttribute {
                    key: "amount".to_string(),
                })?;
            Ok(amount >= 10.0)
        });

        assert!(guard.evaluate(&Context::new().attribute("amount", 12.5)));
        assert!(!guard.evaluate(&Context::new().attribute("amount", 3)));
        assert!(!guard.evaluate(&Context::new()));
    }

    #[test]
    fn guards_compare_by_label() {
        let a = Guard::role(Role::Postman).labeled("POSTMAN_COLLECT");
        let b = Guard::role(Role::Sender).labeled("POSTMAN_COLLECT");
        let c = Guard::role(Role::Postman).labeled("POSTMAN_DELIVERY");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn guard_is_deterministic() {
        let guard = Guard::role(Role::Postman);
        let ctx = Context::with_role(Role::Postman);

        assert_eq!(guard.evaluate(&ctx), guard.evaluate(&ctx));
    }
}
