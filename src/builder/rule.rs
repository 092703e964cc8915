//! Builder for constructing transition rules.

use crate::builder::error::ConfigurationError;
use crate::core::{Guard, State, Symbol};
use crate::engine::{Hook, HookError, TransitionRule, TransitionSnapshot};
use std::sync::Arc;

/// Builder for constructing transition rules with a fluent API.
///
/// # Example
///
/// ```rust
/// use parcelflow::builder::RuleBuilder;
/// use parcelflow::core::Guard;
/// use parcelflow::parcel::{ParcelEvent, ParcelState, Role};
///
/// let rule = RuleBuilder::new()
///     .from(ParcelState::Paying)
///     .on(ParcelEvent::Pay)
///     .to(ParcelState::Paid)
///     .when_role(Role::Sender)
///     .build()
///     .unwrap();
///
/// assert_eq!(rule.guard, Guard::role(Role::Sender));
/// ```
pub struct RuleBuilder<S: State, E: Symbol, R: Symbol> {
    from: Option<S>,
    event: Option<E>,
    to: Option<S>,
    guard: Option<Guard<R>>,
    action: Option<Hook<S, E, R>>,
}

impl<S: State, E: Symbol, R: Symbol> RuleBuilder<S, E, R> {
    pub fn new() -> Self {
        Self {
            from: None,
            event: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: S) -> Self {
        self.from = Some(state);
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: E) -> Self {
        self.event = Some(event);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: S) -> Self {
        self.to = Some(state);
        self
    }

    /// Add a guard (optional). Without one the rule is unconditional.
    pub fn when(mut self, guard: Guard<R>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Require the acting role to be `role`.
    pub fn when_role(self, role: R) -> Self {
        self.when(Guard::role(role))
    }

    /// Attach an action run when this rule wins (optional).
    pub fn perform<F>(mut self, action: F) -> Self
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.action = Some(Arc::new(action));
        self
    }

    /// Build the rule.
    pub fn build(self) -> Result<TransitionRule<S, E, R>, ConfigurationError> {
        let from = self.from.ok_or(ConfigurationError::MissingFromState)?;
        let event = self.event.ok_or(ConfigurationError::MissingEvent)?;
        let to = self.to.ok_or(ConfigurationError::MissingToState)?;

        let mut rule = TransitionRule::new(from, event, to, self.guard.unwrap_or_default());
        rule.action = self.action;
        Ok(rule)
    }
}

impl<S: State, E: Symbol, R: Symbol> Default for RuleBuilder<S, E, R> {
    fn default() -> Self {
        Self::new()
    }
}
