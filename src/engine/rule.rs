//! Transition rules.

use crate::core::{Context, Guard, State, Symbol};
use crate::engine::hooks::Hook;
use std::fmt;
use std::sync::Arc;

/// A guarded transition from one state to another on an event.
///
/// Several rules may share the same (from, event) pair; the engine picks the
/// first one, by priority, whose guard admits the fire-time context.
pub struct TransitionRule<S: State, E: Symbol, R: Symbol> {
    pub from: S,
    pub event: E,
    pub to: S,
    pub guard: Guard<R>,
    pub action: Option<Hook<S, E, R>>,
    priority: usize,
}

impl<S: State, E: Symbol, R: Symbol> TransitionRule<S, E, R> {
    /// Create an unregistered rule. Its priority is assigned on registration.
    pub fn new(from: S, event: E, to: S, guard: Guard<R>) -> Self {
        Self {
            from,
            event,
            to,
            guard,
            action: None,
            priority: 0,
        }
    }

    /// Registration index within its table. Lower wins ties.
    pub fn priority(&self) -> usize {
        self.priority
    }

    pub(crate) fn set_priority(&mut self, priority: usize) {
        self.priority = priority;
    }

    /// Check if this rule applies to `current` under `context` (pure)
    pub fn can_fire(&self, current: &S, event: &E, context: &Context<R>) -> bool {
        if *current != self.from || *event != self.event {
            return false;
        }
        self.guard.evaluate(context)
    }
}

impl<S: State, E: Symbol, R: Symbol> Clone for TransitionRule<S, E, R> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            to: self.to.clone(),
            guard: self.guard.clone(),
            action: self.action.as_ref().map(Arc::clone),
            priority: self.priority,
        }
    }
}

impl<S: State, E: Symbol, R: Symbol> fmt::Debug for TransitionRule<S, E, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionRule")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("guard", &self.guard)
            .field("priority", &self.priority)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}
