//! The dispatcher: resolves `fire` calls against a frozen configuration.

use crate::builder::validation::{validate, violations};
use crate::builder::ConfigurationError;
use crate::core::{Context, State, StateTransition, Symbol};
use crate::engine::error::{FireError, HookError, HookPhase};
use crate::engine::hooks::{invoke, HookRegistry, TransitionSnapshot};
use crate::engine::instance::{FsmInstance, TransitionOutcome};
use crate::engine::table::TransitionTable;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

struct Definition<S: State, E: Symbol, R: Symbol> {
    id: Uuid,
    table: TransitionTable<S, E, R>,
    hooks: HookRegistry<S, E, R>,
    initial: Option<S>,
}

/// A frozen state machine configuration that drives any number of instances.
///
/// `Machine` is a cheap handle around shared, read-only data: clone it freely
/// and hand it to other threads or tasks. All mutable state lives in the
/// [`FsmInstance`]s it creates.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::Context;
/// use parcelflow::parcel::{self, ParcelEvent, ParcelState, Role};
///
/// let machine = parcel::machine().unwrap();
/// let mut parcel = machine.start().unwrap();
///
/// let outcome = machine
///     .fire(&mut parcel, ParcelEvent::Collect, &Context::with_role(Role::Postman))
///     .unwrap();
///
/// assert_eq!(outcome.to, ParcelState::Collected);
/// assert_eq!(parcel.current_state(), &ParcelState::Collected);
/// ```
pub struct Machine<S: State, E: Symbol, R: Symbol> {
    inner: Arc<Definition<S, E, R>>,
}

impl<S: State, E: Symbol, R: Symbol> Machine<S, E, R> {
    /// Assemble a machine from a table and hook registry.
    ///
    /// The table is validated here and every violation is returned at once.
    /// Neither part is frozen here; instances can only be created once both
    /// are. [`MachineBuilder::build`](crate::builder::MachineBuilder::build)
    /// freezes before calling this.
    pub fn from_parts(
        table: TransitionTable<S, E, R>,
        hooks: HookRegistry<S, E, R>,
        initial: Option<S>,
    ) -> Result<Self, ConfigurationError> {
        let found = violations(validate(&table, initial.as_ref()));
        if !found.is_empty() {
            return Err(ConfigurationError::Invalid(found));
        }

        Ok(Self {
            inner: Arc::new(Definition {
                id: Uuid::new_v4(),
                table,
                hooks,
                initial,
            }),
        })
    }

    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    pub fn table(&self) -> &TransitionTable<S, E, R> {
        &self.inner.table
    }

    pub fn hooks(&self) -> &HookRegistry<S, E, R> {
        &self.inner.hooks
    }

    pub fn initial_state(&self) -> Option<&S> {
        self.inner.initial.as_ref()
    }

    /// Create an instance positioned at `initial`.
    pub fn new_instance(&self, initial: S) -> Result<FsmInstance<S, E>, ConfigurationError> {
        if !self.inner.table.is_frozen() || !self.inner.hooks.is_frozen() {
            return Err(ConfigurationError::NotFrozen);
        }
        if !self.inner.table.is_declared(&initial) {
            return Err(ConfigurationError::UnknownState {
                state: initial.name().to_string(),
            });
        }
        Ok(FsmInstance::new(self.inner.id, initial))
    }

    /// Create an instance positioned at the configured initial state.
    pub fn start(&self) -> Result<FsmInstance<S, E>, ConfigurationError> {
        let initial = self
            .inner
            .initial
            .clone()
            .ok_or(ConfigurationError::MissingInitialState)?;
        self.new_instance(initial)
    }

    /// Like [`start`](Self::start), but also runs the initial state's entry
    /// hooks with `context`.
    ///
    /// If an entry hook fails the instance is dropped and the failure is
    /// returned. Use [`start`](Self::start) followed by
    /// [`enter`](Self::enter) to keep the instance regardless.
    pub fn start_with(&self, context: &Context<R>) -> Result<FsmInstance<S, E>, FireError> {
        let instance = self.start()?;
        self.enter(&instance, context)?;
        Ok(instance)
    }

    /// Run the entry hooks of `instance`'s current state without an event.
    ///
    /// Hooks see `from == to` and `event == None`. Nothing is recorded in
    /// the instance's history.
    pub fn enter(
        &self,
        instance: &FsmInstance<S, E>,
        context: &Context<R>,
    ) -> Result<(), FireError> {
        self.ensure_owned(instance)?;
        let snapshot = TransitionSnapshot {
            from: instance.current_state().clone(),
            to: instance.current_state().clone(),
            event: None,
            context: context.clone(),
        };
        self.inner
            .hooks
            .run_entry(&snapshot)
            .map_err(|source| hook_failure(HookPhase::Entry, &snapshot, source))
    }

    /// Check whether `event` would be accepted in `state` under `context` (pure)
    pub fn can_fire(&self, state: &S, event: &E, context: &Context<R>) -> bool {
        self.inner
            .table
            .lookup(state, event)
            .iter()
            .any(|rule| rule.guard.evaluate(context))
    }

    /// Fire `event` on `instance`.
    ///
    /// Candidates for (current state, event) are tried in priority order and
    /// the first whose guard admits `context` wins. On success the instance
    /// moves to the rule's target and hooks run in order: exit, the rule's
    /// action, transition hooks, entry. A failing hook is reported as
    /// [`FireError::HookExecution`]; the state change is kept.
    pub fn fire(
        &self,
        instance: &mut FsmInstance<S, E>,
        event: E,
        context: &Context<R>,
    ) -> Result<TransitionOutcome<S, E>, FireError> {
        self.ensure_owned(instance)?;

        let current = instance.current_state().clone();
        let candidates = self.inner.table.lookup(&current, &event);
        if candidates.is_empty() {
            return Err(FireError::NoApplicableTransition {
                state: current.name().to_string(),
                event: event.name().to_string(),
                reason: "no rule registered for this state and event".to_string(),
            });
        }

        let Some(rule) = candidates.iter().find(|rule| rule.guard.evaluate(context)) else {
            let labels: Vec<&str> = candidates.iter().map(|rule| rule.guard.label()).collect();
            return Err(FireError::NoApplicableTransition {
                state: current.name().to_string(),
                event: event.name().to_string(),
                reason: format!(
                    "{} candidate rule(s) rejected by guards [{}]",
                    candidates.len(),
                    labels.join(", ")
                ),
            });
        };

        let outcome = TransitionOutcome {
            from: current.clone(),
            to: rule.to.clone(),
            event: event.clone(),
            priority: rule.priority(),
            guard: rule.guard.label().to_string(),
        };

        let snapshot = TransitionSnapshot {
            from: current,
            to: rule.to.clone(),
            event: Some(event),
            context: context.clone(),
        };

        let exited = self.inner.hooks.run_exit(&snapshot);
        instance.commit(StateTransition {
            from: outcome.from.clone(),
            to: outcome.to.clone(),
            event: outcome.event.clone(),
            guard: outcome.guard.clone(),
            timestamp: Utc::now(),
        });
        exited.map_err(|source| hook_failure(HookPhase::Exit, &snapshot, source))?;

        if let Some(action) = &rule.action {
            invoke(action, &snapshot)
                .map_err(|source| hook_failure(HookPhase::Transition, &snapshot, source))?;
        }
        self.inner
            .hooks
            .run_transition(&snapshot)
            .map_err(|source| hook_failure(HookPhase::Transition, &snapshot, source))?;
        self.inner
            .hooks
            .run_entry(&snapshot)
            .map_err(|source| hook_failure(HookPhase::Entry, &snapshot, source))?;

        Ok(outcome)
    }

    fn ensure_owned(&self, instance: &FsmInstance<S, E>) -> Result<(), ConfigurationError> {
        if instance.machine_id() == self.inner.id {
            Ok(())
        } else {
            Err(ConfigurationError::ForeignInstance {
                instance: instance.id().to_string(),
            })
        }
    }
}

impl<S: State, E: Symbol, R: Symbol> Clone for Machine<S, E, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

fn hook_failure<S: State, E: Symbol, R: Symbol>(
    phase: HookPhase,
    snapshot: &TransitionSnapshot<S, E, R>,
    source: HookError,
) -> FireError {
    FireError::HookExecution {
        phase,
        from: snapshot.from.name().to_string(),
        to: snapshot.to.name().to_string(),
        event: snapshot
            .event
            .as_ref()
            .map_or("<start>", Symbol::name)
            .to_string(),
        source,
    }
}
