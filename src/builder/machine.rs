//! Builder for constructing state machines.

use crate::builder::error::ConfigurationError;
use crate::builder::rule::RuleBuilder;
use crate::core::{Guard, State, Symbol};
use crate::engine::{
    HookError, HookRegistry, Machine, TransitionRule, TransitionSnapshot, TransitionTable,
};

/// Builder for constructing state machines with a fluent API.
///
/// Rules are kept in the order they are added; that order becomes their
/// priority. `build` validates the configuration, freezes the table and hook
/// registry and returns a shareable [`Machine`].
///
/// # Example
///
/// ```rust
/// use parcelflow::builder::MachineBuilder;
/// use parcelflow::core::{Context, Guard};
/// use parcelflow::parcel::{ParcelEvent, ParcelState, Role};
///
/// let machine = MachineBuilder::new()
///     .initial(ParcelState::Pending)
///     .transition(
///         ParcelState::Pending,
///         ParcelEvent::Cancel,
///         ParcelState::Cancelled,
///         Guard::role(Role::Sender),
///     )
///     .transition(
///         ParcelState::Cancelled,
///         ParcelEvent::Auto,
///         ParcelState::Completed,
///         Guard::always(),
///     )
///     .build()
///     .unwrap();
///
/// let mut parcel = machine.start().unwrap();
/// machine
///     .fire(&mut parcel, ParcelEvent::Cancel, &Context::with_role(Role::Sender))
///     .unwrap();
/// assert_eq!(parcel.current_state(), &ParcelState::Cancelled);
/// ```
pub struct MachineBuilder<S: State, E: Symbol, R: Symbol> {
    initial: Option<S>,
    states: Vec<S>,
    rules: Vec<TransitionRule<S, E, R>>,
    hooks: HookRegistry<S, E, R>,
}

impl<S: State, E: Symbol, R: Symbol> MachineBuilder<S, E, R> {
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            rules: Vec::new(),
            hooks: HookRegistry::new(),
        }
    }

    /// Set the initial state used by [`Machine::start`].
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Declare a state that no rule mentions.
    pub fn state(mut self, state: S) -> Self {
        self.states.push(state);
        self
    }

    /// Declare several states at once.
    pub fn states(mut self, states: impl IntoIterator<Item = S>) -> Self {
        self.states.extend(states);
        self
    }

    /// Add a rule using a builder.
    /// Returns an error if the builder fails validation.
    pub fn rule(mut self, builder: RuleBuilder<S, E, R>) -> Result<Self, ConfigurationError> {
        self.rules.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built rule.
    pub fn add_rule(mut self, rule: TransitionRule<S, E, R>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Add a guarded `from --event--> to` rule.
    pub fn transition(self, from: S, event: E, to: S, guard: Guard<R>) -> Self {
        self.add_rule(TransitionRule::new(from, event, to, guard))
    }

    pub fn on_entry<F>(mut self, state: S, action: F) -> Self
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.add_entry(state, action);
        self
    }

    pub fn on_exit<F>(mut self, state: S, action: F) -> Self
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.add_exit(state, action);
        self
    }

    pub fn on_transition<F>(mut self, from: S, event: E, to: S, action: F) -> Self
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.add_transition(from, event, to, action);
        self
    }

    pub fn on_any_entry<F>(mut self, action: F) -> Self
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.add_any_entry(action);
        self
    }

    pub fn on_any_transition<F>(mut self, action: F) -> Self
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.hooks.add_any_transition(action);
        self
    }

    /// Validate, freeze and build the machine.
    /// Returns every configuration violation at once.
    pub fn build(self) -> Result<Machine<S, E, R>, ConfigurationError> {
        let mut table = TransitionTable::new();
        for state in self.states {
            table.declare(state)?;
        }
        for rule in self.rules {
            table.register(rule)?;
        }

        let mut hooks = self.hooks;
        table.freeze();
        hooks.freeze();
        Machine::from_parts(table, hooks, self.initial)
    }
}

impl<S: State, E: Symbol, R: Symbol> Default for MachineBuilder<S, E, R> {
    fn default() -> Self {
        Self::new()
    }
}
