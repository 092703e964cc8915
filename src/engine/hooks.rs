//! Lifecycle hook registry.
//!
//! Hooks are side-effecting callbacks run synchronously after a rule has been
//! selected. They never influence which rule wins; that is the job of guards.
//!
//! Order within one successful `fire`:
//! 1. exit hooks of the source state
//! 2. the winning rule's own action
//! 3. hooks registered for (from, event, to), then any-transition hooks
//! 4. entry hooks of the target state, then any-entry hooks
//!
//! A panicking hook is contained and reported as [`HookError::Panicked`];
//! the process panic hook still runs first.

use crate::builder::ConfigurationError;
use crate::core::{Context, State, Symbol};
use crate::engine::error::HookError;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Read-only view of a transition handed to every hook.
///
/// When an instance is started with
/// [`Machine::start_with`](crate::Machine::start_with), the initial state's
/// entry hooks see `from == to` and no event.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSnapshot<S: State, E: Symbol, R: Symbol> {
    pub from: S,
    pub to: S,
    pub event: Option<E>,
    pub context: Context<R>,
}

/// Type alias for hook callbacks.
pub type Hook<S, E, R> =
    Arc<dyn Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync>;

/// Registry of entry, exit and transition hooks.
pub struct HookRegistry<S: State, E: Symbol, R: Symbol> {
    entry: HashMap<S, Vec<Hook<S, E, R>>>,
    exit: HashMap<S, Vec<Hook<S, E, R>>>,
    transition: HashMap<(S, E, S), Vec<Hook<S, E, R>>>,
    any_entry: Vec<Hook<S, E, R>>,
    any_transition: Vec<Hook<S, E, R>>,
    frozen: bool,
}

impl<S: State, E: Symbol, R: Symbol> HookRegistry<S, E, R> {
    pub fn new() -> Self {
        Self {
            entry: HashMap::new(),
            exit: HashMap::new(),
            transition: HashMap::new(),
            any_entry: Vec::new(),
            any_transition: Vec::new(),
            frozen: false,
        }
    }

    /// Run `action` whenever an instance enters `state`.
    pub fn on_entry<F>(&mut self, state: S, action: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.ensure_open("register an entry hook")?;
        self.add_entry(state, action);
        Ok(())
    }

    /// Run `action` whenever an instance leaves `state`.
    pub fn on_exit<F>(&mut self, state: S, action: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.ensure_open("register an exit hook")?;
        self.add_exit(state, action);
        Ok(())
    }

    /// Run `action` on every committed `from --event--> to` transition.
    pub fn on_transition<F>(
        &mut self,
        from: S,
        event: E,
        to: S,
        action: F,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.ensure_open("register a transition hook")?;
        self.add_transition(from, event, to, action);
        Ok(())
    }

    /// Run `action` on entry to every state.
    pub fn on_any_entry<F>(&mut self, action: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.ensure_open("register an entry hook")?;
        self.add_any_entry(action);
        Ok(())
    }

    /// Run `action` on every committed transition.
    pub fn on_any_transition<F>(&mut self, action: F) -> Result<(), ConfigurationError>
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.ensure_open("register a transition hook")?;
        self.add_any_transition(action);
        Ok(())
    }

    /// Close registration. Idempotent.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Total number of registered hooks.
    pub fn len(&self) -> usize {
        self.entry.values().map(Vec::len).sum::<usize>()
            + self.exit.values().map(Vec::len).sum::<usize>()
            + self.transition.values().map(Vec::len).sum::<usize>()
            + self.any_entry.len()
            + self.any_transition.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Unchecked registration for builders, which own an open registry.

    pub(crate) fn add_entry<F>(&mut self, state: S, action: F)
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.entry.entry(state).or_default().push(Arc::new(action));
    }

    pub(crate) fn add_exit<F>(&mut self, state: S, action: F)
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.exit.entry(state).or_default().push(Arc::new(action));
    }

    pub(crate) fn add_transition<F>(&mut self, from: S, event: E, to: S, action: F)
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.transition
            .entry((from, event, to))
            .or_default()
            .push(Arc::new(action));
    }

    pub(crate) fn add_any_entry<F>(&mut self, action: F)
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.any_entry.push(Arc::new(action));
    }

    pub(crate) fn add_any_transition<F>(&mut self, action: F)
    where
        F: Fn(&TransitionSnapshot<S, E, R>) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.any_transition.push(Arc::new(action));
    }

    pub(crate) fn run_exit(&self, snapshot: &TransitionSnapshot<S, E, R>) -> Result<(), HookError> {
        run_all(self.exit.get(&snapshot.from).into_iter().flatten(), snapshot)
    }

    pub(crate) fn run_transition(
        &self,
        snapshot: &TransitionSnapshot<S, E, R>,
    ) -> Result<(), HookError> {
        let specific = snapshot
            .event
            .as_ref()
            .and_then(|event| {
                self.transition
                    .get(&(snapshot.from.clone(), event.clone(), snapshot.to.clone()))
            })
            .into_iter()
            .flatten();
        run_all(specific.chain(&self.any_transition), snapshot)
    }

    pub(crate) fn run_entry(&self, snapshot: &TransitionSnapshot<S, E, R>) -> Result<(), HookError> {
        let specific = self.entry.get(&snapshot.to).into_iter().flatten();
        run_all(specific.chain(&self.any_entry), snapshot)
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), ConfigurationError> {
        if self.frozen {
            Err(ConfigurationError::Frozen { operation })
        } else {
            Ok(())
        }
    }
}

impl<S: State, E: Symbol, R: Symbol> Default for HookRegistry<S, E, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Call one hook, turning a panic into [`HookError::Panicked`].
pub(crate) fn invoke<S: State, E: Symbol, R: Symbol>(
    hook: &Hook<S, E, R>,
    snapshot: &TransitionSnapshot<S, E, R>,
) -> Result<(), HookError> {
    catch_unwind(AssertUnwindSafe(|| hook(snapshot))).unwrap_or(Err(HookError::Panicked))
}

/// Run hooks in order, stopping at the first failure.
fn run_all<'a, S, E, R, I>(
    hooks: I,
    snapshot: &TransitionSnapshot<S, E, R>,
) -> Result<(), HookError>
where
    S: State,
    E: Symbol,
    R: Symbol,
    I: IntoIterator<Item = &'a Hook<S, E, R>>,
{
    hooks.into_iter().try_for_each(|hook| invoke(hook, snapshot))
}
