//! Symbol traits for states, events and roles.
//!
//! The engine treats every vocabulary item as an opaque, comparable symbol.
//! States additionally know whether they are terminal.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// An opaque, comparable symbol from a finite vocabulary.
///
/// Events and roles implement this directly; states implement it through
/// [`State`]. Symbols are used as hash keys by the transition table, so they
/// must be `Eq + Hash`, and they cross thread boundaries with the frozen
/// machine, so they must be `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::Symbol;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TicketEvent {
///     Open,
///     Close,
/// }
///
/// impl Symbol for TicketEvent {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Close => "Close",
///         }
///     }
/// }
///
/// assert_eq!(TicketEvent::Close.name(), "Close");
/// ```
pub trait Symbol:
    Clone + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the symbol's name for display and diagnostics.
    fn name(&self) -> &str;
}

/// Trait for state machine states.
///
/// All methods are pure. A state is terminal when no transition may leave it;
/// the builder rejects configurations that register a rule out of a terminal
/// state.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::{State, Symbol};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum TicketState {
///     Open,
///     Closed,
/// }
///
/// impl Symbol for TicketState {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// impl State for TicketState {
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Closed)
///     }
/// }
///
/// assert!(TicketState::Closed.is_final());
/// assert!(!TicketState::Open.is_final());
/// ```
pub trait State: Symbol {
    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }
}
