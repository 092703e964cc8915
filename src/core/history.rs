//! State transition history tracking.
//!
//! Every committed transition of an instance is recorded in order, so callers
//! can inspect the path an instance has taken.

use super::state::{State, Symbol};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed transition.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::StateTransition;
/// use parcelflow::parcel::{ParcelEvent, ParcelState};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: ParcelState::Pending,
///     to: ParcelState::Collected,
///     event: ParcelEvent::Collect,
///     guard: "POSTMAN_COLLECT".to_string(),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(transition.to, ParcelState::Collected);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State, E: Symbol> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// The event that triggered the transition
    pub event: E,
    /// Label of the guard that admitted the winning rule
    pub guard: String,
    /// When the transition was committed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of committed transitions.
///
/// # Example
///
/// ```rust
/// use parcelflow::core::{StateHistory, StateTransition};
/// use parcelflow::parcel::{ParcelEvent, ParcelState};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.record(StateTransition {
///     from: ParcelState::Pending,
///     to: ParcelState::Collected,
///     event: ParcelEvent::Collect,
///     guard: "POSTMAN_COLLECT".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(StateTransition {
///     from: ParcelState::Collected,
///     to: ParcelState::Paying,
///     event: ParcelEvent::Auto,
///     guard: "always".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.path();
/// assert_eq!(
///     path,
///     vec![&ParcelState::Pending, &ParcelState::Collected, &ParcelState::Paying]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State, E: Symbol> {
    transitions: Vec<StateTransition<S, E>>,
}

impl<S: State, E: Symbol> Default for StateHistory<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Symbol> StateHistory<S, E> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a committed transition.
    pub fn record(&mut self, transition: StateTransition<S, E>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the first transition followed by the `to`
    /// state of each transition. Empty when nothing has been recorded.
    pub fn path(&self) -> Vec<&S> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    pub fn transitions(&self) -> &[StateTransition<S, E>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}
