//! Ready-made hooks that report transitions through `tracing`.
//!
//! The engine itself never logs. Attach these to a builder to get one
//! structured event per committed transition and per state entered:
//!
//! ```rust
//! use parcelflow::{logging, parcel};
//!
//! let machine = parcel::builder()
//!     .on_any_transition(logging::log_transition)
//!     .on_any_entry(logging::log_entry)
//!     .build()
//!     .unwrap();
//! # let _ = machine;
//! ```
//!
//! Installing a subscriber is left to the application.

use crate::core::{State, Symbol};
use crate::engine::{HookError, TransitionSnapshot};

const NO_ROLE: &str = "-";
const NO_EVENT: &str = "-";

fn role_name<S: State, E: Symbol, R: Symbol>(snapshot: &TransitionSnapshot<S, E, R>) -> &str {
    snapshot.context.role().map_or(NO_ROLE, Symbol::name)
}

fn event_name<S: State, E: Symbol, R: Symbol>(snapshot: &TransitionSnapshot<S, E, R>) -> &str {
    snapshot.event.as_ref().map_or(NO_EVENT, Symbol::name)
}

/// Transition hook logging `from --event--> to` at info level.
pub fn log_transition<S, E, R>(snapshot: &TransitionSnapshot<S, E, R>) -> Result<(), HookError>
where
    S: State,
    E: Symbol,
    R: Symbol,
{
    tracing::info!(
        from = snapshot.from.name(),
        to = snapshot.to.name(),
        event = event_name(snapshot),
        role = role_name(snapshot),
        "Transition committed"
    );
    Ok(())
}

/// Entry hook logging the state just entered.
pub fn log_entry<S, E, R>(snapshot: &TransitionSnapshot<S, E, R>) -> Result<(), HookError>
where
    S: State,
    E: Symbol,
    R: Symbol,
{
    tracing::info!(
        state = snapshot.to.name(),
        event = event_name(snapshot),
        role = role_name(snapshot),
        final_state = snapshot.to.is_final(),
        "Entered state"
    );
    Ok(())
}
