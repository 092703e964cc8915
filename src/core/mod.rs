//! Core state machine types.
//!
//! This module contains the pure building blocks of the engine:
//! - Symbol and State traits for the workflow vocabulary
//! - The fire-time [`Context`]
//! - Guard predicates and their fail-closed evaluation
//! - Transition history

pub mod context;
pub mod guard;
pub mod history;
pub mod state;

pub use context::Context;
pub use guard::{Guard, GuardError, Predicate};
pub use history::{StateHistory, StateTransition};
pub use state::{State, Symbol};
