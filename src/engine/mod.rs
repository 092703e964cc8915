//! The transition-resolution engine.
//!
//! # Key Concepts
//!
//! - **Transition Table**: rules keyed by (state, event) with explicit priority
//! - **Hook Registry**: exit, transition and entry side effects
//! - **Machine**: frozen table + hooks, shared by every instance
//! - **Instance**: one workflow's current state and history
//!
//! The engine never logs. It classifies each `fire` as a committed
//! [`TransitionOutcome`], a rejection, or a committed transition whose hook
//! failed, and returns that to the caller. Panics in guards and hooks are
//! contained, but the process panic hook (stderr by default) still sees them.

mod error;
mod hooks;
mod instance;
mod machine;
mod rule;
mod table;

pub use error::{FireError, HookError, HookPhase};
pub use hooks::{Hook, HookRegistry, TransitionSnapshot};
pub use instance::{FsmInstance, TransitionOutcome};
pub use machine::Machine;
pub use rule::TransitionRule;
pub use table::TransitionTable;
