//! Parcelflow: a guarded finite state machine engine
//!
//! A machine is a frozen table of `(state, event) -> target` rules. Several
//! rules may share a source state and event; each carries a guard, a pure
//! predicate over the caller's [`Context`], and the first rule in
//! registration order whose guard passes is the one that fires. Lifecycle
//! hooks run after the winner is chosen and never influence the choice.
//!
//! # Core Concepts
//!
//! - **State / Symbol**: closed vocabularies, usually declared with [`state_enum!`] and [`symbol_enum!`]
//! - **Guards**: named predicates over the caller's role and attributes
//! - **Machine**: the validated, frozen definition, shared by any number of instances
//! - **Instance**: one workflow's current state and transition history
//!
//! # Example
//!
//! ```rust
//! use parcelflow::core::Context;
//! use parcelflow::parcel::{self, ParcelEvent, ParcelState, Role};
//!
//! let machine = parcel::machine().unwrap();
//! let mut parcel = machine.start().unwrap();
//!
//! machine
//!     .fire(&mut parcel, ParcelEvent::Collect, &Context::with_role(Role::Postman))
//!     .unwrap();
//! machine
//!     .fire(&mut parcel, ParcelEvent::Auto, &Context::new())
//!     .unwrap();
//!
//! // Only the sender may pay
//! let refused = machine.fire(&mut parcel, ParcelEvent::Pay, &Context::with_role(Role::Driver));
//! assert!(refused.is_err());
//! assert_eq!(parcel.current_state(), &ParcelState::Paying);
//! assert_eq!(parcel.history().len(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod engine;
pub mod logging;
pub mod parcel;

// Re-export commonly used types
pub use builder::{ConfigurationError, MachineBuilder, RuleBuilder, Violation};
pub use config::MachineDefinition;
pub use core::{Context, Guard, GuardError, State, StateHistory, StateTransition, Symbol};
pub use engine::{
    FireError, FsmInstance, HookError, HookPhase, Machine, TransitionOutcome, TransitionSnapshot,
};
