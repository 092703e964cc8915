//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for assembling a transition
//! table and hook registry, validating them, and freezing them into a
//! [`Machine`](crate::Machine).

pub mod error;
pub mod machine;
pub mod macros;
pub mod rule;
pub mod validation;

pub use error::{ConfigurationError, Violation};
pub use machine::MachineBuilder;
pub use rule::RuleBuilder;
pub use validation::validate;
