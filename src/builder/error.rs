//! Configuration errors for builders, tables and machine definitions.

use thiserror::Error;

/// Errors caused by invalid configuration or builder usage.
///
/// These never occur in the middle of a transition: they are raised while
/// assembling a machine or when asking it for a new instance.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("cannot {operation}: configuration is frozen")]
    Frozen { operation: &'static str },

    #[error("transition table is not frozen; build the machine before creating instances")]
    NotFrozen,

    #[error("state '{state}' is not declared")]
    UnknownState { state: String },

    #[error("initial state not specified. Call .initial(state) before .start()")]
    MissingInitialState,

    #[error("instance {instance} belongs to another machine")]
    ForeignInstance { instance: String },

    #[error("rule source state not specified. Call .from(state)")]
    MissingFromState,

    #[error("rule event not specified. Call .on(event)")]
    MissingEvent,

    #[error("rule target state not specified. Call .to(state)")]
    MissingToState,

    #[error("invalid machine definition: {0}")]
    Definition(String),

    #[error("configuration has {} violation(s): {}", .0.len(), join_violations(.0))]
    Invalid(Vec<Violation>),
}

/// A single structural problem found while validating a configuration.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Violation {
    #[error("no transitions defined")]
    NoTransitions,

    #[error("no terminal state declared")]
    NoTerminalState,

    #[error("terminal state '{state}' has an outgoing rule on '{event}'")]
    TerminalHasOutgoing { state: String, event: String },

    #[error("initial state '{state}' is not declared")]
    UndeclaredInitial { state: String },
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_violation() {
        let err = ConfigurationError::Invalid(vec![
            Violation::NoTerminalState,
            Violation::TerminalHasOutgoing {
                state: "Completed".to_string(),
                event: "Auto".to_string(),
            },
        ]);

        assert_eq!(
            err.to_string(),
            "configuration has 2 violation(s): no terminal state declared; \
             terminal state 'Completed' has an outgoing rule on 'Auto'"
        );
    }
}
