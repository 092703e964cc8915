//! Structural validation of a configured transition table.
//!
//! Every check runs and all violations are accumulated with Stillwater's
//! `Validation`, so a broken configuration is reported in one pass.

use crate::builder::error::Violation;
use crate::core::{State, Symbol};
use crate::engine::TransitionTable;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<Violation>>;

/// Validate `table` and the optional initial state, accumulating ALL
/// violations.
pub fn validate<S: State, E: Symbol, R: Symbol>(
    table: &TransitionTable<S, E, R>,
    initial: Option<&S>,
) -> Check {
    let mut checks: Vec<Check> = Vec::new();

    checks.push(if table.is_empty() {
        Validation::fail(Violation::NoTransitions)
    } else {
        Validation::success(())
    });

    checks.push(if table.states().any(|state| state.is_final()) {
        Validation::success(())
    } else {
        Validation::fail(Violation::NoTerminalState)
    });

    for rule in table.rules() {
        if rule.from.is_final() {
            checks.push(Validation::fail(Violation::TerminalHasOutgoing {
                state: rule.from.name().to_string(),
                event: rule.event.name().to_string(),
            }));
        }
    }

    if let Some(initial) = initial {
        if !table.is_declared(initial) {
            checks.push(Validation::fail(Violation::UndeclaredInitial {
                state: initial.name().to_string(),
            }));
        }
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a failed validation into a plain list.
pub(crate) fn violations(result: Check) -> Vec<Violation> {
    match result {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use crate::engine::TransitionRule;
    use crate::parcel::{ParcelEvent, ParcelState, Role};

    type Table = TransitionTable<ParcelState, ParcelEvent, Role>;

    #[test]
    fn empty_table_reports_every_violation() {
        let table = Table::new();

        let found = violations(validate(&table, Some(&ParcelState::Pending)));

        assert_eq!(
            found,
            vec![
                Violation::NoTransitions,
                Violation::NoTerminalState,
                Violation::UndeclaredInitial {
                    state: "Pending".to_string()
                },
            ]
        );
    }

    #[test]
    fn rule_out_of_terminal_state_is_rejected() {
        let mut table = Table::new();
        table
            .register(TransitionRule::new(
                ParcelState::Completed,
                ParcelEvent::Auto,
                ParcelState::Pending,
                Guard::always(),
            ))
            .unwrap();

        let result = validate(&table, Some(&ParcelState::Pending));

        assert!(result.is_failure());
        assert_eq!(
            violations(result),
            vec![Violation::TerminalHasOutgoing {
                state: "Completed".to_string(),
                event: "Auto".to_string(),
            }]
        );
    }

    #[test]
    fn well_formed_table_passes() {
        let mut table = Table::new();
        table
            .register(TransitionRule::new(
                ParcelState::Pending,
                ParcelEvent::Cancel,
                ParcelState::Completed,
                Guard::role(Role::Sender),
            ))
            .unwrap();

        let result = validate(&table, Some(&ParcelState::Pending));

        assert!(result.is_success());
        assert!(violations(result).is_empty());
    }
}
