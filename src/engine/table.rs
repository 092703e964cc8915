//! Transition table: the registry of rules keyed by (state, event).

use crate::builder::ConfigurationError;
use crate::core::{State, Symbol};
use crate::engine::rule::TransitionRule;
use std::collections::{HashMap, HashSet};

/// Registry of transition rules.
///
/// Rules are bucketed by (from, event). Each rule is stamped with an explicit
/// priority equal to its global registration index, so `lookup` always
/// returns candidates earliest-registered first regardless of how the
/// underlying map iterates. Once frozen, the table rejects every mutation.
pub struct TransitionTable<S: State, E: Symbol, R: Symbol> {
    rules: HashMap<(S, E), Vec<TransitionRule<S, E, R>>>,
    states: HashSet<S>,
    next_priority: usize,
    frozen: bool,
}

impl<S: State, E: Symbol, R: Symbol> TransitionTable<S, E, R> {
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
            states: HashSet::new(),
            next_priority: 0,
            frozen: false,
        }
    }

    /// Declare a state without attaching a rule to it.
    pub fn declare(&mut self, state: S) -> Result<(), ConfigurationError> {
        self.ensure_open("declare a state")?;
        self.states.insert(state);
        Ok(())
    }

    /// Append a rule, returning the priority it was assigned.
    ///
    /// Both endpoints of the rule become declared states.
    pub fn register(
        &mut self,
        mut rule: TransitionRule<S, E, R>,
    ) -> Result<usize, ConfigurationError> {
        self.ensure_open("register a rule")?;

        let priority = self.next_priority;
        self.next_priority += 1;
        rule.set_priority(priority);

        self.states.insert(rule.from.clone());
        self.states.insert(rule.to.clone());
        self.rules
            .entry((rule.from.clone(), rule.event.clone()))
            .or_default()
            .push(rule);
        Ok(priority)
    }

    /// All candidate rules for (from, event), in priority order.
    pub fn lookup(&self, from: &S, event: &E) -> &[TransitionRule<S, E, R>] {
        self.rules
            .get(&(from.clone(), event.clone()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every rule in the table, in priority order.
    pub fn rules(&self) -> Vec<&TransitionRule<S, E, R>> {
        let mut all: Vec<_> = self.rules.values().flatten().collect();
        all.sort_by_key(|rule| rule.priority());
        all
    }

    /// Rules leaving `state`, in priority order.
    pub fn outgoing(&self, state: &S) -> Vec<&TransitionRule<S, E, R>> {
        self.rules()
            .into_iter()
            .filter(|rule| rule.from == *state)
            .collect()
    }

    pub fn states(&self) -> impl Iterator<Item = &S> {
        self.states.iter()
    }

    pub fn is_declared(&self, state: &S) -> bool {
        self.states.contains(state)
    }

    /// Make the table read-only. Idempotent and irreversible.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.next_priority
    }

    pub fn is_empty(&self) -> bool {
        self.next_priority == 0
    }

    fn ensure_open(&self, operation: &'static str) -> Result<(), ConfigurationError> {
        if self.frozen {
            Err(ConfigurationError::Frozen { operation })
        } else {
            Ok(())
        }
    }
}

impl<S: State, E: Symbol, R: Symbol> Default for TransitionTable<S, E, R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Guard;
    use crate::parcel::{ParcelEvent, ParcelState, Role};

    type Table = TransitionTable<ParcelState, ParcelEvent, Role>;

    fn delivery_cancel_table() -> Table {
        let mut table = Table::new();
        table
            .register(TransitionRule::new(
                ParcelState::Delivery,
                ParcelEvent::Cancel,
                ParcelState::Exception,
                Guard::role(Role::Postman).labeled("POSTMAN_CANCEL"),
            ))
            .unwrap();
        table
            .register(TransitionRule::new(
                ParcelState::Paying,
                ParcelEvent::Pay,
                ParcelState::Paid,
                Guard::role(Role::Sender).labeled("SENDER_PAY"),
            ))
            .unwrap();
        table
            .register(TransitionRule::new(
                ParcelState::Delivery,
                ParcelEvent::Cancel,
                ParcelState::Refused,
                Guard::role(Role::Recipient).labeled("RECIPIENT_REFUSED"),
            ))
            .unwrap();
        table
    }

    #[test]
    fn lookup_returns_candidates_in_registration_order() {
        let table = delivery_cancel_table();

        let candidates = table.lookup(&ParcelState::Delivery, &ParcelEvent::Cancel);
        let labels: Vec<&str> = candidates.iter().map(|r| r.guard.label()).collect();
        let priorities: Vec<usize> = candidates.iter().map(|r| r.priority()).collect();

        assert_eq!(labels, vec!["POSTMAN_CANCEL", "RECIPIENT_REFUSED"]);
        assert_eq!(priorities, vec![0, 2]);
    }

    #[test]
    fn lookup_of_unknown_pair_is_empty() {
        let table = delivery_cancel_table();
        assert!(table
            .lookup(&ParcelState::Pending, &ParcelEvent::Pay)
            .is_empty());
    }

    #[test]
    fn register_declares_both_endpoints() {
        let table = delivery_cancel_table();

        assert!(table.is_declared(&ParcelState::Delivery));
        assert!(table.is_declared(&ParcelState::Refused));
        assert!(!table.is_declared(&ParcelState::Pending));
        assert_eq!(table.states().count(), 5);
    }

    #[test]
    fn rules_are_listed_by_priority() {
        let table = delivery_cancel_table();
        let priorities: Vec<usize> = table.rules().iter().map(|r| r.priority()).collect();

        assert_eq!(priorities, vec![0, 1, 2]);
        assert_eq!(table.outgoing(&ParcelState::Delivery).len(), 2);
    }

    #[test]
    fn frozen_table_rejects_mutation() {
        let mut table = delivery_cancel_table();
        table.freeze();

        let result = table.register(TransitionRule::new(
            ParcelState::Pending,
            ParcelEvent::Collect,
            ParcelState::Collected,
            Guard::role(Role::Postman),
        ));

        assert_eq!(
            result,
            Err(ConfigurationError::Frozen {
                operation: "register a rule"
            })
        );
        assert!(table.declare(ParcelState::Pending).is_err());
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn freezing_twice_is_idempotent() {
        let mut table = delivery_cancel_table();
        table.freeze();
        let before: Vec<usize> = table.rules().iter().map(|r| r.priority()).collect();
        table.freeze();
        let after: Vec<usize> = table.rules().iter().map(|r| r.priority()).collect();

        assert!(table.is_frozen());
        assert_eq!(before, after);
        assert_eq!(table.len(), 3);
    }
}
