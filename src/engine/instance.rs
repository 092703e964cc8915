//! Per-workflow FSM instances.

use crate::core::{State, StateHistory, StateTransition, Symbol};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// One running workflow: a current state plus the path that led to it.
///
/// Instances are created by [`Machine::new_instance`](crate::Machine::new_instance)
/// and mutated only by successful `fire` calls. `fire` borrows the instance
/// mutably, so calls on one instance are serialized by ownership; share an
/// instance across threads only behind a lock.
#[derive(Debug)]
pub struct FsmInstance<S: State, E: Symbol> {
    id: Uuid,
    machine_id: Uuid,
    current: S,
    history: StateHistory<S, E>,
    created_at: DateTime<Utc>,
}

impl<S: State, E: Symbol> FsmInstance<S, E> {
    pub(crate) fn new(machine_id: Uuid, initial: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            machine_id,
            current: initial,
            history: StateHistory::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub(crate) fn machine_id(&self) -> Uuid {
        self.machine_id
    }

    pub fn current_state(&self) -> &S {
        &self.current
    }

    /// Check if the instance has reached a terminal state (pure)
    pub fn is_final(&self) -> bool {
        self.current.is_final()
    }

    pub fn history(&self) -> &StateHistory<S, E> {
        &self.history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn commit(&mut self, transition: StateTransition<S, E>) {
        self.current = transition.to.clone();
        self.history.record(transition);
    }
}

/// Result of a successful `fire`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct TransitionOutcome<S: State, E: Symbol> {
    pub from: S,
    pub to: S,
    pub event: E,
    /// Priority of the winning rule
    pub priority: usize,
    /// Label of the guard that admitted the winning rule
    pub guard: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parcel::{ParcelEvent, ParcelState};

    #[test]
    fn new_instance_starts_with_empty_history() {
        let instance: FsmInstance<ParcelState, ParcelEvent> =
            FsmInstance::new(Uuid::new_v4(), ParcelState::Pending);

        assert_eq!(instance.current_state(), &ParcelState::Pending);
        assert!(instance.history().is_empty());
        assert!(!instance.is_final());
    }

    #[test]
    fn commit_moves_state_and_records_history() {
        let mut instance = FsmInstance::new(Uuid::new_v4(), ParcelState::Exception);

        instance.commit(StateTransition {
            from: ParcelState::Exception,
            to: ParcelState::Completed,
            event: ParcelEvent::Auto,
            guard: "AUTO_EXCEPTION_COMPLETED".to_string(),
            timestamp: Utc::now(),
        });

        assert_eq!(instance.current_state(), &ParcelState::Completed);
        assert!(instance.is_final());
        assert_eq!(instance.history().len(), 1);
    }

    #[test]
    fn instances_get_distinct_ids() {
        let machine_id = Uuid::new_v4();
        let a: FsmInstance<ParcelState, ParcelEvent> =
            FsmInstance::new(machine_id, ParcelState::Pending);
        let b: FsmInstance<ParcelState, ParcelEvent> =
            FsmInstance::new(machine_id, ParcelState::Pending);

        assert_ne!(a.id(), b.id());
    }
}
