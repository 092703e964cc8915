//! End-to-end behaviour of the parcel workflow.

use parcelflow::core::{Context, State};
use parcelflow::engine::{FireError, FsmInstance, TransitionTable};
use parcelflow::parcel::{self, ParcelEvent, ParcelMachine, ParcelState, Role};
use std::sync::{Arc, Mutex};

fn as_role(role: Role) -> Context<Role> {
    Context::with_role(role)
}

fn at(machine: &ParcelMachine, state: ParcelState) -> FsmInstance<ParcelState, ParcelEvent> {
    machine.new_instance(state).unwrap()
}

#[test]
fn no_rule_leaves_a_terminal_state() {
    let machine = parcel::machine().unwrap();

    for rule in machine.table().rules() {
        assert!(!rule.from.is_final(), "{:?} leaves a terminal state", rule);
    }
    assert!(machine.table().outgoing(&ParcelState::Completed).is_empty());
}

#[test]
fn cancel_during_delivery_depends_on_role() {
    let machine = parcel::machine().unwrap();

    let mut by_postman = at(&machine, ParcelState::Delivery);
    machine
        .fire(&mut by_postman, ParcelEvent::Cancel, &as_role(Role::Postman))
        .unwrap();
    assert_eq!(by_postman.current_state(), &ParcelState::Exception);

    let mut by_recipient = at(&machine, ParcelState::Delivery);
    machine
        .fire(&mut by_recipient, ParcelEvent::Cancel, &as_role(Role::Recipient))
        .unwrap();
    assert_eq!(by_recipient.current_state(), &ParcelState::Refused);
}

#[test]
fn pay_before_collection_is_rejected() {
    let machine = parcel::machine().unwrap();
    let mut parcel = machine.start().unwrap();

    let result = machine.fire(&mut parcel, ParcelEvent::Pay, &as_role(Role::Sender));

    assert!(matches!(
        result,
        Err(FireError::NoApplicableTransition { ref state, ref event, .. })
            if state == "Pending" && event == "Pay"
    ));
    assert_eq!(parcel.current_state(), &ParcelState::Pending);
    assert!(parcel.history().is_empty());
}

#[test]
fn only_the_sender_pays() {
    let machine = parcel::machine().unwrap();
    let mut parcel = at(&machine, ParcelState::Paying);

    let refused = machine.fire(&mut parcel, ParcelEvent::Pay, &as_role(Role::Postman));
    assert!(matches!(
        refused,
        Err(FireError::NoApplicableTransition { .. })
    ));
    assert_eq!(parcel.current_state(), &ParcelState::Paying);

    let outcome = machine
        .fire(&mut parcel, ParcelEvent::Pay, &as_role(Role::Sender))
        .unwrap();
    assert_eq!(outcome.to, ParcelState::Paid);
    assert_eq!(outcome.guard, "SENDER_PAY");
}

#[test]
fn collected_advances_without_a_role() {
    let machine = parcel::machine().unwrap();
    let mut parcel = at(&machine, ParcelState::Collected);

    machine
        .fire(&mut parcel, ParcelEvent::Auto, &Context::new())
        .unwrap();

    assert_eq!(parcel.current_state(), &ParcelState::Paying);
}

#[test]
fn auto_completion_requires_the_auto_role() {
    let machine = parcel::machine().unwrap();
    let mut parcel = at(&machine, ParcelState::Refused);

    assert!(machine
        .fire(&mut parcel, ParcelEvent::Auto, &Context::new())
        .is_err());
    assert!(machine
        .fire(&mut parcel, ParcelEvent::Auto, &as_role(Role::Recipient))
        .is_err());
    machine
        .fire(&mut parcel, ParcelEvent::Auto, &as_role(Role::Auto))
        .unwrap();

    assert!(parcel.is_final());
}

#[test]
fn full_delivery_visits_every_state_once() {
    let entered = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&entered);
    let machine = parcel::builder()
        .on_any_entry(move |snapshot| {
            log.lock().unwrap().push(snapshot.to);
            Ok(())
        })
        .build()
        .unwrap();
    let mut parcel = machine.start().unwrap();

    let steps = [
        (ParcelEvent::Collect, Context::with_role(Role::Postman)),
        (ParcelEvent::Auto, Context::new()),
        (ParcelEvent::Pay, Context::with_role(Role::Sender)),
        (ParcelEvent::Ship, Context::with_role(Role::Transiter)),
        (ParcelEvent::Delivery, Context::with_role(Role::Postman)),
        (ParcelEvent::Delivery, Context::with_role(Role::Recipient)),
        (ParcelEvent::Auto, Context::with_role(Role::Auto)),
    ];
    for (event, context) in &steps {
        machine.fire(&mut parcel, *event, context).unwrap();
    }

    let expected = vec![
        ParcelState::Collected,
        ParcelState::Paying,
        ParcelState::Paid,
        ParcelState::Transiting,
        ParcelState::Delivery,
        ParcelState::Delivered,
        ParcelState::Completed,
    ];
    assert_eq!(*entered.lock().unwrap(), expected);

    let mut path = vec![ParcelState::Pending];
    path.extend(expected);
    let recorded: Vec<ParcelState> = parcel.history().path().into_iter().copied().collect();
    assert_eq!(recorded, path);
    assert!(parcel.is_final());
}

#[test]
fn declined_driver_delivery_does_not_disturb_the_run() {
    let machine = parcel::machine().unwrap();
    let mut parcel = at(&machine, ParcelState::Transiting);

    let declined = machine.fire(&mut parcel, ParcelEvent::Delivery, &as_role(Role::Driver));
    let reason = match declined {
        Err(FireError::NoApplicableTransition { reason, .. }) => reason,
        other => panic!("expected a rejection, got {:?}", other),
    };
    assert!(reason.contains("POSTMAN_DELIVERY"), "{}", reason);

    machine
        .fire(&mut parcel, ParcelEvent::Delivery, &as_role(Role::Postman))
        .unwrap();
    assert_eq!(parcel.current_state(), &ParcelState::Delivery);
    assert_eq!(parcel.history().len(), 1);
}

#[test]
fn completed_parcels_accept_nothing() {
    let machine = parcel::machine().unwrap();
    let mut parcel = at(&machine, ParcelState::Completed);

    for event in ParcelEvent::VARIANTS {
        for role in Role::VARIANTS {
            assert!(!machine.can_fire(parcel.current_state(), event, &as_role(*role)));
            assert!(machine
                .fire(&mut parcel, *event, &as_role(*role))
                .is_err());
        }
    }
    assert_eq!(parcel.current_state(), &ParcelState::Completed);
}

#[test]
fn freezing_twice_equals_freezing_once() {
    let machine = parcel::machine().unwrap();
    let mut table = TransitionTable::new();
    for rule in machine.table().rules() {
        table.register(rule.clone()).unwrap();
    }

    table.freeze();
    let once: Vec<_> = table.rules().iter().map(|r| (r.from, r.to, r.priority())).collect();
    table.freeze();
    let twice: Vec<_> = table.rules().iter().map(|r| (r.from, r.to, r.priority())).collect();

    assert!(table.is_frozen());
    assert_eq!(once, twice);
}
