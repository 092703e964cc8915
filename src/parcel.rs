//! Reference workflow: a parcel moving from pickup to completion.
//!
//! Every event is fired on behalf of a [`Role`], and the role decides which
//! rule applies. `Cancel` while in `Delivery` goes to `Exception` when the
//! postman fires it and to `Refused` when the recipient does.

use crate::builder::{ConfigurationError, MachineBuilder};
use crate::config::MachineDefinition;
use crate::core::Guard;
use crate::engine::Machine;
use crate::{state_enum, symbol_enum};

state_enum! {
    /// Where a parcel is in its lifecycle.
    pub enum ParcelState {
        Pending,
        Collected,
        Paying,
        Paid,
        Transiting,
        Delivery,
        Delivered,
        Refused,
        Exception,
        Cancelled,
        Completed,
    }
    final: [Completed]
}

symbol_enum! {
    pub enum ParcelEvent {
        Collect,
        Pay,
        Ship,
        Cancel,
        Auto,
        Delivery,
    }
}

symbol_enum! {
    /// The actor firing an event. `Auto` stands for the system itself.
    pub enum Role {
        Postman,
        Sender,
        Transiter,
        Driver,
        Recipient,
        Auto,
    }
}

/// The parcel workflow as JSON, identical to [`builder`].
pub const DEFINITION_JSON: &str = include_str!("../config/parcel.json");

pub type ParcelMachine = Machine<ParcelState, ParcelEvent, Role>;

/// Builder preloaded with the parcel rules, open for hooks.
pub fn builder() -> MachineBuilder<ParcelState, ParcelEvent, Role> {
    use ParcelEvent as E;
    use ParcelState as S;

    let role = |role: Role, label: &str| Guard::role(role).labeled(label);

    MachineBuilder::new()
        .initial(S::Pending)
        .states(S::VARIANTS.iter().copied())
        .transition(S::Pending, E::Collect, S::Collected, role(Role::Postman, "POSTMAN_COLLECT"))
        .transition(S::Transiting, E::Delivery, S::Delivery, role(Role::Postman, "POSTMAN_DELIVERY"))
        .transition(S::Delivery, E::Cancel, S::Exception, role(Role::Postman, "POSTMAN_CANCEL"))
        .transition(S::Paying, E::Pay, S::Paid, role(Role::Sender, "SENDER_PAY"))
        .transition(S::Pending, E::Cancel, S::Cancelled, role(Role::Sender, "SENDER_CANCEL"))
        .transition(S::Paying, E::Cancel, S::Cancelled, role(Role::Sender, "SENDER_CANCEL_PAYING"))
        .transition(S::Paid, E::Ship, S::Transiting, role(Role::Transiter, "TRANSITER_SHIP"))
        .transition(S::Paid, E::Ship, S::Transiting, role(Role::Driver, "DRIVER_SHIP"))
        .transition(S::Delivery, E::Delivery, S::Delivered, role(Role::Recipient, "RECIPIENT_DELIVERED"))
        .transition(S::Delivery, E::Cancel, S::Refused, role(Role::Recipient, "RECIPIENT_REFUSED"))
        .transition(S::Delivered, E::Auto, S::Completed, role(Role::Auto, "AUTO_COMPLETED"))
        .transition(S::Cancelled, E::Auto, S::Completed, role(Role::Auto, "AUTO_CANCELLED_COMPLETED"))
        .transition(S::Refused, E::Auto, S::Completed, role(Role::Auto, "AUTO_REFUSED_COMPLETED"))
        .transition(S::Exception, E::Auto, S::Completed, role(Role::Auto, "AUTO_EXCEPTION_COMPLETED"))
        .transition(S::Collected, E::Auto, S::Paying, Guard::always())
}

/// The parcel machine without hooks.
pub fn machine() -> Result<ParcelMachine, ConfigurationError> {
    builder().build()
}

/// Parse [`DEFINITION_JSON`].
pub fn definition() -> Result<MachineDefinition<ParcelState, ParcelEvent, Role>, ConfigurationError> {
    MachineDefinition::from_json(DEFINITION_JSON)
}
