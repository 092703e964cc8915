//! Parcel Delivery
//!
//! This example walks one parcel through its whole lifecycle.
//!
//! Key concepts:
//! - Role-gated transitions sharing the same state and event
//! - A declined event leaves the parcel where it was
//! - Logging hooks attached to every transition and state entry
//!
//! Run with: cargo run --example parcel_delivery
//! Set RUST_LOG=debug (or warn) to change verbosity.

use parcelflow::core::{Context, Symbol};
use parcelflow::logging;
use parcelflow::parcel::{self, ParcelEvent, Role};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let machine = match parcel::builder()
        .on_any_transition(logging::log_transition)
        .on_any_entry(logging::log_entry)
        .build()
    {
        Ok(machine) => machine,
        Err(e) => {
            tracing::error!(error = %e, "Invalid parcel configuration");
            return;
        }
    };

    let mut parcel = match machine.start_with(&Context::new()) {
        Ok(parcel) => parcel,
        Err(e) => {
            tracing::error!(error = %e, "Could not start parcel");
            return;
        }
    };
    tracing::info!(parcel = %parcel.id(), state = ?parcel.current_state(), "Parcel created");

    let steps = [
        (ParcelEvent::Collect, Role::Postman),
        (ParcelEvent::Auto, Role::Auto),
        (ParcelEvent::Pay, Role::Sender),
        (ParcelEvent::Ship, Role::Transiter),
        // Drivers cannot hand parcels out for delivery
        (ParcelEvent::Delivery, Role::Driver),
        (ParcelEvent::Delivery, Role::Postman),
        (ParcelEvent::Delivery, Role::Recipient),
        (ParcelEvent::Auto, Role::Auto),
    ];

    for (event, role) in steps {
        match machine.fire(&mut parcel, event, &Context::with_role(role)) {
            Ok(outcome) => tracing::debug!(
                guard = %outcome.guard,
                priority = outcome.priority,
                "Rule applied"
            ),
            Err(e) if e.is_committed() => tracing::warn!(error = %e, "Hook failed after transition"),
            Err(e) => tracing::warn!(error = %e, ?event, ?role, "Event declined"),
        }
    }

    let path: Vec<&str> = parcel
        .history()
        .transitions()
        .iter()
        .map(|t| t.to.name())
        .collect();
    tracing::info!(
        state = ?parcel.current_state(),
        finished = parcel.is_final(),
        transitions = parcel.history().len(),
        path = %path.join(" -> "),
        "Parcel workflow finished"
    );
}
