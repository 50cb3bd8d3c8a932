//! Command handlers: pure decisions over the projected state.
//!
//! Each handler returns the events to append (zero or one). A rejected
//! confirmation is itself an event; re-sending a change that is already in
//! effect yields no events.

use crate::command::{
    ChangeCustomerEmailAddress, ChangeCustomerName, ConfirmCustomerEmailAddress, RegisterCustomer,
};
use crate::event::{
    CustomerEmailAddressChanged, CustomerEmailAddressConfirmationFailed,
    CustomerEmailAddressConfirmed, CustomerEvent, CustomerNameChanged, CustomerRegistered,
};
use crate::state::CustomerState;

/// Register a new customer. Never fails.
pub fn register(command: &RegisterCustomer) -> CustomerRegistered {
    CustomerRegistered {
        customer_id: command.customer_id,
        email_address: command.email_address.clone(),
        confirmation_hash: command.confirmation_hash.clone(),
        name: command.name.clone(),
    }
}

/// Confirm the current email address.
///
/// A hash mismatch is checked first, so a wrong hash fails even when the
/// address is already confirmed.
pub fn confirm_email_address(
    state: &CustomerState,
    command: &ConfirmCustomerEmailAddress,
) -> Vec<CustomerEvent> {
    if command.confirmation_hash != *state.confirmation_hash() {
        return vec![CustomerEvent::CustomerEmailAddressConfirmationFailed(
            CustomerEmailAddressConfirmationFailed {
                customer_id: command.customer_id,
            },
        )];
    }

    if state.is_email_address_confirmed() {
        return vec![];
    }

    vec![CustomerEvent::CustomerEmailAddressConfirmed(
        CustomerEmailAddressConfirmed {
            customer_id: command.customer_id,
        },
    )]
}

/// Change the email address. Only the address takes part in the comparison.
pub fn change_email_address(
    state: &CustomerState,
    command: &ChangeCustomerEmailAddress,
) -> Vec<CustomerEvent> {
    if command.email_address == *state.email_address() {
        return vec![];
    }

    vec![CustomerEvent::CustomerEmailAddressChanged(
        CustomerEmailAddressChanged {
            customer_id: command.customer_id,
            email_address: command.email_address.clone(),
            confirmation_hash: command.confirmation_hash.clone(),
        },
    )]
}

/// Change the person name (both parts compared).
pub fn change_name(state: &CustomerState, command: &ChangeCustomerName) -> Vec<CustomerEvent> {
    if command.name == *state.name() {
        return vec![];
    }

    vec![CustomerEvent::CustomerNameChanged(CustomerNameChanged {
        customer_id: command.customer_id,
        name: command.name.clone(),
    })]
}
