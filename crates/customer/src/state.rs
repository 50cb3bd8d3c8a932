//! Current-state projection of a customer's event stream.

use customer_es_core::{DomainError, DomainResult};

use crate::event::{CustomerEvent, CustomerRegistered};
use crate::value::{ConfirmationHash, CustomerId, EmailAddress, PersonName};

/// Lifecycle position of a customer's email address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerStatus {
    Unregistered,
    RegisteredUnconfirmed,
    RegisteredConfirmed,
}

/// Folded view of a registered customer.
///
/// Never persisted: always rebuilt from events. It can only come into being
/// from a `CustomerRegistered` event, so every field is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerState {
    id: CustomerId,
    email_address: EmailAddress,
    confirmation_hash: ConfirmationHash,
    name: PersonName,
    is_email_address_confirmed: bool,
    version: u64,
}

impl CustomerState {
    /// Start a state from the registration that opens every stream.
    pub fn registered(event: &CustomerRegistered) -> Self {
        Self {
            id: event.customer_id,
            email_address: event.email_address.clone(),
            confirmation_hash: event.confirmation_hash.clone(),
            name: event.name.clone(),
            is_email_address_confirmed: false,
            version: 1,
        }
    }

    /// Fold a full history into the current state.
    ///
    /// The history must start with exactly one `CustomerRegistered` and every
    /// event must belong to the same customer; anything else is a bug in the
    /// caller and is reported as an error.
    pub fn project<'a, I>(events: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = &'a CustomerEvent>,
    {
        let mut events = events.into_iter();

        let mut state = match events.next() {
            None => return Err(DomainError::not_found()),
            Some(CustomerEvent::CustomerRegistered(e)) => Self::registered(e),
            Some(other) => {
                return Err(DomainError::invariant(format!(
                    "history must start with a registration, found {other:?}"
                )));
            }
        };

        for event in events {
            if matches!(event, CustomerEvent::CustomerRegistered(_)) {
                return Err(DomainError::invariant(format!(
                    "customer {} registered more than once",
                    state.id
                )));
            }
            if event.customer_id() != state.id {
                return Err(DomainError::invariant(format!(
                    "event for customer {} in stream of customer {}",
                    event.customer_id(),
                    state.id
                )));
            }
            state.apply(event);
        }

        Ok(state)
    }

    /// Apply a single event.
    pub fn apply(&mut self, event: &CustomerEvent) {
        match event {
            CustomerEvent::CustomerRegistered(e) => {
                self.email_address = e.email_address.clone();
                self.confirmation_hash = e.confirmation_hash.clone();
                self.name = e.name.clone();
                self.is_email_address_confirmed = false;
            }
            CustomerEvent::CustomerEmailAddressChanged(e) => {
                self.email_address = e.email_address.clone();
                self.confirmation_hash = e.confirmation_hash.clone();
                self.is_email_address_confirmed = false;
            }
            CustomerEvent::CustomerEmailAddressConfirmed(_) => {
                self.is_email_address_confirmed = true;
            }
            CustomerEvent::CustomerEmailAddressConfirmationFailed(_) => {}
            CustomerEvent::CustomerNameChanged(e) => {
                self.name = e.name.clone();
            }
        }

        self.version += 1;
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn email_address(&self) -> &EmailAddress {
        &self.email_address
    }

    pub fn confirmation_hash(&self) -> &ConfirmationHash {
        &self.confirmation_hash
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    pub fn is_email_address_confirmed(&self) -> bool {
        self.is_email_address_confirmed
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn status(&self) -> CustomerStatus {
        if self.is_email_address_confirmed {
            CustomerStatus::RegisteredConfirmed
        } else {
            CustomerStatus::RegisteredUnconfirmed
        }
    }
}
