//! Customer as an `Aggregate`, for callers that rehydrate from a stream.
//!
//! Wraps the pure handlers in `decide` and adds the checks a dispatcher needs:
//! the command must target this stream, and registration must come first.

use customer_es_core::{Aggregate, AggregateRoot, DomainError, DomainResult};

use crate::command::CustomerCommand;
use crate::decide;
use crate::event::CustomerEvent;
use crate::state::{CustomerState, CustomerStatus};
use crate::value::CustomerId;

/// Aggregate root: Customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    state: Option<CustomerState>,
}

impl Customer {
    /// Create an empty, not-yet-registered aggregate instance for rehydration.
    pub fn empty(id: CustomerId) -> Self {
        Self { id, state: None }
    }

    /// Rehydrate from a stored history.
    ///
    /// An empty history is a customer that was never registered. Anything else
    /// goes through `CustomerState::project`, so a malformed history is rejected
    /// here instead of being decided on. The registration must also be for `id`.
    pub fn from_history<'a, I>(id: CustomerId, events: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = &'a CustomerEvent>,
    {
        let mut events = events.into_iter().peekable();
        if events.peek().is_none() {
            return Ok(Self::empty(id));
        }

        let state = CustomerState::project(events)?;
        if state.id() != id {
            return Err(DomainError::invariant(format!(
                "history of customer {} loaded for customer {id}",
                state.id()
            )));
        }

        Ok(Self {
            id,
            state: Some(state),
        })
    }

    pub fn state(&self) -> Option<&CustomerState> {
        self.state.as_ref()
    }

    pub fn status(&self) -> CustomerStatus {
        self.state
            .as_ref()
            .map_or(CustomerStatus::Unregistered, CustomerState::status)
    }

    fn ensure_customer_id(&self, customer_id: CustomerId) -> Result<(), DomainError> {
        if self.id != customer_id {
            return Err(DomainError::invariant(format!(
                "command for customer {customer_id} sent to customer {}",
                self.id
            )));
        }
        Ok(())
    }

    fn registered_state(&self) -> Result<&CustomerState, DomainError> {
        self.state.as_ref().ok_or_else(DomainError::not_found)
    }
}

impl AggregateRoot for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.state.as_ref().map_or(0, CustomerState::version)
    }
}

impl Aggregate for Customer {
    type Command = CustomerCommand;
    type Event = CustomerEvent;
    type Error = DomainError;

    /// Fold an event this aggregate just decided. Stored histories go through
    /// `Customer::from_history`.
    fn apply(&mut self, event: &Self::Event) {
        match &mut self.state {
            Some(state) => state.apply(event),
            None => {
                // Nothing to fold into until the registration arrives.
                if let CustomerEvent::CustomerRegistered(e) = event {
                    self.state = Some(CustomerState::registered(e));
                }
            }
        }
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        self.ensure_customer_id(command.customer_id())?;

        match command {
            CustomerCommand::RegisterCustomer(cmd) => {
                if self.state.is_some() {
                    return Err(DomainError::conflict(format!(
                        "customer {} is already registered",
                        self.id
                    )));
                }
                Ok(vec![decide::register(cmd).into()])
            }
            CustomerCommand::ConfirmCustomerEmailAddress(cmd) => {
                Ok(decide::confirm_email_address(self.registered_state()?, cmd))
            }
            CustomerCommand::ChangeCustomerEmailAddress(cmd) => {
                Ok(decide::change_email_address(self.registered_state()?, cmd))
            }
            CustomerCommand::ChangeCustomerName(cmd) => {
                Ok(decide::change_name(self.registered_state()?, cmd))
            }
        }
    }
}
