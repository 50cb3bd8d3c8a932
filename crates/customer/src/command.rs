//! Commands accepted by the customer aggregate.
//!
//! Ids and confirmation hashes are generated when a command is built, never
//! while it is handled, so handling stays deterministic.

use serde::{Deserialize, Serialize};

use customer_es_core::AggregateId;
use customer_es_events::Command;

use crate::value::{ConfirmationHash, CustomerId, EmailAddress, PersonName};

/// Command: RegisterCustomer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterCustomer {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,
    pub confirmation_hash: ConfirmationHash,
    pub name: PersonName,
}

impl RegisterCustomer {
    /// Build a registration with a freshly generated id and confirmation hash.
    pub fn new(
        email_address: impl Into<String>,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: CustomerId::new(),
            email_address: EmailAddress::new(email_address),
            confirmation_hash: ConfirmationHash::generate(),
            name: PersonName::new(given_name, family_name),
        }
    }
}

/// Command: ConfirmCustomerEmailAddress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmCustomerEmailAddress {
    pub customer_id: CustomerId,
    pub confirmation_hash: ConfirmationHash,
}

impl ConfirmCustomerEmailAddress {
    pub fn new(customer_id: CustomerId, confirmation_hash: ConfirmationHash) -> Self {
        Self {
            customer_id,
            confirmation_hash,
        }
    }
}

/// Command: ChangeCustomerEmailAddress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCustomerEmailAddress {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,
    /// Issued with the command; discarded if the address does not change.
    pub confirmation_hash: ConfirmationHash,
}

impl ChangeCustomerEmailAddress {
    /// Build an email change with a freshly generated confirmation hash.
    pub fn new(customer_id: CustomerId, email_address: impl Into<String>) -> Self {
        Self {
            customer_id,
            email_address: EmailAddress::new(email_address),
            confirmation_hash: ConfirmationHash::generate(),
        }
    }
}

/// Command: ChangeCustomerName.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCustomerName {
    pub customer_id: CustomerId,
    pub name: PersonName,
}

impl ChangeCustomerName {
    pub fn new(
        customer_id: CustomerId,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
    ) -> Self {
        Self {
            customer_id,
            name: PersonName::new(given_name, family_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerCommand {
    RegisterCustomer(RegisterCustomer),
    ConfirmCustomerEmailAddress(ConfirmCustomerEmailAddress),
    ChangeCustomerEmailAddress(ChangeCustomerEmailAddress),
    ChangeCustomerName(ChangeCustomerName),
}

impl CustomerCommand {
    pub fn customer_id(&self) -> CustomerId {
        match self {
            CustomerCommand::RegisterCustomer(c) => c.customer_id,
            CustomerCommand::ConfirmCustomerEmailAddress(c) => c.customer_id,
            CustomerCommand::ChangeCustomerEmailAddress(c) => c.customer_id,
            CustomerCommand::ChangeCustomerName(c) => c.customer_id,
        }
    }
}

impl Command for CustomerCommand {
    fn target_aggregate_id(&self) -> AggregateId {
        self.customer_id().aggregate_id()
    }
}

impl From<RegisterCustomer> for CustomerCommand {
    fn from(value: RegisterCustomer) -> Self {
        Self::RegisterCustomer(value)
    }
}

impl From<ConfirmCustomerEmailAddress> for CustomerCommand {
    fn from(value: ConfirmCustomerEmailAddress) -> Self {
        Self::ConfirmCustomerEmailAddress(value)
    }
}

impl From<ChangeCustomerEmailAddress> for CustomerCommand {
    fn from(value: ChangeCustomerEmailAddress) -> Self {
        Self::ChangeCustomerEmailAddress(value)
    }
}

impl From<ChangeCustomerName> for CustomerCommand {
    fn from(value: ChangeCustomerName) -> Self {
        Self::ChangeCustomerName(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_generates_id_and_hash() {
        let a = RegisterCustomer::new("j@doe.com", "John", "Doe");
        let b = RegisterCustomer::new("j@doe.com", "John", "Doe");
        assert_ne!(a.customer_id, b.customer_id);
        assert_ne!(a.confirmation_hash, b.confirmation_hash);
        assert_eq!(a.email_address, EmailAddress::new("j@doe.com"));
        assert_eq!(a.name, PersonName::new("John", "Doe"));
    }

    #[test]
    fn change_email_issues_a_new_hash_per_command() {
        let id = CustomerId::new();
        let a = ChangeCustomerEmailAddress::new(id, "new@doe.com");
        let b = ChangeCustomerEmailAddress::new(id, "new@doe.com");
        assert_ne!(a.confirmation_hash, b.confirmation_hash);
    }

    #[test]
    fn command_targets_customer_stream() {
        let id = CustomerId::new();
        let cmd: CustomerCommand = ChangeCustomerName::new(id, "Jayne", "Doe").into();
        assert_eq!(cmd.target_aggregate_id(), id.aggregate_id());
    }
}
