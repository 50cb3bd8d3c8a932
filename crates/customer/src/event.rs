//! Facts recorded in a customer's event stream.

use serde::{Deserialize, Serialize};

use customer_es_core::AggregateId;
use customer_es_events::Event;

use crate::value::{ConfirmationHash, CustomerId, EmailAddress, PersonName};

/// Event: CustomerRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRegistered {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,
    pub confirmation_hash: ConfirmationHash,
    pub name: PersonName,
}

/// Event: CustomerEmailAddressChanged. Always resets confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmailAddressChanged {
    pub customer_id: CustomerId,
    pub email_address: EmailAddress,
    pub confirmation_hash: ConfirmationHash,
}

/// Event: CustomerEmailAddressConfirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmailAddressConfirmed {
    pub customer_id: CustomerId,
}

/// Event: CustomerEmailAddressConfirmationFailed.
///
/// Records a rejected confirmation attempt; it does not change state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerEmailAddressConfirmationFailed {
    pub customer_id: CustomerId,
}

/// Event: CustomerNameChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerNameChanged {
    pub customer_id: CustomerId,
    pub name: PersonName,
}

/// Any customer event. The serialized `type` tag is the same stable name
/// `event_type()` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CustomerEvent {
    #[serde(rename = "customer.registered")]
    CustomerRegistered(CustomerRegistered),
    #[serde(rename = "customer.email_address_changed")]
    CustomerEmailAddressChanged(CustomerEmailAddressChanged),
    #[serde(rename = "customer.email_address_confirmed")]
    CustomerEmailAddressConfirmed(CustomerEmailAddressConfirmed),
    #[serde(rename = "customer.email_address_confirmation_failed")]
    CustomerEmailAddressConfirmationFailed(CustomerEmailAddressConfirmationFailed),
    #[serde(rename = "customer.name_changed")]
    CustomerNameChanged(CustomerNameChanged),
}

impl CustomerEvent {
    /// Every `event_type()` this enum can produce; stored events with any
    /// other type are skipped when a stream is replayed.
    pub const EVENT_TYPES: [&'static str; 5] = [
        "customer.registered",
        "customer.email_address_changed",
        "customer.email_address_confirmed",
        "customer.email_address_confirmation_failed",
        "customer.name_changed",
    ];

    pub fn customer_id(&self) -> CustomerId {
        match self {
            CustomerEvent::CustomerRegistered(e) => e.customer_id,
            CustomerEvent::CustomerEmailAddressChanged(e) => e.customer_id,
            CustomerEvent::CustomerEmailAddressConfirmed(e) => e.customer_id,
            CustomerEvent::CustomerEmailAddressConfirmationFailed(e) => e.customer_id,
            CustomerEvent::CustomerNameChanged(e) => e.customer_id,
        }
    }

    pub fn is_known_type(event_type: &str) -> bool {
        Self::EVENT_TYPES.contains(&event_type)
    }
}

impl Event for CustomerEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::CustomerRegistered(_) => Self::EVENT_TYPES[0],
            CustomerEvent::CustomerEmailAddressChanged(_) => Self::EVENT_TYPES[1],
            CustomerEvent::CustomerEmailAddressConfirmed(_) => Self::EVENT_TYPES[2],
            CustomerEvent::CustomerEmailAddressConfirmationFailed(_) => Self::EVENT_TYPES[3],
            CustomerEvent::CustomerNameChanged(_) => Self::EVENT_TYPES[4],
        }
    }

    fn aggregate_id(&self) -> AggregateId {
        self.customer_id().aggregate_id()
    }
}

impl From<CustomerRegistered> for CustomerEvent {
    fn from(value: CustomerRegistered) -> Self {
        Self::CustomerRegistered(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_are_distinct_and_known() {
        let id = CustomerId::new();
        let events = [
            CustomerEvent::CustomerEmailAddressConfirmed(CustomerEmailAddressConfirmed {
                customer_id: id,
            }),
            CustomerEvent::CustomerEmailAddressConfirmationFailed(
                CustomerEmailAddressConfirmationFailed { customer_id: id },
            ),
            CustomerEvent::CustomerNameChanged(CustomerNameChanged {
                customer_id: id,
                name: PersonName::new("Jayne", "Doe"),
            }),
        ];
        for ev in &events {
            assert!(CustomerEvent::is_known_type(ev.event_type()));
            assert_eq!(ev.customer_id(), id);
        }
        assert_ne!(events[0].event_type(), events[1].event_type());
        assert!(!CustomerEvent::is_known_type("customer.closed"));
    }

    #[test]
    fn serialized_form_is_tagged_by_type() {
        let id = CustomerId::new();
        let ev = CustomerEvent::CustomerEmailAddressConfirmed(CustomerEmailAddressConfirmed {
            customer_id: id,
        });
        let json = serde_json::to_value(&ev).unwrap();
        assert_eq!(json["type"], "customer.email_address_confirmed");
        assert_eq!(json["customer_id"], serde_json::json!(id.to_string()));

        let back: CustomerEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, ev);
    }

    #[test]
    fn serialized_tag_matches_event_type() {
        let id = CustomerId::new();
        let events = [
            CustomerEvent::CustomerRegistered(CustomerRegistered {
                customer_id: id,
                email_address: EmailAddress::new("j@doe.com"),
                confirmation_hash: ConfirmationHash::new("hash-1"),
                name: PersonName::new("John", "Doe"),
            }),
            CustomerEvent::CustomerEmailAddressChanged(CustomerEmailAddressChanged {
                customer_id: id,
                email_address: EmailAddress::new("new@doe.com"),
                confirmation_hash: ConfirmationHash::new("hash-2"),
            }),
            CustomerEvent::CustomerEmailAddressConfirmed(CustomerEmailAddressConfirmed {
                customer_id: id,
            }),
            CustomerEvent::CustomerEmailAddressConfirmationFailed(
                CustomerEmailAddressConfirmationFailed { customer_id: id },
            ),
            CustomerEvent::CustomerNameChanged(CustomerNameChanged {
                customer_id: id,
                name: PersonName::new("Jayne", "Doe"),
            }),
        ];

        let tags: Vec<_> = events
            .iter()
            .map(|ev| {
                let json = serde_json::to_value(ev).unwrap();
                assert_eq!(json["type"], ev.event_type());
                ev.event_type()
            })
            .collect();
        assert_eq!(tags, CustomerEvent::EVENT_TYPES);
    }
}
