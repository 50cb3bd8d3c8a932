//! End-to-end customer scenarios through the dispatcher and in-memory store.

use anyhow::Result;

use customer_es_customer::{
    ChangeCustomerEmailAddress, ChangeCustomerName, ConfirmCustomerEmailAddress,
    ConfirmationHash, CustomerEmailAddressChanged, CustomerEmailAddressConfirmationFailed,
    CustomerEmailAddressConfirmed, CustomerEvent, CustomerNameChanged, CustomerStatus,
    EmailAddress, PersonName, RegisterCustomer,
};
use customer_es_infra::{CommandDispatcher, DispatcherConfig, InMemoryEventStore};

fn dispatcher() -> CommandDispatcher<InMemoryEventStore> {
    customer_es_observability::init();
    CommandDispatcher::with_config(InMemoryEventStore::new(), DispatcherConfig::default())
}

fn payloads(
    committed: Vec<customer_es_events::EventEnvelope<CustomerEvent>>,
) -> Vec<CustomerEvent> {
    committed.into_iter().map(|e| e.into_payload()).collect()
}

#[test]
fn registration_records_literal_fields() -> Result<()> {
    let dispatcher = dispatcher();
    let register = RegisterCustomer::new("j@doe.com", "John", "Doe");

    let events = payloads(dispatcher.dispatch(register.clone().into())?);
    assert_eq!(events.len(), 1);
    let CustomerEvent::CustomerRegistered(registered) = &events[0] else {
        panic!("Expected CustomerRegistered event, got {events:?}");
    };
    assert_eq!(registered.email_address, EmailAddress::new("j@doe.com"));
    assert_eq!(registered.name, PersonName::new("John", "Doe"));
    assert_eq!(registered.customer_id, register.customer_id);
    assert_eq!(registered.confirmation_hash, register.confirmation_hash);
    Ok(())
}

#[test]
fn confirming_with_the_right_hash_is_idempotent() -> Result<()> {
    let dispatcher = dispatcher();
    let register = RegisterCustomer::new("j@doe.com", "John", "Doe");
    let id = register.customer_id;
    dispatcher.dispatch(register.clone().into())?;

    let confirm = ConfirmCustomerEmailAddress::new(id, register.confirmation_hash);
    assert_eq!(
        payloads(dispatcher.dispatch(confirm.clone().into())?),
        vec![CustomerEvent::CustomerEmailAddressConfirmed(
            CustomerEmailAddressConfirmed { customer_id: id }
        )]
    );
    assert!(dispatcher.dispatch(confirm.into())?.is_empty());
    assert_eq!(dispatcher.load(id)?.status(), CustomerStatus::RegisteredConfirmed);
    Ok(())
}

#[test]
fn confirming_with_a_wrong_hash_fails() -> Result<()> {
    let dispatcher = dispatcher();
    let register = RegisterCustomer::new("j@doe.com", "John", "Doe");
    let id = register.customer_id;
    dispatcher.dispatch(register.into())?;

    let confirm = ConfirmCustomerEmailAddress::new(id, ConfirmationHash::generate());
    assert_eq!(
        payloads(dispatcher.dispatch(confirm.into())?),
        vec![CustomerEvent::CustomerEmailAddressConfirmationFailed(
            CustomerEmailAddressConfirmationFailed { customer_id: id }
        )]
    );
    Ok(())
}

#[test]
fn changed_email_needs_the_new_hash() -> Result<()> {
    let dispatcher = dispatcher();
    let register = RegisterCustomer::new("j@doe.com", "John", "Doe");
    let id = register.customer_id;
    dispatcher.dispatch(register.clone().into())?;
    dispatcher.dispatch(ConfirmCustomerEmailAddress::new(id, register.confirmation_hash.clone()).into())?;

    let change = ChangeCustomerEmailAddress::new(id, "new@doe.com");
    assert_eq!(
        payloads(dispatcher.dispatch(change.clone().into())?),
        vec![CustomerEvent::CustomerEmailAddressChanged(
            CustomerEmailAddressChanged {
                customer_id: id,
                email_address: EmailAddress::new("new@doe.com"),
                confirmation_hash: change.confirmation_hash.clone(),
            }
        )]
    );
    assert_eq!(dispatcher.load(id)?.status(), CustomerStatus::RegisteredUnconfirmed);

    // The registration hash is stale now.
    let stale = ConfirmCustomerEmailAddress::new(id, register.confirmation_hash);
    assert!(matches!(
        payloads(dispatcher.dispatch(stale.into())?).as_slice(),
        [CustomerEvent::CustomerEmailAddressConfirmationFailed(_)]
    ));

    let fresh = ConfirmCustomerEmailAddress::new(id, change.confirmation_hash);
    assert_eq!(
        payloads(dispatcher.dispatch(fresh.into())?),
        vec![CustomerEvent::CustomerEmailAddressConfirmed(
            CustomerEmailAddressConfirmed { customer_id: id }
        )]
    );
    Ok(())
}

#[test]
fn name_change_is_recorded_once() -> Result<()> {
    let dispatcher = dispatcher();
    let register = RegisterCustomer::new("j@doe.com", "John", "Doe");
    let id = register.customer_id;
    dispatcher.dispatch(register.into())?;

    let change = ChangeCustomerName::new(id, "Jayne", "Doe");
    assert_eq!(
        payloads(dispatcher.dispatch(change.clone().into())?),
        vec![CustomerEvent::CustomerNameChanged(CustomerNameChanged {
            customer_id: id,
            name: PersonName::new("Jayne", "Doe"),
        })]
    );
    assert!(dispatcher.dispatch(change.into())?.is_empty());

    let history = dispatcher.history(id)?;
    assert_eq!(history.len(), 2);
    assert_eq!(dispatcher.load(id)?.name(), &PersonName::new("Jayne", "Doe"));
    Ok(())
}

#[test]
fn customers_do_not_share_streams() -> Result<()> {
    let dispatcher = dispatcher();
    let john = RegisterCustomer::new("j@doe.com", "John", "Doe");
    let jane = RegisterCustomer::new("jane@doe.com", "Jane", "Doe");
    dispatcher.dispatch(john.clone().into())?;
    dispatcher.dispatch(jane.clone().into())?;

    dispatcher.dispatch(ChangeCustomerName::new(john.customer_id, "Johnny", "Doe").into())?;

    assert_eq!(dispatcher.history(john.customer_id)?.len(), 2);
    assert_eq!(dispatcher.history(jane.customer_id)?.len(), 1);
    assert_eq!(
        dispatcher.load(jane.customer_id)?.name(),
        &PersonName::new("Jane", "Doe")
    );
    Ok(())
}
