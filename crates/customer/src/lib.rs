//! Customer domain module (event-sourced).
//!
//! A customer's lifecycle is an append-only stream of events. The current
//! state is a fold over that stream, and each command is decided against
//! that state into zero or one new events. Pure domain logic: no IO, no
//! storage, no clocks.

pub mod command;
pub mod customer;
pub mod decide;
pub mod event;
pub mod state;
pub mod value;

pub use command::{
    ChangeCustomerEmailAddress, ChangeCustomerName, ConfirmCustomerEmailAddress, CustomerCommand,
    RegisterCustomer,
};
pub use customer::Customer;
pub use decide::{change_email_address, change_name, confirm_email_address, register};
pub use event::{
    CustomerEmailAddressChanged, CustomerEmailAddressConfirmationFailed,
    CustomerEmailAddressConfirmed, CustomerEvent, CustomerNameChanged, CustomerRegistered,
};
pub use state::{CustomerState, CustomerStatus};
pub use value::{ConfirmationHash, CustomerId, EmailAddress, PersonName};
