//! Infrastructure layer: event store and command dispatch for customers.
//!
//! The domain crates never see this layer; it is the collaborator that loads
//! a customer's history, runs a command against it and appends the outcome.

pub mod command_dispatcher;
pub mod config;
pub mod event_store;

pub use command_dispatcher::{CommandDispatcher, DispatchError};
pub use config::{ConfigError, DispatcherConfig};
pub use event_store::{EventStore, EventStoreError, InMemoryEventStore, StoredEvent, UncommittedEvent};
