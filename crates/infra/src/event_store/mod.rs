//! Append-only event store boundary.
//!
//! One stream per aggregate id. Streams are returned in append order and
//! appends are guarded by an optimistic version check.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryEventStore;
pub use r#trait::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};
