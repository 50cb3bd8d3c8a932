//! Command execution pipeline for the customer aggregate.
//!
//! ```text
//! Command
//!   ↓
//! 1. Load the customer's stream
//!   ↓
//! 2. Decode and rehydrate (unknown event types are skipped, malformed
//!    histories are rejected)
//!   ↓
//! 3. Decide (pure, 0 or 1 events)
//!   ↓
//! 4. Append with an optimistic check against the loaded stream version
//! ```
//!
//! Losing the race in step 4 means another writer appended in between; the
//! whole pipeline is re-run against the fresh history, up to
//! `DispatcherConfig::max_conflict_retries` times.

use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use customer_es_core::{Aggregate, AggregateId, DomainError, ExpectedVersion};
use customer_es_customer::{Customer, CustomerCommand, CustomerEvent, CustomerId, CustomerState};
use customer_es_events::{Event, EventEnvelope};

use crate::config::DispatcherConfig;
use crate::event_store::{EventStore, EventStoreError, StoredEvent, UncommittedEvent};

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Optimistic concurrency failure that outlived the retry budget.
    #[error("optimistic concurrency conflict: {0}")]
    Concurrency(String),
    /// Domain conflict (e.g. registering an existing customer).
    #[error("conflict: {0}")]
    Conflict(String),
    /// Malformed history or a command sent to the wrong stream.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    /// The command targets a customer that was never registered.
    #[error("not found")]
    NotFound,
    /// A stored payload of a known event type could not be decoded.
    #[error("failed to decode stored event: {0}")]
    Deserialize(String),
    #[error(transparent)]
    Store(EventStoreError),
}

impl From<EventStoreError> for DispatchError {
    fn from(value: EventStoreError) -> Self {
        match value {
            EventStoreError::Concurrency(msg) => DispatchError::Concurrency(msg),
            other => DispatchError::Store(other),
        }
    }
}

impl From<DomainError> for DispatchError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::InvariantViolation(msg) => DispatchError::InvariantViolation(msg),
            DomainError::Conflict(msg) => DispatchError::Conflict(msg),
            DomainError::NotFound => DispatchError::NotFound,
        }
    }
}

/// Runs customer commands against an event store.
#[derive(Debug)]
pub struct CommandDispatcher<S> {
    store: S,
    config: DispatcherConfig,
}

impl<S> CommandDispatcher<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, DispatcherConfig::default())
    }

    pub fn with_config(store: S, config: DispatcherConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }
}

impl<S> CommandDispatcher<S>
where
    S: EventStore,
{
    /// Dispatch a command and return the committed events (possibly none).
    pub fn dispatch(
        &self,
        command: CustomerCommand,
    ) -> Result<Vec<EventEnvelope<CustomerEvent>>, DispatchError> {
        let mut attempt = 0u32;
        loop {
            match self.try_dispatch(&command) {
                Err(DispatchError::Concurrency(msg))
                    if attempt < self.config.max_conflict_retries =>
                {
                    attempt += 1;
                    warn!(
                        customer_id = %command.customer_id(),
                        attempt,
                        reason = %msg,
                        "concurrent append detected, retrying command"
                    );
                }
                result => return result,
            }
        }
    }

    /// Load and project a customer's current state.
    pub fn load(&self, customer_id: CustomerId) -> Result<CustomerState, DispatchError> {
        let history = self.history(customer_id)?;
        let state = CustomerState::project(history.iter().map(EventEnvelope::payload))?;
        Ok(state)
    }

    /// Load a customer's decoded history in stream order.
    pub fn history(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<EventEnvelope<CustomerEvent>>, DispatchError> {
        let aggregate_id = customer_id.aggregate_id();
        let stream = self.store.load_stream(aggregate_id)?;
        validate_loaded_stream(aggregate_id, &stream)?;
        decode_stream(&stream)
    }

    fn try_dispatch(
        &self,
        command: &CustomerCommand,
    ) -> Result<Vec<EventEnvelope<CustomerEvent>>, DispatchError> {
        let customer_id = command.customer_id();
        let aggregate_id = customer_id.aggregate_id();

        // 1) Load
        let stream = self.store.load_stream(aggregate_id)?;
        validate_loaded_stream(aggregate_id, &stream)?;
        let expected = ExpectedVersion::Exact(stream_version(&stream));

        // 2) Rehydrate, rejecting malformed histories the same way `load` does
        let decoded = decode_stream(&stream)?;
        let customer =
            Customer::from_history(customer_id, decoded.iter().map(EventEnvelope::payload))?;

        // 3) Decide
        let decided = customer.handle(command)?;
        if decided.is_empty() {
            debug!(%customer_id, "command is a no-op for the current state");
            return Ok(vec![]);
        }

        // 4) Append
        let uncommitted = decided
            .iter()
            .map(|ev| UncommittedEvent::from_typed(&self.config.aggregate_type, Uuid::now_v7(), ev))
            .collect::<Result<Vec<_>, _>>()?;

        let committed = self.store.append(uncommitted, expected)?;

        for (stored, ev) in committed.iter().zip(&decided) {
            info!(
                %customer_id,
                sequence_number = stored.sequence_number,
                event_type = ev.event_type(),
                "customer event appended"
            );
        }

        Ok(committed
            .into_iter()
            .zip(decided)
            .map(|(stored, ev)| {
                EventEnvelope::new(
                    stored.aggregate_id,
                    stored.aggregate_type,
                    stored.sequence_number,
                    ev,
                )
            })
            .collect())
    }
}

fn stream_version(stream: &[StoredEvent]) -> u64 {
    stream.last().map_or(0, StoredEvent::stream_version)
}

fn validate_loaded_stream(
    aggregate_id: AggregateId,
    stream: &[StoredEvent],
) -> Result<(), DispatchError> {
    // A buggy backend must not be able to mix streams or reorder history.
    let mut last = 0u64;
    for (idx, e) in stream.iter().enumerate() {
        if e.aggregate_id != aggregate_id {
            return Err(DispatchError::InvariantViolation(format!(
                "loaded stream contains wrong aggregate_id at index {idx}"
            )));
        }
        if e.sequence_number <= last {
            return Err(DispatchError::Store(EventStoreError::InvalidAppend(format!(
                "non-monotonic sequence_number in loaded stream (last={last}, found={})",
                e.sequence_number
            ))));
        }
        last = e.sequence_number;
    }
    Ok(())
}

fn decode_stream(stream: &[StoredEvent]) -> Result<Vec<EventEnvelope<CustomerEvent>>, DispatchError> {
    let mut decoded = Vec::with_capacity(stream.len());
    for stored in stream {
        if !CustomerEvent::is_known_type(&stored.event_type) {
            debug!(
                aggregate_id = %stored.aggregate_id,
                sequence_number = stored.sequence_number,
                event_type = %stored.event_type,
                "skipping unknown event type"
            );
            continue;
        }

        let event: CustomerEvent = serde_json::from_value(stored.payload.clone())
            .map_err(|e| DispatchError::Deserialize(format!("{}: {e}", stored.event_type)))?;
        decoded.push(stored.to_envelope().map(|_| event));
    }
    Ok(decoded)
}
