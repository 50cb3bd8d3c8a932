use customer_es_core::AggregateId;

/// A command targets a specific aggregate (command abstraction).
///
/// Commands represent **intent**. They are transient (never persisted) and are
/// turned into zero or more events by the aggregate. Unlike events, a command
/// may be rejected or may turn out to be a no-op.
///
/// Commands must be cloneable and own all their data so they can be retried
/// after an optimistic concurrency conflict.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn target_aggregate_id(&self) -> AggregateId;
}
