use customer_es_core::AggregateId;

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **ordered** by their position in the stream, not by wall-clock time
/// - designed to be **append-only**
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "customer.registered").
    fn event_type(&self) -> &'static str;

    /// The aggregate whose stream this event belongs to.
    fn aggregate_id(&self) -> AggregateId;
}
