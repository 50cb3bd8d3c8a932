//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: two email
/// addresses holding the same text are the same address. To "modify" one,
/// build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct PersonName {
///     given_name: String,
///     family_name: String,
/// }
///
/// impl ValueObject for PersonName {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
