//! Aggregate root traits for event-sourced domain models.

/// Aggregate root marker + minimal interface.
///
/// Deliberately small: modules decide how they model state transitions
/// without bringing in any infrastructure concerns.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier, if the aggregate has been created.
    ///
    /// Rehydration starts from an empty instance, so an aggregate has no
    /// identity until its creation event has been applied.
    fn id(&self) -> Option<&Self::Id>;

    /// Number of events applied to this instance.
    fn version(&self) -> u64;
}

/// Event application semantics (pure, deterministic).
///
/// `apply(&mut self, event)` evolves state and may reject the event. A rejected
/// event leaves the aggregate unusable for the current replay: callers must
/// stop folding and surface the error.
///
/// Aggregates must not perform IO or side effects.
pub trait Aggregate: AggregateRoot {
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Evolve in-memory state from a single event.
    ///
    /// Implementations bump `version()` by exactly one per accepted event.
    fn apply(&mut self, event: &Self::Event) -> Result<(), Self::Error>;
}
