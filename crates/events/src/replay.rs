//! Generic fold of a validated event stream into an aggregate.

use bankfold_core::Aggregate;

use crate::stream::{SequenceCheck, Sequenced, StreamError, validate_stream};

/// Rebuild an aggregate by applying `events` in order.
///
/// This function:
/// 1. Validates stream-level preconditions (`validate_stream`)
/// 2. Applies every event to `aggregate`, front to back
/// 3. Stops at the first rejected event and returns its error
///
/// There is no partial result: on error the aggregate is dropped.
pub fn rehydrate<A>(mut aggregate: A, events: &[A::Event], check: SequenceCheck) -> Result<A, A::Error>
where
    A: Aggregate,
    A::Event: Sequenced,
    A::Error: From<StreamError>,
{
    validate_stream(events, check)?;

    for event in events {
        if let Err(err) = aggregate.apply(event) {
            tracing::warn!(
                event_id = event.event_id(),
                version = aggregate.version(),
                error = ?err,
                "replay rejected event"
            );
            return Err(err);
        }
    }

    tracing::debug!(events = events.len(), version = aggregate.version(), "replay complete");
    Ok(aggregate)
}
