use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope for an event, containing stream metadata.
///
/// Notes:
/// - `event_id` is the 1-based position of the event in its aggregate stream.
///   It is used for integrity checks only, never for business logic.
/// - `occurred_at` is business time; aggregates use it to timestamp audit
///   entries instead of reading the clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: u64,
    occurred_at: DateTime<Utc>,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: u64, occurred_at: DateTime<Utc>, payload: E) -> Self {
        Self {
            event_id,
            occurred_at,
            payload,
        }
    }

    pub fn event_id(&self) -> u64 {
        self.event_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
