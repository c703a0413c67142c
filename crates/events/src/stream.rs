//! Stream-level integrity checks run before any event is applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{EventEnvelope, StoredEvent};

/// Why an event stream cannot be replayed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("event stream is empty")]
    Empty,

    /// The last event id does not match the stream length (gap or truncation).
    #[error("last event id {last_event_id} does not match stream length {len}")]
    LengthMismatch { last_event_id: u64, len: usize },

    /// An intermediate event id does not match its 1-based position.
    #[error("event at position {position} has id {found}")]
    OutOfSequence { position: u64, found: u64 },

    /// An event is structurally valid but cannot belong to a well-formed stream.
    #[error("event {event_id} is corrupted: {reason}")]
    Corrupted { event_id: u64, reason: String },
}

impl StreamError {
    pub fn corrupted(event_id: u64, reason: impl Into<String>) -> Self {
        Self::Corrupted {
            event_id,
            reason: reason.into(),
        }
    }
}

/// How thoroughly positional ids are verified.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceCheck {
    /// Only the last id is compared with the stream length. O(1).
    #[default]
    LastOnly,
    /// Every id must equal its 1-based position. O(n).
    Contiguous,
}

/// Anything carrying a positional event id.
pub trait Sequenced {
    fn event_id(&self) -> u64;
}

impl<E> Sequenced for EventEnvelope<E> {
    fn event_id(&self) -> u64 {
        EventEnvelope::event_id(self)
    }
}

impl Sequenced for StoredEvent {
    fn event_id(&self) -> u64 {
        self.event_id
    }
}

/// Validate stream-level preconditions: non-empty and gap-free.
///
/// Assumes ids are 1-based and assigned without gaps by the store.
pub fn validate_stream<T: Sequenced>(events: &[T], check: SequenceCheck) -> Result<(), StreamError> {
    let Some(last) = events.last() else {
        return Err(StreamError::Empty);
    };

    if check == SequenceCheck::Contiguous {
        for (idx, event) in events.iter().enumerate() {
            let position = idx as u64 + 1;
            if event.event_id() != position {
                return Err(StreamError::OutOfSequence {
                    position,
                    found: event.event_id(),
                });
            }
        }
    }

    if last.event_id() != events.len() as u64 {
        return Err(StreamError::LengthMismatch {
            last_event_id: last.event_id(),
            len: events.len(),
        });
    }

    Ok(())
}
