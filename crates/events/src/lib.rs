//! Event plumbing shared by event-sourced aggregates.
//!
//! Envelopes, tagged stored records, stream validation and the generic fold
//! live here; aggregates themselves live in their own crates.

pub mod envelope;
pub mod event;
pub mod replay;
pub mod stored;
pub mod stream;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use replay::rehydrate;
pub use stored::{DecodeError, StoredEvent};
pub use stream::{SequenceCheck, Sequenced, StreamError, validate_stream};
