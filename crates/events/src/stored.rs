use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value as JsonValue, json};
use thiserror::Error;

use crate::{Event, EventEnvelope};

/// A persisted event record: type discriminator + untyped JSON payload.
///
/// This is the shape events have when they come back from storage or over
/// the wire, before the aggregate's closed event family has been consulted.
/// `decode()` turns it into a typed envelope; `from_envelope()` goes the
/// other way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    /// 1-based position in the aggregate stream.
    pub event_id: u64,
    pub event_type: String,
    pub occurred_at: DateTime<Utc>,
    pub payload: JsonValue,
}

/// Why a stored record could not be turned into a typed event.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("event {event_id}: unsupported event type '{event_type}'")]
    UnknownType { event_id: u64, event_type: String },

    #[error("event {event_id}: malformed '{event_type}' payload: {source}")]
    Payload {
        event_id: u64,
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoredEvent {
    /// Build a stored record from a typed envelope.
    pub fn from_envelope<E>(envelope: &EventEnvelope<E>) -> Result<Self, serde_json::Error>
    where
        E: Event + Serialize,
    {
        let mut tagged = serde_json::to_value(envelope.payload())?;
        let payload = tagged
            .get_mut("data")
            .map(JsonValue::take)
            .unwrap_or(JsonValue::Null);

        Ok(Self {
            event_id: envelope.event_id(),
            event_type: envelope.payload().event_type().to_string(),
            occurred_at: envelope.occurred_at(),
            payload,
        })
    }

    /// Decode into a typed envelope.
    ///
    /// The discriminator is checked against `E::known_types()` first so an
    /// unknown type is reported as such rather than as a payload error.
    pub fn decode<E>(&self) -> Result<EventEnvelope<E>, DecodeError>
    where
        E: Event + DeserializeOwned,
    {
        if !E::known_types().contains(&self.event_type.as_str()) {
            return Err(DecodeError::UnknownType {
                event_id: self.event_id,
                event_type: self.event_type.clone(),
            });
        }

        let tagged = json!({ "type": self.event_type, "data": self.payload });
        let payload = serde_json::from_value(tagged).map_err(|source| DecodeError::Payload {
            event_id: self.event_id,
            event_type: self.event_type.clone(),
            source,
        })?;

        Ok(EventEnvelope::new(self.event_id, self.occurred_at, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", content = "data")]
    enum Ping {
        #[serde(rename = "test.ping")]
        Ping { count: u32 },
    }

    impl Event for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn known_types() -> &'static [&'static str] {
            &["test.ping"]
        }
    }

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 2, 10, 30, 0).unwrap()
    }

    #[test]
    fn from_envelope_strips_the_tag() {
        let stored = StoredEvent::from_envelope(&EventEnvelope::new(1, at(), Ping::Ping { count: 3 })).unwrap();
        assert_eq!(stored.event_type, "test.ping");
        assert_eq!(stored.payload, json!({ "count": 3 }));

        let decoded: EventEnvelope<Ping> = stored.decode().unwrap();
        assert_eq!(decoded.payload(), &Ping::Ping { count: 3 });
        assert_eq!(decoded.occurred_at(), at());
    }

    #[test]
    fn unknown_type_is_distinguished_from_bad_payload() {
        let mut stored = StoredEvent {
            event_id: 1,
            event_type: "test.pong".to_string(),
            occurred_at: at(),
            payload: json!({ "count": 1 }),
        };
        assert!(matches!(stored.decode::<Ping>(), Err(DecodeError::UnknownType { .. })));

        stored.event_type = "test.ping".to_string();
        stored.payload = json!({ "count": "many" });
        assert!(matches!(stored.decode::<Ping>(), Err(DecodeError::Payload { .. })));
    }
}
