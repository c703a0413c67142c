/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - part of a **closed** family: every variant has a stable type name
/// - designed to be **append-only**
///
/// Implementors serialize with serde's adjacent tagging,
/// `#[serde(tag = "type", content = "data")]`, using the same names that
/// `event_type` returns. `StoredEvent::decode` relies on that layout.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "account.deposited").
    fn event_type(&self) -> &'static str;

    /// Every type identifier this event family can decode.
    fn known_types() -> &'static [&'static str];
}
