//! Public replay entry points.

use bankfold_core::{Aggregate, AggregateRoot};
use bankfold_events::{EventEnvelope, StoredEvent, rehydrate, validate_stream};

use crate::{Account, AccountError, AccountEvent, ReplayConfig};

/// Rebuild an account from its ordered event stream with default settings.
pub fn reconstruct(events: &[EventEnvelope<AccountEvent>]) -> Result<Account, AccountError> {
    reconstruct_with(&ReplayConfig::default(), events)
}

/// Rebuild an account from its ordered event stream.
///
/// Fails with the first violated rule; the partially built account is never
/// returned.
pub fn reconstruct_with(
    config: &ReplayConfig,
    events: &[EventEnvelope<AccountEvent>],
) -> Result<Account, AccountError> {
    let account = rehydrate(Account::empty(config.clone()), events, config.sequence_check)?;
    log_reconstructed(&account);
    Ok(account)
}

/// Rebuild an account from stored records (type discriminator + JSON payload).
pub fn reconstruct_stored(events: &[StoredEvent]) -> Result<Account, AccountError> {
    reconstruct_stored_with(&ReplayConfig::default(), events)
}

/// Like `reconstruct_with`, decoding each record just before it is applied.
///
/// Records are decoded lazily so that the reported failure is always the
/// first one in stream order, whether it is a decoding or a business failure.
pub fn reconstruct_stored_with(
    config: &ReplayConfig,
    events: &[StoredEvent],
) -> Result<Account, AccountError> {
    validate_stream(events, config.sequence_check)?;

    let mut account = Account::empty(config.clone());
    for stored in events {
        let envelope = stored.decode::<AccountEvent>().inspect_err(|err| {
            tracing::warn!(event_id = stored.event_id, error = %err, "failed to decode stored event");
        })?;
        account.apply(&envelope).inspect_err(|err| {
            tracing::warn!(event_id = stored.event_id, error = %err, "replay rejected event");
        })?;
    }

    log_reconstructed(&account);
    Ok(account)
}

fn log_reconstructed(account: &Account) {
    tracing::info!(
        account_id = ?account.account_id().map(|id| id.as_str()),
        events = account.version(),
        balance = %account.balance(),
        status = %account.status(),
        "account reconstructed"
    );
}
