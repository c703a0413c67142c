//! Replay failure taxonomy.

use rust_decimal::Decimal;
use thiserror::Error;

use bankfold_events::{DecodeError, StreamError};

use crate::AccountStatus;

/// Why an account stream could not be replayed.
///
/// Every variant is terminal: the fold stopped at the event named by
/// `event_id` and the partially built snapshot was discarded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("invalid event stream: {0}")]
    EventStreamInvalid(#[from] StreamError),

    #[error("event {event_id}: event type '{event_type}' is not supported")]
    EventTypeNotSupported { event_id: u64, event_type: String },

    #[error("event {event_id}: account has not been created")]
    AccountUninstantiated { event_id: u64 },

    #[error(
        "event {event_id}: deposit of {amount} would raise balance {balance} above maximum {max_balance}"
    )]
    BalancePolicyViolation {
        event_id: u64,
        balance: Decimal,
        amount: Decimal,
        max_balance: Decimal,
    },

    #[error("event {event_id}: withdrawal of {amount} exceeds balance {balance}")]
    BalanceNegative {
        event_id: u64,
        balance: Decimal,
        amount: Decimal,
    },

    #[error("event {event_id}: transaction rejected, account is {status}")]
    TransactionRejected { event_id: u64, status: AccountStatus },

    #[error("event {event_id}: account is closed (balance {balance})")]
    AccountClosed { event_id: u64, balance: Decimal },
}

/// Context-free classification of an `AccountError`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EventStreamInvalid,
    EventTypeNotSupported,
    AccountUninstantiated,
    BalancePolicyViolation,
    BalanceNegative,
    TransactionRejected,
    AccountClosed,
}

impl AccountError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountError::EventStreamInvalid(_) => ErrorKind::EventStreamInvalid,
            AccountError::EventTypeNotSupported { .. } => ErrorKind::EventTypeNotSupported,
            AccountError::AccountUninstantiated { .. } => ErrorKind::AccountUninstantiated,
            AccountError::BalancePolicyViolation { .. } => ErrorKind::BalancePolicyViolation,
            AccountError::BalanceNegative { .. } => ErrorKind::BalanceNegative,
            AccountError::TransactionRejected { .. } => ErrorKind::TransactionRejected,
            AccountError::AccountClosed { .. } => ErrorKind::AccountClosed,
        }
    }

    /// Id of the event that failed, when the failure is tied to one event.
    pub fn event_id(&self) -> Option<u64> {
        match self {
            AccountError::EventStreamInvalid(StreamError::Corrupted { event_id, .. }) => Some(*event_id),
            AccountError::EventStreamInvalid(StreamError::OutOfSequence { position, .. }) => Some(*position),
            AccountError::EventStreamInvalid(_) => None,
            AccountError::EventTypeNotSupported { event_id, .. }
            | AccountError::AccountUninstantiated { event_id }
            | AccountError::BalancePolicyViolation { event_id, .. }
            | AccountError::BalanceNegative { event_id, .. }
            | AccountError::TransactionRejected { event_id, .. }
            | AccountError::AccountClosed { event_id, .. } => Some(*event_id),
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            ErrorKind::EventStreamInvalid => "event_stream_invalid",
            ErrorKind::EventTypeNotSupported => "event_type_not_supported",
            ErrorKind::AccountUninstantiated => "account_uninstantiated",
            ErrorKind::BalancePolicyViolation => "balance_policy_violation",
            ErrorKind::BalanceNegative => "balance_negative",
            ErrorKind::TransactionRejected => "transaction_rejected",
            ErrorKind::AccountClosed => "account_closed",
        };
        f.write_str(name)
    }
}

impl From<DecodeError> for AccountError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnknownType {
                event_id,
                event_type,
            } => AccountError::EventTypeNotSupported {
                event_id,
                event_type,
            },
            DecodeError::Payload {
                event_id, source, ..
            } => AccountError::EventStreamInvalid(StreamError::corrupted(event_id, source.to_string())),
        }
    }
}
