use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankfold_core::{AccountId, Aggregate, AggregateRoot, CustomerId};
use bankfold_events::{Event, EventEnvelope, StreamError};

use crate::event::{
    AccountCreated, AccountEvent, Activation, Closure, CurrencyChange, Deactivation,
};
use crate::{AccountError, Currency, ReplayConfig};

/// Account status lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Enabled,
    Disabled,
    Closed,
}

impl core::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            AccountStatus::Enabled => "enabled",
            AccountStatus::Disabled => "disabled",
            AccountStatus::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Kind of an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum LogKind {
    Deactivate,
    Activate,
    CurrencyChange,
    Closure,
}

/// One audit log entry (immutable once appended).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate root: Account (snapshot rebuilt from its event stream).
///
/// A fresh instance is created per replay and owns its audit log, so two
/// replays never share state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Account {
    account_id: Option<AccountId>,
    balance: Decimal,
    currency: Option<Currency>,
    pending_currency: Option<Currency>,
    customer_id: Option<CustomerId>,
    status: AccountStatus,
    log: Vec<LogEntry>,
    version: u64,
    #[serde(skip)]
    config: ReplayConfig,
}

impl Account {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(config: ReplayConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn account_id(&self) -> Option<&AccountId> {
        self.account_id.as_ref()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn currency(&self) -> Option<&Currency> {
        self.currency.as_ref()
    }

    /// Currency requested by a change that has not been completed yet.
    pub fn pending_currency(&self) -> Option<&Currency> {
        self.pending_currency.as_ref()
    }

    pub fn customer_id(&self) -> Option<&CustomerId> {
        self.customer_id.as_ref()
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }
}

impl AggregateRoot for Account {
    type Id = AccountId;

    fn id(&self) -> Option<&Self::Id> {
        self.account_id.as_ref()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Account {
    type Event = EventEnvelope<AccountEvent>;
    type Error = AccountError;

    fn apply(&mut self, envelope: &Self::Event) -> Result<(), Self::Error> {
        let event_id = envelope.event_id();
        let at = envelope.occurred_at();
        let event = envelope.payload();
        tracing::debug!(event_id, event_type = event.event_type(), "applying event");

        match event {
            AccountEvent::AccountCreated(e) => self.apply_created(event_id, e),
            AccountEvent::Deposit(e) => self.apply_deposit(event_id, e.amount)?,
            AccountEvent::Withdrawal(e) => self.apply_withdrawal(event_id, e.amount)?,
            AccountEvent::Deactivation(e) => self.apply_deactivation(event_id, e, at),
            AccountEvent::Activation(e) => self.apply_activation(event_id, e, at),
            AccountEvent::CurrencyChange(e) => self.apply_currency_change(event_id, e, at),
            AccountEvent::Closure(e) => self.apply_closure(event_id, e, at),
        }

        self.version += 1;
        Ok(())
    }
}

impl Account {
    fn append_log(&mut self, kind: LogKind, message: impl Into<String>, timestamp: DateTime<Utc>) {
        self.log.push(LogEntry {
            kind,
            message: message.into(),
            timestamp,
        });
    }

    /// Lifecycle events only act on this account, and never on a closed one.
    fn is_targeted(&self, event_id: u64, target: &AccountId) -> bool {
        if self.account_id.as_ref() != Some(target) {
            tracing::debug!(event_id, target = %target, "ignoring lifecycle event for another account");
            return false;
        }
        if self.status == AccountStatus::Closed {
            tracing::warn!(event_id, account_id = %target, "ignoring lifecycle event on closed account");
            return false;
        }
        true
    }

    /// Preconditions checked before any balance rule.
    fn ensure_instantiated(&self, event_id: u64, amount: Decimal) -> Result<(), AccountError> {
        if self.account_id.is_none() {
            return Err(AccountError::AccountUninstantiated { event_id });
        }
        if amount <= Decimal::ZERO {
            return Err(StreamError::corrupted(event_id, format!("amount must be positive, got {amount}")).into());
        }
        Ok(())
    }

    /// Status rules, checked after the balance rules.
    fn ensure_status_allows_transaction(&self, event_id: u64) -> Result<(), AccountError> {
        match self.status {
            AccountStatus::Disabled => Err(AccountError::TransactionRejected {
                event_id,
                status: self.status,
            }),
            AccountStatus::Closed => Err(AccountError::AccountClosed {
                event_id,
                balance: self.balance,
            }),
            AccountStatus::Enabled => Ok(()),
        }
    }

    fn apply_created(&mut self, event_id: u64, e: &AccountCreated) {
        if self.account_id.is_some() {
            tracing::warn!(event_id, account_id = %e.account_id, "account created again, overwriting identity and balance");
        }
        // Status is left alone: a fresh account is already Enabled and a
        // repeated creation must not reopen a closed one.
        self.account_id = Some(e.account_id.clone());
        self.balance = e.initial_balance;
        self.currency = Some(e.currency.clone());
        self.customer_id = Some(e.customer_id.clone());
    }

    fn apply_deposit(&mut self, event_id: u64, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_instantiated(event_id, amount)?;
        let max_balance = self.config.max_balance.unwrap_or(Decimal::MAX);
        let new_balance = match self.balance.checked_add(amount) {
            Some(new_balance) if new_balance <= max_balance => new_balance,
            _ => {
                return Err(AccountError::BalancePolicyViolation {
                    event_id,
                    balance: self.balance,
                    amount,
                    max_balance,
                });
            }
        };
        self.ensure_status_allows_transaction(event_id)?;

        self.balance = new_balance;
        Ok(())
    }

    fn apply_withdrawal(&mut self, event_id: u64, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_instantiated(event_id, amount)?;
        if self.balance < amount {
            return Err(AccountError::BalanceNegative {
                event_id,
                balance: self.balance,
                amount,
            });
        }
        self.ensure_status_allows_transaction(event_id)?;

        self.balance -= amount;
        Ok(())
    }

    fn apply_deactivation(&mut self, event_id: u64, e: &Deactivation, at: DateTime<Utc>) {
        if !self.is_targeted(event_id, &e.account_id) {
            return;
        }
        let reason = e
            .reason
            .clone()
            .unwrap_or_else(|| self.config.default_deactivation_reason.clone());

        self.status = AccountStatus::Disabled;
        self.append_log(LogKind::Deactivate, reason, at);
    }

    fn apply_activation(&mut self, event_id: u64, e: &Activation, at: DateTime<Utc>) {
        if !self.is_targeted(event_id, &e.account_id) {
            return;
        }
        if self.status == AccountStatus::Disabled {
            self.append_log(LogKind::Deactivate, "Deactivation lifted", at);
        }
        // Reactivation completes an in-flight currency change.
        if let Some(pending) = self.pending_currency.take() {
            self.append_log(
                LogKind::CurrencyChange,
                format!("Currency change to '{pending}' completed"),
                at,
            );
            self.currency = Some(pending);
        }

        self.status = AccountStatus::Enabled;
        self.append_log(LogKind::Activate, "Account reactivated", at);
    }

    fn apply_currency_change(&mut self, event_id: u64, e: &CurrencyChange, at: DateTime<Utc>) {
        if !self.is_targeted(event_id, &e.account_id) {
            return;
        }
        let from = self
            .currency
            .as_ref()
            .map(Currency::to_string)
            .unwrap_or_default();
        let message = format!("Change currency from '{from}' to '{}'", e.new_currency);

        self.pending_currency = Some(e.new_currency.clone());
        self.status = AccountStatus::Disabled;
        self.append_log(LogKind::CurrencyChange, message, at);
    }

    fn apply_closure(&mut self, event_id: u64, e: &Closure, at: DateTime<Utc>) {
        if !self.is_targeted(event_id, &e.account_id) {
            return;
        }
        let reason = e
            .reason
            .as_deref()
            .unwrap_or(self.config.default_closure_reason.as_str());
        let message = format!("Reason: {reason}, Closing Balance: '{}'", self.balance);

        self.status = AccountStatus::Closed;
        self.append_log(LogKind::Closure, message, at);
    }
}
