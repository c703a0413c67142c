use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankfold_core::{AccountId, CustomerId};
use bankfold_events::Event;

use crate::Currency;

/// Event: AccountCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreated {
    pub account_id: AccountId,
    pub initial_balance: Decimal,
    pub currency: Currency,
    pub customer_id: CustomerId,
}

/// Event: Deposit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub amount: Decimal,
}

/// Event: Withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrawal {
    pub amount: Decimal,
}

/// Event: Deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deactivation {
    pub account_id: AccountId,
    /// Human-readable reason recorded in the audit log.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Event: Activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activation {
    pub account_id: AccountId,
}

/// Event: CurrencyChange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyChange {
    pub account_id: AccountId,
    pub new_currency: Currency,
}

/// Event: Closure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closure {
    pub account_id: AccountId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Closed set of events in a bank account stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AccountEvent {
    #[serde(rename = "account.created")]
    AccountCreated(AccountCreated),
    #[serde(rename = "account.deposited")]
    Deposit(Deposit),
    #[serde(rename = "account.withdrawn")]
    Withdrawal(Withdrawal),
    #[serde(rename = "account.deactivated")]
    Deactivation(Deactivation),
    #[serde(rename = "account.activated")]
    Activation(Activation),
    #[serde(rename = "account.currency_changed")]
    CurrencyChange(CurrencyChange),
    #[serde(rename = "account.closed")]
    Closure(Closure),
}

const EVENT_TYPES: &[&str] = &[
    "account.created",
    "account.deposited",
    "account.withdrawn",
    "account.deactivated",
    "account.activated",
    "account.currency_changed",
    "account.closed",
];

impl Event for AccountEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AccountEvent::AccountCreated(_) => EVENT_TYPES[0],
            AccountEvent::Deposit(_) => EVENT_TYPES[1],
            AccountEvent::Withdrawal(_) => EVENT_TYPES[2],
            AccountEvent::Deactivation(_) => EVENT_TYPES[3],
            AccountEvent::Activation(_) => EVENT_TYPES[4],
            AccountEvent::CurrencyChange(_) => EVENT_TYPES[5],
            AccountEvent::Closure(_) => EVENT_TYPES[6],
        }
    }

    fn known_types() -> &'static [&'static str] {
        EVENT_TYPES
    }
}
