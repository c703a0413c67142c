//! Bank account aggregate (event-sourced).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. Callers
//! hand over an already-ordered event stream for one account and get back
//! either the reconstructed snapshot or the first failure.

pub mod account;
pub mod config;
pub mod currency;
pub mod error;
pub mod event;
pub mod replay;

pub use account::{Account, AccountStatus, LogEntry, LogKind};
pub use config::ReplayConfig;
pub use currency::Currency;
pub use error::{AccountError, ErrorKind};
pub use event::{
    AccountCreated, AccountEvent, Activation, Closure, CurrencyChange, Deactivation, Deposit,
    Withdrawal,
};
pub use replay::{reconstruct, reconstruct_stored, reconstruct_stored_with, reconstruct_with};
