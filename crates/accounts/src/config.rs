//! Replay settings: balance policy, stream strictness and audit defaults.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bankfold_core::DomainError;
use bankfold_events::SequenceCheck;

pub const MAX_BALANCE_ENV: &str = "BANKFOLD_MAX_BALANCE";
pub const STRICT_SEQUENCE_ENV: &str = "BANKFOLD_STRICT_SEQUENCE";

/// Settings applied while folding an account stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Ceiling a deposit may not push the balance past. `None` means unbounded.
    pub max_balance: Option<Decimal>,
    pub sequence_check: SequenceCheck,
    /// Audit message used when a deactivation event carries no reason.
    pub default_deactivation_reason: String,
    /// Reason recorded in the closure audit entry when the event carries none.
    pub default_closure_reason: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            max_balance: None,
            sequence_check: SequenceCheck::LastOnly,
            default_deactivation_reason: "Account deactivated".to_string(),
            default_closure_reason: "Customer request".to_string(),
        }
    }
}

impl ReplayConfig {
    /// Defaults overlaid with `BANKFOLD_MAX_BALANCE` and `BANKFOLD_STRICT_SEQUENCE`.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DomainError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(MAX_BALANCE_ENV) {
            let max = Decimal::from_str(raw.trim())
                .map_err(|e| DomainError::validation(format!("{MAX_BALANCE_ENV}: {e}")))?;
            if max.is_sign_negative() {
                return Err(DomainError::validation(format!(
                    "{MAX_BALANCE_ENV}: must not be negative"
                )));
            }
            config.max_balance = Some(max);
        }

        if let Some(raw) = lookup(STRICT_SEQUENCE_ENV) {
            let strict = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(DomainError::validation(format!(
                        "{STRICT_SEQUENCE_ENV}: expected a boolean, got '{other}'"
                    )));
                }
            };
            if strict {
                config.sequence_check = SequenceCheck::Contiguous;
            }
        }

        Ok(config)
    }

    pub fn with_max_balance(mut self, max_balance: Decimal) -> Self {
        self.max_balance = Some(max_balance);
        self
    }

    pub fn with_sequence_check(mut self, check: SequenceCheck) -> Self {
        self.sequence_check = check;
        self
    }
}
