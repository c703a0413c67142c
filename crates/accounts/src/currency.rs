use core::str::FromStr;
use serde::{Deserialize, Serialize};

use bankfold_core::DomainError;

/// Settlement currency, as a three-letter upper-case code (e.g. "USD").
///
/// Formatting and exchange rules are not modelled; the code is only compared
/// and shown in audit messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    pub fn new(code: impl Into<String>) -> Result<Self, DomainError> {
        let code = code.into();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(DomainError::validation(format!(
                "currency code must be three upper-case letters, got '{code}'"
            )));
        }
        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Currency> for String {
    fn from(value: Currency) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_iso_style_codes() {
        assert_eq!("SEK".parse::<Currency>().unwrap().code(), "SEK");
    }

    #[test]
    fn rejects_malformed_codes() {
        for code in ["usd", "US", "USDT", "U$D", ""] {
            assert!(
                matches!(Currency::new(code), Err(DomainError::Validation(_))),
                "{code} should be rejected"
            );
        }
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<Currency>("\"EUR\"").is_ok());
        assert!(serde_json::from_str::<Currency>("\"euro\"").is_err());
    }
}
