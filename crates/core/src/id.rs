//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are opaque strings assigned upstream (e.g. `"ACC123456"`); the
//! only rule enforced here is that they are not blank.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a bank account aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

/// Identifier of the customer owning an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CustomerId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            /// Create an identifier, rejecting blank values.
            pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: must not be blank", $name)));
                }
                Ok(Self(value))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<String> for $t {
            type Error = DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$t> for String {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

impl_string_newtype!(AccountId, "AccountId");
impl_string_newtype!(CustomerId, "CustomerId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_ids_are_rejected() {
        assert!(matches!(AccountId::new(""), Err(DomainError::InvalidId(_))));
        assert!(matches!("   ".parse::<CustomerId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn ids_round_trip_through_strings() {
        let id: AccountId = "A1".parse().unwrap();
        assert_eq!(id.as_str(), "A1");
        assert_eq!(id.to_string(), "A1");
        assert_eq!(String::from(id), "A1");
    }
}
