//! ISO-4217 currency codes.

use crate::core::error::{Error, Result, failure};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A validated, uppercase three-letter currency code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency {
    code: String,
}

impl Currency {
    pub const VALIDATION_ERROR: Error = Error::from_static(
        "Currency.Validation",
        "Invalid currency ISO code. Must be 3 uppercase letters.",
    );

    /// Validates `code` and normalizes it to uppercase. Surrounding
    /// whitespace is ignored.
    pub fn new(code: &str) -> Result<Self> {
        let code = code.trim().to_ascii_uppercase();
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
            return failure(Self::VALIDATION_ERROR);
        }
        Ok(Self { code })
    }

    /// The feed's base currency.
    pub fn eur() -> Self {
        Self {
            code: "EUR".to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes_are_uppercased() {
        for (input, expected) in [("USD", "USD"), ("eur", "EUR"), ("gBp", "GBP"), (" jpy ", "JPY")] {
            let currency = Currency::new(input).unwrap();
            assert_eq!(currency.as_str(), expected);
            assert_eq!(currency.to_string(), expected);
        }
    }

    #[test]
    fn test_invalid_codes_fail_validation() {
        for input in ["", "   ", "US", "USDX", "U5D", "12A", "€UR", "U D", "ÄBC"] {
            let result = Currency::new(input);
            assert_eq!(
                result,
                Err(Currency::VALIDATION_ERROR),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_equality_ignores_input_case() {
        assert_eq!(Currency::new("usd").unwrap(), Currency::new("USD").unwrap());
        assert_ne!(Currency::new("USD").unwrap(), Currency::new("CAD").unwrap());
        assert_eq!(Currency::eur(), "eur".parse::<Currency>().unwrap());
    }

    #[test]
    fn test_serde_validates() {
        let currency: Currency = serde_yaml::from_str("chf").unwrap();
        assert_eq!(currency.as_str(), "CHF");
        assert!(serde_yaml::from_str::<Currency>("swiss").is_err());
        assert_eq!(serde_json::to_string(&currency).unwrap(), "\"CHF\"");
    }
}
