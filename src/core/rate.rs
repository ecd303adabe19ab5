//! Exchange rate values and the provider abstraction that supplies them.

use crate::core::currency::Currency;
use crate::core::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// "1 `base` = `rate` `quote`" as of `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExchangeRate {
    base: Currency,
    quote: Currency,
    rate: Decimal,
    timestamp: DateTime<Utc>,
}

impl ExchangeRate {
    // Advisory: construction does not reject these, see DESIGN.md.
    pub const NON_POSITIVE_RATE_ERROR: Error =
        Error::from_static("ExchangeRate.Validation", "Exchange rate must be positive.");
    pub const SAME_CURRENCY_ERROR: Error = Error::from_static(
        "ExchangeRate.Validation",
        "Base and quote currency cannot be the same.",
    );
    pub const ZERO_RATE_ERROR: Error =
        Error::from_static("ExchangeRate.ZeroRate", "Cannot invert a zero rate.");

    pub fn new(
        base: Currency,
        quote: Currency,
        rate: Decimal,
        timestamp: DateTime<Utc>,
    ) -> Result<Self> {
        Ok(Self {
            base,
            quote,
            rate,
            timestamp,
        })
    }

    pub fn base(&self) -> &Currency {
        &self.base
    }

    pub fn quote(&self) -> &Currency {
        &self.quote
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Swaps base and quote, inverting the rate.
    pub fn invert(&self) -> Result<Self> {
        let inverted = Decimal::ONE
            .checked_div(self.rate)
            .ok_or(Self::ZERO_RATE_ERROR)?;
        Self::new(self.quote.clone(), self.base.clone(), inverted, self.timestamp)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1 {} = {} {} @ {}",
            self.base,
            self.rate.normalize(),
            self.quote,
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

/// Source of the base-currency rate table.
#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Current rate table, all entries sharing one base currency. The returned
    /// vector is owned by the caller.
    async fn latest_rates(&self) -> Result<Vec<ExchangeRate>>;

    /// When the table currently served was fetched, if it is still fresh.
    async fn last_update_timestamp(&self) -> Option<DateTime<Utc>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn rate(base: &str, quote: &str, value: Decimal) -> ExchangeRate {
        let timestamp = Utc.with_ymd_and_hms(2024, 5, 7, 0, 0, 0).unwrap();
        ExchangeRate::new(
            Currency::new(base).unwrap(),
            Currency::new(quote).unwrap(),
            value,
            timestamp,
        )
        .unwrap()
    }

    #[test]
    fn test_invert_swaps_and_inverts() {
        let original = rate("EUR", "USD", d("1.25"));
        let inverted = original.invert().unwrap();
        assert_eq!(inverted.base().as_str(), "USD");
        assert_eq!(inverted.quote().as_str(), "EUR");
        assert_eq!(inverted.rate(), d("0.8"));
        assert_eq!(inverted.timestamp(), original.timestamp());
    }

    #[test]
    fn test_double_inversion_round_trips() {
        for value in [d("1.1"), d("130.5"), d("0.0072"), d("7.4613")] {
            let original = rate("EUR", "JPY", value);
            let back = original.invert().unwrap().invert().unwrap();
            assert_eq!(back.base(), original.base());
            assert_eq!(back.quote(), original.quote());
            assert_eq!(back.timestamp(), original.timestamp());
            assert!((back.rate() - value).abs() < d("0.0000000001"));
        }
    }

    #[test]
    fn test_invert_zero_rate_fails() {
        let zero = rate("EUR", "USD", Decimal::ZERO);
        assert_eq!(zero.invert(), Err(ExchangeRate::ZERO_RATE_ERROR));
    }

    #[test]
    fn test_construction_does_not_enforce_advisory_checks() {
        assert!(
            ExchangeRate::new(Currency::eur(), Currency::eur(), d("-1"), Utc::now()).is_ok()
        );
    }

    #[test]
    fn test_display() {
        let r = rate("EUR", "USD", d("1.1000"));
        assert_eq!(r.to_string(), "1 EUR = 1.1 USD @ 2024-05-07T00:00:00Z");
    }
}
