//! Monetary amounts tagged with their currency.

use crate::core::currency::Currency;
use crate::core::error::{Error, Result, failure};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    pub const MISMATCH_ERROR: Error = Error::from_static(
        "Money.Mismatch",
        "Cannot add Money of different currencies.",
    );
    pub const OVERFLOW_ERROR: Error =
        Error::from_static("Money.Overflow", "Sum is out of the representable range.");

    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Checked addition - fails if currencies don't match.
    pub fn checked_add(&self, other: &Money) -> Result<Money> {
        if self.currency != other.currency {
            return failure(Self::MISMATCH_ERROR);
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(Self::OVERFLOW_ERROR)?;
        Ok(Money::new(amount, self.currency.clone()))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let amount = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{amount:.2} {}", self.currency)
    }
}
