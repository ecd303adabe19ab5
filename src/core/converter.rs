use crate::core::currency::Currency;
use crate::core::error::{Error, Result};
use crate::core::money::Money;
use crate::core::resolver::RateResolver;
use tracing::debug;

/// Converts amounts between currencies using rates from a [`RateResolver`].
#[derive(Clone)]
pub struct AmountConverter {
    resolver: RateResolver,
}

impl AmountConverter {
    pub const GET_RATE_FAILED: Error = Error::from_static(
        "ConvertAmount.GetRateFailed",
        "Failed to get exchange rate for conversion.",
    );
    pub const OVERFLOW: Error = Error::from_static(
        "ConvertAmount.Overflow",
        "Converted amount is out of range.",
    );

    pub fn new(resolver: RateResolver) -> Self {
        Self { resolver }
    }

    pub async fn convert(&self, source: &Money, target: &Currency) -> Result<Money> {
        if source.is_zero() {
            return Ok(Money::zero(target.clone()));
        }
        if source.currency() == target {
            return Ok(source.clone());
        }

        let rate = self
            .resolver
            .resolve(source.currency(), target)
            .await
            .map_err(|e| Self::GET_RATE_FAILED.wrap(&e))?;

        let amount = source
            .amount()
            .checked_mul(rate.rate())
            .ok_or(Self::OVERFLOW)?;
        debug!(%source, %target, %amount, "Converted amount");
        Ok(Money::new(amount, target.clone()))
    }
}
