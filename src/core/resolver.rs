use crate::core::currency::Currency;
use crate::core::error::{Error, Result, failure};
use crate::core::rate::{ExchangeRate, RateProvider};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Derives the rate between any two currencies from a table quoted against EUR.
#[derive(Clone)]
pub struct RateResolver {
    provider: Arc<dyn RateProvider>,
}

impl RateResolver {
    pub const PROVIDER_ERROR: Error = Error::from_static(
        "GetExchangeRate.ProviderError",
        "Failed to retrieve rates from the provider.",
    );
    pub const RATE_NOT_FOUND: Error = Error::from_static(
        "GetExchangeRate.NotFound",
        "Required currency rate not found in provider data.",
    );
    pub const INVALID_STORED_RATE_CODE: &'static str = "GetExchangeRate.InvalidStoredRate";
    pub const ZERO_RATE_CODE: &'static str = "GetExchangeRate.ZeroRate";

    pub fn new(provider: Arc<dyn RateProvider>) -> Self {
        Self { provider }
    }

    pub async fn resolve(&self, from: &Currency, to: &Currency) -> Result<ExchangeRate> {
        if from == to {
            let timestamp = self
                .provider
                .last_update_timestamp()
                .await
                .unwrap_or_else(Utc::now);
            return ExchangeRate::new(from.clone(), to.clone(), Decimal::ONE, timestamp);
        }

        let rates = self
            .provider
            .latest_rates()
            .await
            .map_err(|e| Self::PROVIDER_ERROR.wrap(&e))?;

        let table_timestamp = rates.first().map_or_else(Utc::now, ExchangeRate::timestamp);
        let mut rates_vs_eur: HashMap<&Currency, Decimal> = HashMap::with_capacity(rates.len());
        for rate in &rates {
            rates_vs_eur.entry(rate.quote()).or_insert(rate.rate());
        }

        let from_rate = rate_vs_eur(from, &rates_vs_eur)?;
        let to_rate = rate_vs_eur(to, &rates_vs_eur)?;

        if from_rate.is_zero() {
            return failure(zero_rate(from));
        }
        let cross_rate = to_rate.checked_div(from_rate).ok_or_else(|| zero_rate(from))?;
        debug!(%from, %to, %cross_rate, "Resolved cross rate");

        ExchangeRate::new(from.clone(), to.clone(), cross_rate, table_timestamp)
    }
}

fn rate_vs_eur(currency: &Currency, rates_vs_eur: &HashMap<&Currency, Decimal>) -> Result<Decimal> {
    if *currency == Currency::eur() {
        return Ok(Decimal::ONE);
    }

    match rates_vs_eur.get(currency) {
        Some(rate) if *rate <= Decimal::ZERO => failure(Error::new(
            RateResolver::INVALID_STORED_RATE_CODE,
            format!("Stored rate for '{currency}' is not positive."),
        )),
        Some(rate) => Ok(*rate),
        None => failure(
            RateResolver::RATE_NOT_FOUND.with_detail(format_args!("Currency: {currency}")),
        ),
    }
}

fn zero_rate(currency: &Currency) -> Error {
    Error::new(
        RateResolver::ZERO_RATE_CODE,
        format!("Rate for base currency '{currency}' is zero."),
    )
}
