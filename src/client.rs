//! Entry point for callers working with raw currency codes.

use crate::core::config::AppConfig;
use crate::core::{
    AmountConverter, Currency, ExchangeRate, Money, RateCache, RateProvider, RateResolver, Result,
};
use crate::providers::{EcbRateProvider, HttpFeedFetcher};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::instrument;

/// Validates currency codes and dispatches to the resolver and converter.
#[derive(Clone)]
pub struct ConverterClient {
    provider: Arc<dyn RateProvider>,
    resolver: RateResolver,
    converter: AmountConverter,
}

impl ConverterClient {
    /// Builds a client that reads the ECB feed over HTTP, as configured.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFeedFetcher::new(&config.feed)?;
        let provider = EcbRateProvider::new(Arc::new(fetcher), RateCache::new(config.cache.ttl()))
            .with_url(config.feed.url.as_str());
        Ok(Self::with_provider(Arc::new(provider)))
    }

    pub fn with_provider(provider: Arc<dyn RateProvider>) -> Self {
        let resolver = RateResolver::new(provider.clone());
        let converter = AmountConverter::new(resolver.clone());
        Self {
            provider,
            resolver,
            converter,
        }
    }

    #[instrument(skip(self))]
    pub async fn convert(&self, from: &str, to: &str, amount: Decimal) -> Result<Money> {
        let (from, to) = parse_pair(from, to)?;
        let source = Money::new(amount, from);
        self.converter.convert(&source, &to).await
    }

    #[instrument(skip(self))]
    pub async fn exchange_rate(&self, from: &str, to: &str) -> Result<ExchangeRate> {
        let (from, to) = parse_pair(from, to)?;
        self.resolver.resolve(&from, &to).await
    }

    pub async fn last_rate_update_timestamp(&self) -> Option<DateTime<Utc>> {
        self.provider.last_update_timestamp().await
    }

    /// The full base-currency table as currently served by the provider.
    pub async fn latest_rates(&self) -> Result<Vec<ExchangeRate>> {
        self.provider.latest_rates().await
    }
}

fn parse_pair(from: &str, to: &str) -> Result<(Currency, Currency)> {
    let from = Currency::new(from)?;
    let to = Currency::new(to)?;
    Ok((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::core::resolver::tests::{StaticRateProvider, d, table_timestamp};

    fn client(provider: &Arc<StaticRateProvider>) -> ConverterClient {
        ConverterClient::with_provider(provider.clone())
    }

    #[tokio::test]
    async fn test_convert_rejects_invalid_codes() {
        let provider = Arc::new(StaticRateProvider::with_rates(&[("USD", "1.1")]));
        let client = client(&provider);

        for (from, to) in [("XX", "EUR"), ("USD", "EURO"), ("", "")] {
            let err = client.convert(from, to, d("10")).await.unwrap_err();
            assert_eq!(err, Currency::VALIDATION_ERROR);
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_convert_succeeds() {
        let provider = Arc::new(StaticRateProvider::with_rates(&[("USD", "1.1")]));
        let money = client(&provider)
            .convert("usd", "eur", d("11"))
            .await
            .unwrap();
        assert_eq!(money.currency(), &Currency::eur());
        assert!((money.amount() - d("10")).abs() < d("0.0000001"));
    }

    #[tokio::test]
    async fn test_exchange_rate_rejects_invalid_codes() {
        let provider = Arc::new(StaticRateProvider::with_rates(&[]));
        let client = client(&provider);
        assert_eq!(
            client.exchange_rate("U$D", "EUR").await,
            Err(Currency::VALIDATION_ERROR)
        );
        assert_eq!(
            client.exchange_rate("USD", "1UR").await,
            Err(Currency::VALIDATION_ERROR)
        );
    }

    #[tokio::test]
    async fn test_exchange_rate_succeeds() {
        let provider = Arc::new(StaticRateProvider::with_rates(&[("USD", "1.1")]));
        let rate = client(&provider).exchange_rate("USD", "EUR").await.unwrap();
        assert!((rate.rate() - Decimal::ONE / d("1.1")).abs() < d("0.0001"));
        assert_eq!(rate.timestamp(), table_timestamp());
    }

    #[tokio::test]
    async fn test_provider_errors_surface_through_facade() {
        let provider = Arc::new(StaticRateProvider::failing(Error::new("Feed.Down", "down")));
        let client = client(&provider);

        let err = client.exchange_rate("USD", "GBP").await.unwrap_err();
        assert_eq!(err.code(), "GetExchangeRate.ProviderError");

        let err = client.convert("USD", "GBP", d("1")).await.unwrap_err();
        assert_eq!(err.code(), "ConvertAmount.GetRateFailed");
        assert!(err.message().ends_with("Details: down"));
    }

    #[tokio::test]
    async fn test_last_rate_update_timestamp_delegates() {
        let provider = Arc::new(StaticRateProvider::with_rates(&[]));
        assert!(client(&provider).last_rate_update_timestamp().await.is_none());
    }
}
