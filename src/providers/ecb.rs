use crate::core::config::ECB_DAILY_URL;
use crate::core::{
    Currency, Error, ExchangeRate, FeedFetcher, FetchError, RateCache, RateProvider, Result,
    failure,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use roxmltree::{Document, Node};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

const ECB_NAMESPACE: &str = "http://www.ecb.int/vocabulary/2002-08-01/eurofxref";

/// Euro foreign exchange reference rates published daily by the ECB.
pub struct EcbRateProvider {
    url: String,
    fetcher: Arc<dyn FeedFetcher>,
    cache: RateCache,
}

impl EcbRateProvider {
    pub const CURRENCY_PARSING_ERROR: Error = Error::from_static(
        "EcbProvider.CurrencyEntityParse",
        "Failed to parse CurrencyEntity attribute in ECB XML.",
    );
    pub const HTTP_ERROR: Error =
        Error::from_static("EcbProvider.Http", "Failed to fetch data from ECB URL.");
    pub const NO_RATES_FOUND_ERROR: Error = Error::from_static(
        "EcbProvider.NoRates",
        "No exchange rates found in the ECB XML data.",
    );
    pub const RATE_PARSING_ERROR: Error = Error::from_static(
        "EcbProvider.RateParse",
        "Failed to parse rate attribute in ECB XML.",
    );
    pub const XML_PARSING_ERROR: Error =
        Error::from_static("EcbProvider.Xml", "Failed to parse ECB XML data.");

    pub fn new(fetcher: Arc<dyn FeedFetcher>, cache: RateCache) -> Self {
        EcbRateProvider {
            url: ECB_DAILY_URL.to_string(),
            fetcher,
            cache,
        }
    }

    /// Points the provider at a different copy of the daily feed.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    #[instrument(name = "EcbRatesFetch", skip(self), fields(url = %self.url))]
    async fn fetch_and_parse(&self) -> Result<Vec<ExchangeRate>> {
        debug!("Requesting reference rates from {}", self.url);
        let response = self.fetcher.get(&self.url).await.map_err(|e| match e {
            FetchError::Timeout | FetchError::Transport(_) => {
                Self::HTTP_ERROR.with_detail(format_args!("Details: {e}"))
            }
            FetchError::Unexpected(_) => {
                Self::HTTP_ERROR.with_detail(format_args!("Unexpected error: {e}"))
            }
        })?;

        if !response.is_success() {
            return failure(
                Self::HTTP_ERROR.with_detail(format_args!("Status code: {}", response.status)),
            );
        }

        let xml = std::str::from_utf8(&response.body)
            .map_err(|e| Self::XML_PARSING_ERROR.with_detail(format_args!("Details: {e}")))?;
        let rates = parse_daily_rates(xml)?;
        debug!("Parsed {} reference rates", rates.len());
        Ok(rates)
    }
}

#[async_trait]
impl RateProvider for EcbRateProvider {
    async fn latest_rates(&self) -> Result<Vec<ExchangeRate>> {
        if let Some(cached) = self.cache.get().await {
            return Ok(cached);
        }

        // The lock is not held here, so concurrent callers on a cold cache
        // may each fetch. The last successful fetch wins.
        let rates = self.fetch_and_parse().await?;
        Ok(self.cache.put(rates).await)
    }

    async fn last_update_timestamp(&self) -> Option<DateTime<Utc>> {
        self.cache.fresh_timestamp().await
    }
}

fn is_cube(node: &Node) -> bool {
    node.is_element()
        && node.tag_name().name() == "Cube"
        && node.tag_name().namespace() == Some(ECB_NAMESPACE)
}

fn attribute<'a>(node: &Node<'a, '_>, names: [&str; 2]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| node.attribute(*name))
        .filter(|value| !value.trim().is_empty())
}

fn parse_snapshot_time(raw: Option<&str>) -> DateTime<Utc> {
    let raw = raw.unwrap_or_default().trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.with_timezone(&Utc)))
        .unwrap_or_else(|e| {
            debug!(
                "Could not parse snapshot time '{}' ({}). Falling back to today.",
                raw, e
            );
            Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc()
        })
}

fn parse_rate_value(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Parses the `gesmes:Envelope` document of the daily feed into EUR based rates.
pub(crate) fn parse_daily_rates(xml: &str) -> Result<Vec<ExchangeRate>> {
    let xml = xml.trim_start_matches('\u{feff}');
    let doc = Document::parse(xml).map_err(|e| {
        EcbRateProvider::XML_PARSING_ERROR.with_detail(format_args!("Details: {e}"))
    })?;

    let daily_cube = doc
        .descendants()
        .find(|node| is_cube(node) && node.has_attribute("time"))
        .ok_or(EcbRateProvider::XML_PARSING_ERROR)?;
    let timestamp = parse_snapshot_time(daily_cube.attribute("time"));

    let mut rates: Vec<ExchangeRate> = Vec::new();
    for rate_cube in daily_cube.children().filter(is_cube) {
        let (Some(code), Some(raw_rate)) = (
            attribute(&rate_cube, ["currency", "Currency"]),
            attribute(&rate_cube, ["rate", "Rate"]),
        ) else {
            warn!(
                "Skipping rate cube at {:?} due to missing currency or rate attribute",
                doc.text_pos_at(rate_cube.range().start)
            );
            continue;
        };

        let quote = Currency::new(code).map_err(|_| {
            EcbRateProvider::CURRENCY_PARSING_ERROR.with_detail(format_args!("Code: {code}"))
        })?;

        let rate = parse_rate_value(raw_rate).ok_or_else(|| {
            EcbRateProvider::RATE_PARSING_ERROR
                .with_detail(format_args!("Code: {code}, Value: '{raw_rate}'"))
        })?;

        if rates.iter().any(|r| r.quote() == &quote) {
            warn!("Ignoring repeated rate for {quote}, keeping the first entry");
            continue;
        }
        rates.push(ExchangeRate::new(Currency::eur(), quote, rate, timestamp)?);
    }

    if rates.is_empty() {
        return failure(EcbRateProvider::NO_RATES_FOUND_ERROR);
    }
    Ok(rates)
}
