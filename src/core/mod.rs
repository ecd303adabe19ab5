//! Rate resolution domain: values, errors and the engine around them

pub mod cache;
pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod feed;
pub mod log;
pub mod money;
pub mod rate;
pub mod resolver;

// Re-export main types for cleaner imports
pub use cache::RateCache;
pub use converter::AmountConverter;
pub use currency::Currency;
pub use error::{Error, Result, failure};
pub use feed::{FeedFetcher, FeedResponse, FetchError};
pub use money::Money;
pub use rate::{ExchangeRate, RateProvider};
pub use resolver::RateResolver;
