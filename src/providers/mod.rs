pub mod ecb;
pub mod http;
pub mod util;

pub use ecb::EcbRateProvider;
pub use http::HttpFeedFetcher;
