//! # gold-rates
//!
//! Retail gold price scraping for the landing dashboard.
//!
//! The rates page is fetched through a relay proxy (the page does not allow
//! cross-origin reads), its tables are scanned for the 22 and 24 carat
//! single-gram prices, and the results are formatted for display.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gold_rates::{GoldClient, DEFAULT_PROXY_URL, DEFAULT_TARGET_URL};
//! use std::time::Duration;
//!
//! let client = GoldClient::new(DEFAULT_PROXY_URL, DEFAULT_TARGET_URL, Duration::from_secs(10))?;
//! let rates = gold_rates::fetch_rates(&client).await?;
//! println!("22k: {}", rates.k22);
//! ```

pub mod client;
pub mod error;
pub mod format;
pub mod parse;
pub mod types;

pub use client::{
    decode_envelope, proxy_request_url, GoldClient, DEFAULT_PROXY_URL, DEFAULT_TARGET_URL,
};
pub use error::{FetchError, GoldError, ParseError};
pub use format::{format_money, Grouping};
pub use parse::{leading_number, parse_price_text, parse_rates};
pub use types::{GoldRates, Purity, WEIGHT_PRESETS};

/// Fetches the rates page and extracts both unit prices.
pub async fn fetch_rates(client: &GoldClient) -> Result<GoldRates, GoldError> {
    let html = client.fetch_page().await?;
    Ok(parse_rates(&html)?)
}
