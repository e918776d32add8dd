//! Gold-rate pipeline on the dashboard side.
//!
//! [`fetcher`] schedules retrievals through a [`RateSource`] and reports
//! [`GoldUpdate`]s; [`panel`] folds them into what the gold widget shows,
//! including the offline fallback.

pub mod fetcher;
pub mod panel;

pub use fetcher::{fetch_update, FetchGate, FetchState, FetchTicket, GoldFetcher, GoldUpdate, RateSource};
pub use panel::{GoldPanel, GoldStatus};

use std::time::Duration;

use gold_rates::{FetchError, GoldClient};
use tracing::warn;

use crate::config::schema::{parse_period, GoldConfig};

/// Request timeout used when the configured one is invalid or zero.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Builds the HTTP client for the configured proxy and page.
pub fn client_from_config(config: &GoldConfig) -> Result<GoldClient, FetchError> {
    let timeout = parse_period("gold.timeout", &config.timeout).unwrap_or_else(|e| {
        warn!(error = %e, "using default gold request timeout");
        DEFAULT_TIMEOUT
    });
    GoldClient::new(config.proxy_url.clone(), config.url.clone(), timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_uses_configured_urls() {
        let config = GoldConfig {
            proxy_url: "https://relay.test/get".to_string(),
            url: "https://rates.test/page".to_string(),
            ..GoldConfig::default()
        };
        let client = client_from_config(&config).expect("client");
        assert_eq!(
            client.request_url(),
            "https://relay.test/get?url=https%3A%2F%2Frates.test%2Fpage"
        );
    }

    #[test]
    fn bad_timeout_falls_back() {
        let config = GoldConfig {
            timeout: "whenever".to_string(),
            ..GoldConfig::default()
        };
        assert!(client_from_config(&config).is_ok());
    }
}
