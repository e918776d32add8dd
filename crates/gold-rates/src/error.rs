//! Error types for the gold-rates crate.

use thiserror::Error;

/// Errors raised while retrieving the rates page through the proxy.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level failure (DNS, TLS, connection reset, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The proxy answered with a non-success status code.
    #[error("Proxy returned HTTP {0}")]
    Status(u16),

    /// The proxy response body is not a valid JSON envelope.
    #[error("Failed to decode proxy envelope: {0}")]
    Envelope(String),

    /// The envelope has no usable `contents` field.
    #[error("No content received")]
    NoContent,
}

/// Errors raised while extracting prices from the page HTML.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The document could not be read by the HTML parser.
    #[error("Failed to read HTML document: {0}")]
    Html(String),

    /// One or both purities did not yield a positive price.
    #[error("Could not parse prices (22k: {k22}, 24k: {k24})")]
    MissingPrice {
        /// Extracted 22 carat price (0 when unresolved).
        k22: f64,
        /// Extracted 24 carat price (0 when unresolved).
        k24: f64,
    },
}

/// Top-level error for a complete fetch-and-parse cycle.
#[derive(Debug, Error)]
pub enum GoldError {
    /// Retrieval failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Extraction failed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}
