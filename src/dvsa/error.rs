//! Error types for the DVSA API clients.
//!
//! [`AuthError`] covers the OAuth token exchange, [`DvsaError`] the
//! vehicle-history lookup. Both use `thiserror` so the resolver can match
//! on variants without string inspection.

use thiserror::Error;

/// Failure to obtain an access token from the OAuth endpoint.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned status {status}")]
    TokenEndpoint { status: u16 },

    /// Transport failure or a malformed token response body.
    /// Wraps the underlying `reqwest` error via `#[from]`.
    #[error("token request failed: {0}")]
    Network(#[from] reqwest::Error),
}

/// Failure modes of a vehicle-history lookup.
#[derive(Debug, Error)]
pub enum DvsaError {
    /// The API returned HTTP 404 — no record for this registration.
    #[error("vehicle not found")]
    NotFound,

    /// Any other non-success HTTP status.
    #[error("API returned status {status}")]
    Api { status: u16 },

    /// Transport failure (DNS, connection refused, timeout) or a body
    /// that failed to decode as JSON.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
}
