//! OAuth client-credentials token provider for the DVSA API.
//!
//! [`TokenProvider`] performs the form-encoded token exchange and caches the
//! resulting bearer token for the lifetime of the process, refreshing it once
//! the cached expiry passes. A 60-second margin is subtracted from the
//! reported lifetime so a token is never handed out right before it lapses
//! mid-request.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use super::error::AuthError;
use super::types::TokenResponse;

/// Safety margin subtracted from the reported token lifetime, in seconds.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Credentials for the client-credentials grant.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
}

/// Anything that can produce a bearer token. Implemented by
/// [`TokenProvider`]; tests substitute canned implementations.
#[allow(async_fn_in_trait)]
pub trait TokenSource {
    async fn bearer_token(&self) -> Result<String, AuthError>;
}

struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Obtains and caches an OAuth bearer token.
///
/// The cache is held behind an async mutex kept locked across the exchange,
/// so even with concurrent callers at most one refresh is in flight.
pub struct TokenProvider {
    http: Client,
    token_url: String,
    credentials: ClientCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(token_url: String, credentials: ClientCredentials) -> Self {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            token_url,
            credentials,
            cached: Mutex::new(None),
        }
    }

    /// Exchange credentials for a fresh token. The cache is not touched
    /// here; a failed exchange must leave any previous state unchanged.
    async fn exchange(&self) -> Result<CachedToken, AuthError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("scope", self.credentials.scope.as_str()),
        ];

        let response = self.http.post(&self.token_url).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::TokenEndpoint {
                status: status.as_u16(),
            });
        }

        let body = response.json::<TokenResponse>().await?;
        Ok(CachedToken {
            value: body.access_token,
            expires_at: expiry_from(Utc::now(), body.expires_in),
        })
    }
}

/// Expiry instant for a token issued at `now` with the reported lifetime.
fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    now + chrono::Duration::seconds(expires_in - EXPIRY_MARGIN_SECS)
}

impl TokenSource for TokenProvider {
    /// Return the cached token while it is still valid, otherwise perform
    /// one exchange and cache the result.
    async fn bearer_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && Utc::now() < token.expires_at
        {
            return Ok(token.value.clone());
        }

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credentials() -> ClientCredentials {
        ClientCredentials {
            client_id: "client-1".into(),
            client_secret: "secret-1".into(),
            scope: "https://tapi.dvsa.gov.uk/.default".into(),
        }
    }

    async fn mount_token(server: &MockServer, expires_in: i64, expected_calls: u64) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=client-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "tok-abc",
                "expires_in": expires_in,
            })))
            .expect(expected_calls)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn token_is_reused_while_valid() {
        let server = MockServer::start().await;
        mount_token(&server, 3600, 1).await;

        let provider = TokenProvider::new(format!("{}/token", server.uri()), credentials());
        let first = provider.bearer_token().await.unwrap();
        let second = provider.bearer_token().await.unwrap();

        assert_eq!(first, "tok-abc");
        assert_eq!(second, "tok-abc");
        // expect(1) on the mock verifies no second exchange happened.
    }

    #[tokio::test]
    async fn expired_token_triggers_exactly_one_refresh_per_call() {
        let server = MockServer::start().await;
        // expires_in of 60 minus the margin leaves a zero lifetime, so the
        // cached token is already expired on the next call.
        mount_token(&server, 60, 2).await;

        let provider = TokenProvider::new(format!("{}/token", server.uri()), credentials());
        provider.bearer_token().await.unwrap();
        provider.bearer_token().await.unwrap();
    }

    #[tokio::test]
    async fn endpoint_failure_surfaces_as_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let provider = TokenProvider::new(format!("{}/token", server.uri()), credentials());
        let err = provider.bearer_token().await.unwrap_err();
        assert!(matches!(err, AuthError::TokenEndpoint { status: 500 }));
    }

    #[tokio::test]
    async fn malformed_body_surfaces_as_network_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = TokenProvider::new(format!("{}/token", server.uri()), credentials());
        let err = provider.bearer_token().await.unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
    }

    #[test]
    fn expiry_subtracts_the_margin() {
        let now = Utc::now();
        assert_eq!(
            expiry_from(now, 3600),
            now + chrono::Duration::seconds(3540)
        );
        // A lifetime at or below the margin yields an already-passed expiry.
        assert!(expiry_from(now, 60) <= now);
    }
}
