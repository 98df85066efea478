//! Configuration loaded from `motcheck.toml`.
//!
//! [`MotConfig`] carries the DVSA credentials and endpoints. Values missing
//! from the file fall back to sensible defaults; the `DVSA_*` environment
//! variables take precedence over the file for the secrets and the token
//! endpoint, so credentials can stay out of checked-in files.

use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

/// Top-level configuration for one run.
#[derive(Debug, Clone, Deserialize)]
pub struct MotConfig {
    /// OAuth client id issued by DVSA.
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret.
    #[serde(default)]
    pub client_secret: String,

    /// API key sent in the `X-API-Key` header.
    #[serde(default)]
    pub api_key: String,

    /// OAuth scope for the client-credentials grant.
    #[serde(default = "default_scope_url")]
    pub scope_url: String,

    /// OAuth token endpoint (tenant-specific, no useful default).
    #[serde(default)]
    pub token_url: String,

    /// Vehicle-history endpoint base; the registration is appended.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Pause between API calls in milliseconds.
    #[serde(default = "default_pace_ms")]
    pub pace_ms: u64,
}

fn default_scope_url() -> String {
    "https://tapi.dvsa.gov.uk/.default".to_string()
}

fn default_api_base_url() -> String {
    "https://history.mot.api.gov.uk/v1/trade/vehicles/registration".to_string()
}

fn default_pace_ms() -> u64 {
    1000
}

impl Default for MotConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            api_key: String::new(),
            scope_url: default_scope_url(),
            token_url: String::new(),
            api_base_url: default_api_base_url(),
            pace_ms: default_pace_ms(),
        }
    }
}

impl MotConfig {
    /// Load configuration from `path`, using defaults if the file does not
    /// exist, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<MotConfig>(&contents)?
        } else {
            Self::default()
        };

        // Environment takes precedence over the config file.
        for (var, field) in [
            ("DVSA_CLIENT_ID", &mut config.client_id),
            ("DVSA_CLIENT_SECRET", &mut config.client_secret),
            ("DVSA_API_KEY", &mut config.api_key),
            ("DVSA_TOKEN_URL", &mut config.token_url),
        ] {
            if let Ok(value) = std::env::var(var)
                && !value.is_empty()
            {
                *field = value;
            }
        }

        Ok(config)
    }

    /// True when any credential needed for real API calls is absent.
    /// The run still proceeds; affected rows get the auth-failure status.
    pub fn missing_credentials(&self) -> bool {
        self.client_id.is_empty()
            || self.client_secret.is_empty()
            || self.api_key.is_empty()
            || self.token_url.is_empty()
    }
}
