//! Lighthouse client configuration.
//!
//! Configures the service base URL and ceremony behaviour. Defaults point
//! to production. Override via environment variables or explicit
//! construction for staging/testing.

use passbind_core::CredentialLookup;
use url::Url;

/// Production Lighthouse encryption service.
pub const DEFAULT_BASE_URL: &str = "https://encryption.lighthouse.storage";

/// Device label sent with `register/finish`.
pub const DEFAULT_DEVICE_NAME: &str = "MY Phone";

/// Configuration for the Lighthouse passkey client and orchestrator.
#[derive(Debug, Clone)]
pub struct LighthouseConfig {
    /// Base URL for the message and passkey endpoints.
    /// Default: <https://encryption.lighthouse.storage>
    pub base_url: Url,
    /// HTTP request timeout in seconds. Wallet and authenticator prompts
    /// are not bounded by this.
    pub timeout_secs: u64,
    /// Label the server stores alongside a newly registered passkey.
    pub device_name: String,
    /// What to do when `login/start` names no credential.
    pub credential_lookup: CredentialLookup,
}

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl LighthouseConfig {
    /// Production endpoints with default ceremony behaviour.
    pub fn production() -> Result<Self, ConfigError> {
        Self::with_base_url("production", DEFAULT_BASE_URL)
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `LIGHTHOUSE_BASE_URL` (default: `https://encryption.lighthouse.storage`)
    /// - `LIGHTHOUSE_TIMEOUT_SECS` (default: 30)
    /// - `LIGHTHOUSE_DEVICE_NAME` (default: `MY Phone`)
    /// - `LIGHTHOUSE_LENIENT_LOOKUP` (`1`/`true` to enable; default strict)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("LIGHTHOUSE_BASE_URL", DEFAULT_BASE_URL)?,
            timeout_secs: std::env::var("LIGHTHOUSE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            device_name: std::env::var("LIGHTHOUSE_DEVICE_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string()),
            credential_lookup: match std::env::var("LIGHTHOUSE_LENIENT_LOOKUP").as_deref() {
                Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") => CredentialLookup::Lenient,
                _ => CredentialLookup::Strict,
            },
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    pub fn local_mock(uri: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            timeout_secs: 5,
            ..Self::with_base_url("mock", uri)?
        })
    }

    fn with_base_url(name: &str, raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(name, raw)?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            device_name: DEFAULT_DEVICE_NAME.to_string(),
            credential_lookup: CredentialLookup::Strict,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_base_url(var, &raw)
}

fn parse_base_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
