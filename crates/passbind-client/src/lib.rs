//! # passbind-client — Wallet-bound passkeys against Lighthouse
//!
//! Provides typed access to the Lighthouse encryption service endpoints
//! that back wallet-bound passkeys, and the orchestrator that sequences
//! them:
//!
//! - **Messages** via `GET /api/message/{address}`
//! - **Passkeys** via `/passkey/register/*`, `/passkey/login/*`,
//!   `/passkey/delete`
//! - **Ceremonies** ([`CeremonyOrchestrator`]): Register, Login, Delete
//!
//! ## Collaborators
//!
//! The wallet ([`WalletProvider`]) and the platform authenticator
//! ([`PlatformAuthenticator`]) are supplied by the embedding application.
//! This crate never holds a private key and never talks to an authenticator
//! directly.
//!
//! ## Observability
//!
//! Emits `tracing` events with `ceremony`, `stage` and `identity` fields.
//! Wallet signatures and session tokens are never logged. Installing a
//! subscriber is left to the application.

pub mod authenticator;
pub mod ceremony;
pub mod config;
pub mod error;
pub mod messages;
pub mod passkey;
pub mod signature;
pub mod wallet;

pub use authenticator::{AuthenticatorError, PlatformAuthenticator};
pub use ceremony::{Ceremony, CeremonyError, CeremonyOrchestrator, CeremonyStage, Deletion, Registration};
pub use config::{ConfigError, LighthouseConfig};
pub use error::{CeremonyFault, LighthouseApiError};
pub use signature::SignatureProvider;
pub use wallet::{WalletError, WalletProvider};

use std::time::Duration;

/// Top-level Lighthouse client. Holds one sub-client per endpoint family.
#[derive(Debug, Clone)]
pub struct LighthouseClient {
    messages: messages::MessageClient,
    passkeys: passkey::PasskeyClient,
}

impl LighthouseClient {
    /// Create a new Lighthouse client from configuration.
    pub fn new(config: &LighthouseConfig) -> Result<Self, LighthouseApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()
            .map_err(|e| LighthouseApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            messages: messages::MessageClient::new(http.clone(), config.base_url.clone()),
            passkeys: passkey::PasskeyClient::new(http, config.base_url.clone()),
        })
    }

    /// Access the auth-message client.
    pub fn messages(&self) -> &messages::MessageClient {
        &self.messages
    }

    /// Access the passkey client.
    pub fn passkeys(&self) -> &passkey::PasskeyClient {
        &self.passkeys
    }
}

/// `base` with `segments` appended as escaped path segments.
pub(crate) fn endpoint_url(base: &url::Url, segments: &[&str]) -> Result<url::Url, LighthouseApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| {
            ConfigError::InvalidUrl(base.to_string(), "URL cannot be used as a base".into())
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Pass 2xx responses through; turn anything else into an `ApiError`
/// carrying the server's body.
pub(crate) async fn ensure_success(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, LighthouseApiError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(endpoint, status, "Lighthouse returned an error status");
    Err(LighthouseApiError::ApiError {
        endpoint: endpoint.into(),
        status,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_appends_segments() {
        let base: url::Url = "https://encryption.lighthouse.storage".parse().unwrap();
        let url = endpoint_url(&base, &["passkey", "login", "start"]).unwrap();
        assert_eq!(url.as_str(), "https://encryption.lighthouse.storage/passkey/login/start");
    }

    #[test]
    fn endpoint_url_keeps_base_path_and_escapes() {
        let base: url::Url = "http://127.0.0.1:9000/lh/".parse().unwrap();
        let url = endpoint_url(&base, &["api", "message", "0xab/cd"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/lh/api/message/0xab%2Fcd");
    }
}
