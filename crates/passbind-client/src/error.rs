//! Error types for the Lighthouse client and the ceremonies built on it.
//!
//! Two layers:
//!
//! - [`LighthouseApiError`]: one failed HTTP exchange (transport, status,
//!   body decoding, configuration).
//! - [`CeremonyFault`]: why a ceremony step failed, in domain terms. A
//!   transport failure becomes [`CeremonyFault::NetworkFault`].

use passbind_core::{AdapterError, CodecError, Identity, IdentityError};

use crate::authenticator::AuthenticatorError;
use crate::wallet::WalletError;

/// Errors from Lighthouse API calls.
#[derive(Debug, thiserror::Error)]
pub enum LighthouseApiError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Lighthouse returned a non-2xx status.
    #[error("Lighthouse {endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl LighthouseApiError {
    /// The server's error payload when it sent one, else the transport text.
    pub fn payload(&self) -> String {
        match self {
            Self::ApiError { body, .. } if !body.is_empty() => body.clone(),
            Self::ApiError { status, .. } => format!("HTTP {status}"),
            Self::Http { source, .. } | Self::Deserialization { source, .. } => source.to_string(),
            Self::Config(e) => e.to_string(),
        }
    }

    /// HTTP status, for errors that got as far as a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::Http { source, .. } | Self::Deserialization { source, .. } => {
                source.status().map(|s| s.as_u16())
            }
            Self::Config(_) => None,
        }
    }
}

/// Why a ceremony step failed.
#[derive(Debug, thiserror::Error)]
pub enum CeremonyFault {
    /// Transport or HTTP-level failure talking to Lighthouse.
    #[error("network fault: {0}")]
    NetworkFault(#[from] LighthouseApiError),

    /// A server-supplied identifier was not valid base64url.
    #[error("malformed encoding: {0}")]
    MalformedEncoding(CodecError),

    /// The message endpoint returned no message to sign.
    #[error("no auth message available for {identity}")]
    NoChallengeAvailable { identity: Identity },

    /// The wallet user declined to sign.
    #[error("wallet rejected the signature request: {0}")]
    SignatureRejected(String),

    /// Any other wallet failure (unavailable, account access denied, ...).
    #[error("wallet error: {0}")]
    Wallet(WalletError),

    /// The platform authenticator refused or was cancelled.
    #[error("authenticator fault: {0}")]
    AuthenticatorFault(#[from] AuthenticatorError),

    /// `register/finish` answered with an empty or falsy body.
    #[error("registration was not successful")]
    RegistrationFailed,

    /// `login/finish` answered without a token.
    #[error("login failed: no token in response")]
    LoginFailed,

    /// `login/start` named no enrolled credential for this identity.
    #[error("no enrolled credential for this identity")]
    MissingCredentialId,

    /// No wallet is connected.
    #[error("no wallet connected")]
    NotConnected,

    /// The wallet granted access but listed no accounts.
    #[error("wallet returned no accounts")]
    NoAccounts,

    /// The wallet's account is not a usable identity.
    #[error("invalid wallet address: {0}")]
    InvalidIdentity(#[from] IdentityError),

    /// The session was replaced or cleared while the ceremony ran.
    #[error("session changed while the ceremony was in flight")]
    SessionChanged,
}

impl From<AdapterError> for CeremonyFault {
    fn from(e: AdapterError) -> Self {
        match e {
            AdapterError::MalformedEncoding(inner) => Self::MalformedEncoding(inner),
            AdapterError::MissingCredentialId => Self::MissingCredentialId,
        }
    }
}
