//! Platform authenticator seam.
//!
//! Wraps whatever performs WebAuthn `create`/`get` on this device: a
//! browser bridge, an OS passkey API, or a CTAP2 transport. Options come in
//! already reshaped by [`passbind_core::adapter`]; credentials go out as raw
//! bytes and are encoded by the orchestrator.

use std::sync::Arc;

use async_trait::async_trait;
use passbind_core::{
    PlatformAssertion, PlatformAttestation, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialRequestOptions,
};

/// Errors reported by a platform authenticator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticatorError {
    /// The user dismissed the prompt.
    #[error("user cancelled the authenticator prompt")]
    Cancelled,
    /// The platform refused the operation (`NotAllowedError`).
    #[error("operation not allowed: {0}")]
    NotAllowed(String),
    /// No authenticator is present on this device.
    #[error("no authenticator available")]
    NoAuthenticator,
    #[error("{0}")]
    Other(String),
}

/// Device authenticator able to create and assert passkeys.
#[async_trait]
pub trait PlatformAuthenticator: Send + Sync {
    /// Create a new credential (registration ceremony).
    async fn create(
        &self,
        options: &PublicKeyCredentialCreationOptions,
    ) -> Result<PlatformAttestation, AuthenticatorError>;

    /// Assert an existing credential (authentication ceremony).
    async fn get(
        &self,
        options: &PublicKeyCredentialRequestOptions,
    ) -> Result<PlatformAssertion, AuthenticatorError>;
}

#[async_trait]
impl<T: PlatformAuthenticator + ?Sized> PlatformAuthenticator for Arc<T> {
    async fn create(
        &self,
        options: &PublicKeyCredentialCreationOptions,
    ) -> Result<PlatformAttestation, AuthenticatorError> {
        (**self).create(options).await
    }

    async fn get(
        &self,
        options: &PublicKeyCredentialRequestOptions,
    ) -> Result<PlatformAssertion, AuthenticatorError> {
        (**self).get(options).await
    }
}
