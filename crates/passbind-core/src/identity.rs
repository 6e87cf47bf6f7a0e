//! # Session Newtypes
//!
//! Newtype wrappers for the values that flow between ceremonies. None of
//! these are bare strings: an [`Identity`] cannot be passed where a
//! [`WalletSignature`] is expected, and a [`CredentialId`] is always the
//! server's own text, never a re-encoding of decoded bytes.
//!
//! ## Secret Handling
//!
//! [`WalletSignature`] and [`SessionToken`] are bearer credentials. Both keep
//! their contents in [`Zeroizing`] storage and redact themselves in `Debug`
//! output so they cannot leak through tracing fields.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::IdentityError;

/// Lowercase wallet address used by the server as the account key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Build an identity from a wallet address in any casing.
    ///
    /// Surrounding whitespace is trimmed and the address is lowercased.
    pub fn new(address: &str) -> Result<Self, IdentityError> {
        let trimmed = address.trim();
        if trimmed.is_empty() {
            return Err(IdentityError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(IdentityError::Whitespace(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Identity {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Chain id reported by the wallet on connect (e.g. `"0x1"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub String);

impl ChainId {
    /// Numeric value of the chain id. Accepts `0x`-prefixed hex or decimal.
    pub fn as_u64(&self) -> Option<u64> {
        let raw = self.0.trim();
        match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => raw.parse().ok(),
        }
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_u64() {
            Some(n) => write!(f, "{n}"),
            None => f.write_str(&self.0),
        }
    }
}

/// Base64url credential identifier exactly as the server issued it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialId(pub String);

impl CredentialId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wallet signature over a server-issued auth message.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletSignature(Zeroizing<String>);

impl WalletSignature {
    pub fn new(signature: impl Into<String>) -> Self {
        Self(Zeroizing::new(signature.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for WalletSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WalletSignature([REDACTED])")
    }
}

impl Serialize for WalletSignature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Opaque token returned by a successful login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// `Authorization` header value for this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.as_str())
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}
