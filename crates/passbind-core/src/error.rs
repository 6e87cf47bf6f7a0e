//! # Error Types
//!
//! Errors raised by the pure, I/O-free layer: the codec, the credential
//! shape adapter, and identity construction. All derive `thiserror`.

use thiserror::Error;

/// Failure decoding base64url text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input contained characters outside the base64url alphabet, or had a
    /// length no base64 encoding can produce.
    #[error("malformed base64url input {input:?}: {reason}")]
    MalformedEncoding { input: String, reason: String },
}

/// Failure reshaping server options into platform options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// A credential identifier from the server was not valid base64url.
    #[error("credential identifier is not valid base64url: {0}")]
    MalformedEncoding(#[from] CodecError),

    /// The server listed no usable credential for this identity.
    #[error("server returned no credentialID in allowCredentials[0]")]
    MissingCredentialId,
}

/// Failure constructing an [`Identity`](crate::Identity).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("wallet address is empty")]
    Empty,

    #[error("wallet address contains whitespace: {0:?}")]
    Whitespace(String),
}
