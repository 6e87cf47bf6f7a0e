//! # passbind-core — Wallet-Bound Passkey Primitives
//!
//! The I/O-free half of passbind. Everything a ceremony needs to reshape
//! data lives here; everything that talks to a network, a wallet, or an
//! authenticator lives in `passbind-client`.
//!
//! ## Modules
//!
//! - [`codec`]: base64url encode/decode for authenticator buffers.
//! - [`options`]: server challenge objects and platform ceremony options.
//! - [`credential`]: platform credentials and their JSON wire forms.
//! - [`adapter`]: conversions between the two, per ceremony.
//! - [`identity`]: `Identity`, `ChainId`, `CredentialId`, `WalletSignature`,
//!   `SessionToken` newtypes.
//! - [`session`]: the connected-wallet session context.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `passbind-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod adapter;
pub mod codec;
pub mod credential;
pub mod error;
pub mod identity;
pub mod options;
pub mod session;

pub use adapter::{
    creation_options, enrolled_credential_id, request_options, serialize_credential,
    CredentialLookup, EncodeResponse, PreparedAssertion,
};
pub use credential::{
    AssertionResponse, AttestationResponse, AuthenticationCredential, PlatformAssertion,
    PlatformAttestation, PlatformCredential, RegistrationCredential, SerializableCredential,
    SerializedAssertion, SerializedAttestation,
};
pub use error::{AdapterError, CodecError, IdentityError};
pub use identity::{ChainId, CredentialId, Identity, SessionToken, WalletSignature};
pub use options::{
    ByteArrayJson, PublicKeyCredentialCreationOptions, PublicKeyCredentialDescriptor,
    PublicKeyCredentialRequestOptions, PublicKeyCredentialUserEntity, ServerAllowCredential,
    ServerCreationOptions, ServerRequestOptions, ServerUserEntity, PUBLIC_KEY_TYPE,
};
pub use session::Session;
