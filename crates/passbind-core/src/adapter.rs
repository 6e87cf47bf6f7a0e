//! # Credential Shape Adapter
//!
//! Converts between the server's JSON challenge objects and the structures a
//! platform authenticator works with, in both directions:
//!
//! - **Inbound**: [`creation_options`] (Register) and [`request_options`]
//!   (Login) rebuild raw byte buffers from numeric arrays.
//! - **Outbound**: [`serialize_credential`] base64url-encodes every binary
//!   field of a [`PlatformCredential`], with the response shape fixed by the
//!   ceremony through [`EncodeResponse`].
//!
//! ## Single Credential per Identity
//!
//! Only `allowCredentials[0]` is ever used. Whatever else the server lists
//! is dropped.
//!
//! ## Original Credential Identifier
//!
//! [`request_options`] returns the server's `credentialID` text untouched
//! alongside the decoded bytes. The `login/finish` and `delete` endpoints
//! expect that exact text back, so it must never be re-encoded from the
//! decoded buffer.

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::credential::{
    AssertionResponse, AttestationResponse, PlatformCredential, SerializableCredential,
    SerializedAssertion, SerializedAttestation,
};
use crate::error::AdapterError;
use crate::identity::CredentialId;
use crate::options::{
    PublicKeyCredentialCreationOptions, PublicKeyCredentialDescriptor,
    PublicKeyCredentialRequestOptions, PublicKeyCredentialUserEntity, ServerCreationOptions,
    ServerRequestOptions, PUBLIC_KEY_TYPE,
};

/// Index of the `allowCredentials` entry every ceremony uses.
pub const SELECTED_CREDENTIAL_INDEX: usize = 0;

/// How to treat a `login/start` response that names no credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialLookup {
    /// Fail with [`AdapterError::MissingCredentialId`].
    #[default]
    Strict,
    /// Continue with an absent identifier and let the server decide.
    Lenient,
}

/// Login options ready for the platform, plus the server's identifier text.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedAssertion {
    pub options: PublicKeyCredentialRequestOptions,
    /// `None` only under [`CredentialLookup::Lenient`].
    pub credential_id: Option<CredentialId>,
}

// -- Inbound ------------------------------------------------------------------

/// Reshape `register/start` output for a platform `create` call.
pub fn creation_options(server: ServerCreationOptions) -> PublicKeyCredentialCreationOptions {
    PublicKeyCredentialCreationOptions {
        challenge: server.challenge.into_bytes(),
        user: PublicKeyCredentialUserEntity {
            id: server.user.id.into_bytes(),
            extra: server.user.extra,
        },
        extra: server.extra,
    }
}

/// Reshape `login/start` output for a platform `get` call.
pub fn request_options(
    server: ServerRequestOptions,
    lookup: CredentialLookup,
) -> Result<PreparedAssertion, AdapterError> {
    let credential_id = enrolled_credential_id(&server, lookup)?;
    let raw_id = credential_id
        .as_ref()
        .map(|id| codec::decode(id.as_str()))
        .transpose()?;

    Ok(PreparedAssertion {
        options: PublicKeyCredentialRequestOptions {
            challenge: server.challenge.into_bytes(),
            allow_credentials: vec![PublicKeyCredentialDescriptor {
                kind: PUBLIC_KEY_TYPE.to_string(),
                id: raw_id,
            }],
            extra: server.extra,
        },
        credential_id,
    })
}

/// The enrolled credential identifier named by a `login/start` response.
///
/// Empty strings count as missing.
pub fn enrolled_credential_id(
    server: &ServerRequestOptions,
    lookup: CredentialLookup,
) -> Result<Option<CredentialId>, AdapterError> {
    let selected = server
        .allow_credentials
        .get(SELECTED_CREDENTIAL_INDEX)
        .and_then(|entry| entry.credential_id.as_deref())
        .filter(|id| !id.is_empty())
        .map(|id| CredentialId(id.to_string()));

    match (selected, lookup) {
        (Some(id), _) => Ok(Some(id)),
        (None, CredentialLookup::Lenient) => Ok(None),
        (None, CredentialLookup::Strict) => Err(AdapterError::MissingCredentialId),
    }
}

// -- Outbound -----------------------------------------------------------------

/// A platform response payload that has a fixed wire encoding.
pub trait EncodeResponse {
    type Encoded: Serialize;

    fn encode(&self) -> Self::Encoded;
}

impl EncodeResponse for AttestationResponse {
    type Encoded = SerializedAttestation;

    fn encode(&self) -> SerializedAttestation {
        SerializedAttestation {
            attestation_object: codec::encode(&self.attestation_object),
            client_data_json: codec::encode(&self.client_data_json),
        }
    }
}

impl EncodeResponse for AssertionResponse {
    type Encoded = SerializedAssertion;

    fn encode(&self) -> SerializedAssertion {
        SerializedAssertion {
            attestation_object: self.attestation_object.as_ref().map(codec::encode),
            client_data_json: codec::encode(&self.client_data_json),
            signature: codec::encode(&self.signature),
            authenticator_data: codec::encode(&self.authenticator_data),
        }
    }
}

/// Encode a platform credential for a `finish` request body.
pub fn serialize_credential<R: EncodeResponse>(
    credential: &PlatformCredential<R>,
) -> SerializableCredential<R::Encoded> {
    SerializableCredential {
        authenticator_attachment: credential.authenticator_attachment.clone(),
        id: credential.id.clone(),
        raw_id: codec::encode(&credential.raw_id),
        response: credential.response.encode(),
        credential_type: credential.credential_type.clone(),
    }
}

impl<R: EncodeResponse> PlatformCredential<R> {
    pub fn to_serializable(&self) -> SerializableCredential<R::Encoded> {
        serialize_credential(self)
    }
}
