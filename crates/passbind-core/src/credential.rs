//! # Platform and Serializable Credentials
//!
//! A [`PlatformCredential`] is what the authenticator hands back from a
//! `create` or `get` call: raw bytes, in memory only. A
//! [`SerializableCredential`] is the same credential with every binary
//! field base64url-encoded, ready for a JSON request body.
//!
//! Both are generic over the response payload so attestation (registration)
//! and assertion (login) shapes cannot be mixed up:
//!
//! | Ceremony | Platform type | Wire type |
//! |----------|---------------|-----------|
//! | Register | [`PlatformAttestation`] | [`RegistrationCredential`] |
//! | Login    | [`PlatformAssertion`]   | [`AuthenticationCredential`] |

use serde::{Deserialize, Serialize};

/// Credential returned by a platform authenticator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformCredential<R> {
    /// Base64url credential id as reported by the platform.
    pub id: String,
    pub raw_id: Vec<u8>,
    /// Normally `"public-key"`.
    pub credential_type: String,
    /// `"platform"` or `"cross-platform"`, when known.
    pub authenticator_attachment: Option<String>,
    pub response: R,
}

/// Response payload of a registration (`create`) ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationResponse {
    pub attestation_object: Vec<u8>,
    pub client_data_json: Vec<u8>,
}

/// Response payload of an authentication (`get`) ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResponse {
    pub authenticator_data: Vec<u8>,
    pub client_data_json: Vec<u8>,
    pub signature: Vec<u8>,
    /// Some authenticators attach an attestation object to assertions too.
    pub attestation_object: Option<Vec<u8>>,
}

pub type PlatformAttestation = PlatformCredential<AttestationResponse>;
pub type PlatformAssertion = PlatformCredential<AssertionResponse>;

/// Credential with binary fields base64url-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableCredential<R> {
    pub authenticator_attachment: Option<String>,
    pub id: String,
    pub raw_id: String,
    pub response: R,
    #[serde(rename = "type")]
    pub credential_type: String,
}

/// Encoded attestation response. Carries no assertion fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedAttestation {
    #[serde(rename = "attestationObject")]
    pub attestation_object: String,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
}

/// Encoded assertion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedAssertion {
    #[serde(
        rename = "attestationObject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub attestation_object: Option<String>,
    #[serde(rename = "clientDataJSON")]
    pub client_data_json: String,
    pub signature: String,
    #[serde(rename = "authenticatorData")]
    pub authenticator_data: String,
}

pub type RegistrationCredential = SerializableCredential<SerializedAttestation>;
pub type AuthenticationCredential = SerializableCredential<SerializedAssertion>;
