//! # Ceremony Options
//!
//! Two families of types live here:
//!
//! - **Server options** ([`ServerCreationOptions`], [`ServerRequestOptions`])
//!   are what `register/start` and `login/start` return. Binary values
//!   arrive as numeric arrays, either in Node's Buffer JSON form
//!   (`{"type":"Buffer","data":[1,2,3]}`) or bare (`[1,2,3]`).
//! - **Platform options** ([`PublicKeyCredentialCreationOptions`],
//!   [`PublicKeyCredentialRequestOptions`]) are what a platform authenticator
//!   consumes. Binary values are raw bytes.
//!
//! Fields the ceremonies do not reshape (`rp`, `pubKeyCredParams`,
//! `timeout`, `attestation`, `userVerification`, ...) are carried in an
//! `extra` map and passed through unchanged.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Credential type string used in every descriptor.
pub const PUBLIC_KEY_TYPE: &str = "public-key";

// -- Byte arrays as JSON ------------------------------------------------------

/// A byte buffer serialized as a JSON array of numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ByteArrayJson {
    /// Node Buffer form, `{"type":"Buffer","data":[..]}`. `type` is optional.
    Wrapped { data: Vec<u8> },
    /// Bare array, `[..]`.
    Bare(Vec<u8>),
}

impl ByteArrayJson {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

impl From<Vec<u8>> for ByteArrayJson {
    fn from(data: Vec<u8>) -> Self {
        Self::Wrapped { data }
    }
}

// -- Server options -----------------------------------------------------------

/// `register/start` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerCreationOptions {
    pub challenge: ByteArrayJson,
    pub user: ServerUserEntity,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `user` member of [`ServerCreationOptions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerUserEntity {
    pub id: ByteArrayJson,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `login/start` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerRequestOptions {
    pub challenge: ByteArrayJson,
    #[serde(
        rename = "allowCredentials",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub allow_credentials: Vec<ServerAllowCredential>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Entry of `allowCredentials` as the server sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerAllowCredential {
    /// Base64url credential identifier.
    #[serde(rename = "credentialID", default)]
    pub credential_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// -- Platform options ---------------------------------------------------------

/// Options for a platform `create` (registration) call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicKeyCredentialCreationOptions {
    pub challenge: Vec<u8>,
    pub user: PublicKeyCredentialUserEntity,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicKeyCredentialUserEntity {
    pub id: Vec<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Options for a platform `get` (assertion) call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialRequestOptions {
    pub challenge: Vec<u8>,
    pub allow_credentials: Vec<PublicKeyCredentialDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A credential the authenticator is allowed to assert with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyCredentialDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    /// Absent only when lenient lookup let a missing identifier through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Vec<u8>>,
}

impl PublicKeyCredentialCreationOptions {
    /// `rp.id`, when the server supplied one.
    pub fn relying_party_id(&self) -> Option<&str> {
        rp_id(&self.extra)
    }
}

impl PublicKeyCredentialRequestOptions {
    /// `rpId`, when the server supplied one.
    pub fn relying_party_id(&self) -> Option<&str> {
        self.extra.get("rpId").and_then(Value::as_str)
    }
}

fn rp_id(extra: &Map<String, Value>) -> Option<&str> {
    extra
        .get("rp")
        .and_then(|rp| rp.get("id"))
        .and_then(Value::as_str)
}
