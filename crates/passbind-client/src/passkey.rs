//! Typed client for the Lighthouse passkey API.
//!
//! | Method | Path | Request | Response |
//! |--------|------|---------|----------|
//! | POST   | `/passkey/register/start`  | `{address}` | creation options |
//! | POST   | `/passkey/register/finish` | `{data, address, signature, name}` | truthy body |
//! | POST   | `/passkey/login/start`     | `{address}` | request options |
//! | POST   | `/passkey/login/finish`    | `{credentialID, data}` | `{token}` |
//! | DELETE | `/passkey/delete`          | `{address, credentialID}` + bearer signature | — |
//!
//! `login/start` doubles as the lookup of a user's enrolled credential in
//! the delete flow.

use passbind_core::{
    AuthenticationCredential, CredentialId, Identity, RegistrationCredential,
    ServerCreationOptions, ServerRequestOptions, WalletSignature,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LighthouseApiError;

// -- Request/Response types ---------------------------------------------------

#[derive(Debug, Serialize)]
struct AddressRequest<'a> {
    address: &'a Identity,
}

/// `register/finish` request body.
#[derive(Debug, Serialize)]
pub struct RegisterFinishRequest<'a> {
    pub data: &'a RegistrationCredential,
    pub address: &'a Identity,
    pub signature: &'a WalletSignature,
    /// Device label stored with the passkey.
    pub name: &'a str,
}

/// `login/finish` request body.
#[derive(Debug, Serialize)]
pub struct LoginFinishRequest<'a> {
    #[serde(rename = "credentialID", skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<&'a CredentialId>,
    pub data: &'a AuthenticationCredential,
}

/// `login/finish` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginFinishResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// `delete` request body. The wallet signature travels in the header.
#[derive(Debug, Serialize)]
pub struct DeleteCredentialRequest<'a> {
    pub address: &'a Identity,
    #[serde(rename = "credentialID", skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<&'a CredentialId>,
}

// -- Client -------------------------------------------------------------------

/// Client for the passkey endpoints.
#[derive(Debug, Clone)]
pub struct PasskeyClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl PasskeyClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Calls `POST {base_url}/passkey/register/start`.
    pub async fn register_start(
        &self,
        identity: &Identity,
    ) -> Result<ServerCreationOptions, LighthouseApiError> {
        let endpoint = "POST /passkey/register/start";
        let resp = self
            .post(endpoint, &["passkey", "register", "start"], &AddressRequest { address: identity })
            .await?;

        resp.json().await.map_err(|e| LighthouseApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Calls `POST {base_url}/passkey/register/finish`.
    ///
    /// Returns the response body as JSON. An empty body comes back as
    /// `Value::Null`; a body that is not JSON comes back as a string.
    pub async fn register_finish(
        &self,
        req: &RegisterFinishRequest<'_>,
    ) -> Result<Value, LighthouseApiError> {
        let endpoint = "POST /passkey/register/finish";
        let resp = self
            .post(endpoint, &["passkey", "register", "finish"], req)
            .await?;

        let text = resp.text().await.map_err(|e| LighthouseApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })?;
        Ok(parse_loose_body(&text))
    }

    /// Calls `POST {base_url}/passkey/login/start`.
    pub async fn login_start(
        &self,
        identity: &Identity,
    ) -> Result<ServerRequestOptions, LighthouseApiError> {
        let endpoint = "POST /passkey/login/start";
        let resp = self
            .post(endpoint, &["passkey", "login", "start"], &AddressRequest { address: identity })
            .await?;

        resp.json().await.map_err(|e| LighthouseApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Calls `POST {base_url}/passkey/login/finish`.
    pub async fn login_finish(
        &self,
        req: &LoginFinishRequest<'_>,
    ) -> Result<LoginFinishResponse, LighthouseApiError> {
        let endpoint = "POST /passkey/login/finish";
        let resp = self
            .post(endpoint, &["passkey", "login", "finish"], req)
            .await?;

        resp.json().await.map_err(|e| LighthouseApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Calls `DELETE {base_url}/passkey/delete` with
    /// `Authorization: Bearer {signature}`.
    pub async fn delete(
        &self,
        req: &DeleteCredentialRequest<'_>,
        signature: &WalletSignature,
    ) -> Result<(), LighthouseApiError> {
        let endpoint = "DELETE /passkey/delete";
        let url = crate::endpoint_url(&self.base_url, &["passkey", "delete"])?;

        let resp = self
            .http
            .delete(url)
            .bearer_auth(signature.as_str())
            .json(req)
            .send()
            .await
            .map_err(|e| LighthouseApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        crate::ensure_success(endpoint, resp).await?;
        Ok(())
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        segments: &[&str],
        body: &B,
    ) -> Result<reqwest::Response, LighthouseApiError> {
        let url = crate::endpoint_url(&self.base_url, segments)?;

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| LighthouseApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        crate::ensure_success(endpoint, resp).await
    }
}

/// Interpret a response body the way a browser HTTP client would: JSON if
/// it parses, the raw text otherwise, `null` if empty.
fn parse_loose_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// JavaScript truthiness of a JSON value.
///
/// Objects and arrays are truthy even when empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
