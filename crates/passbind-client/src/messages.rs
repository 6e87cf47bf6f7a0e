//! Typed client for the Lighthouse auth-message API.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/api/message/{address}` | Fetch the message the wallet must sign |

use passbind_core::Identity;
use serde::{Deserialize, Serialize};

use crate::error::LighthouseApiError;

/// One entry of the message endpoint's response array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the auth-message endpoint.
#[derive(Debug, Clone)]
pub struct MessageClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl MessageClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// Fetch the auth messages issued for `identity`.
    ///
    /// Calls `GET {base_url}/api/message/{address}`. Not retried: every call
    /// may mint a fresh nonce server-side.
    pub async fn fetch(&self, identity: &Identity) -> Result<Vec<AuthMessage>, LighthouseApiError> {
        let endpoint = "GET /api/message/{address}";
        let url = crate::endpoint_url(&self.base_url, &["api", "message", identity.as_str()])?;

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LighthouseApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = crate::ensure_success(endpoint, resp).await?;

        resp.json().await.map_err(|e| LighthouseApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
