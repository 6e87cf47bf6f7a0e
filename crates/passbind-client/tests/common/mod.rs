//! Shared fakes for the integration tests.
//!
//! The fake wallet, the fake authenticator, and every mounted HTTP responder
//! append to one [`EventLog`], so tests can assert the exact order in which
//! a ceremony touched its collaborators.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use passbind_client::{
    AuthenticatorError, CeremonyOrchestrator, LighthouseConfig, PlatformAuthenticator,
    WalletError, WalletProvider,
};
use passbind_core::{
    AssertionResponse, AttestationResponse, Identity, PlatformAssertion, PlatformAttestation,
    PlatformCredential, PublicKeyCredentialCreationOptions, PublicKeyCredentialRequestOptions,
};
use serde_json::Value;
use wiremock::{Request, ResponseTemplate};

pub const ACCOUNT: &str = "0xAbC123";
pub const IDENTITY: &str = "0xabc123";

#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().clone()
    }

    pub fn position(&self, event: &str) -> Option<usize> {
        self.0.lock().iter().position(|e| e == event)
    }

    pub fn contains(&self, event: &str) -> bool {
        self.position(event).is_some()
    }
}

/// Responder that logs `label` and answers `status` with a JSON body.
pub fn logged_json(
    log: &EventLog,
    label: &str,
    status: u16,
    body: Value,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    let log = log.clone();
    let label = label.to_string();
    move |_req: &Request| {
        log.push(label.clone());
        ResponseTemplate::new(status).set_body_json(body.clone())
    }
}

/// Responder that logs `label` and answers `status` with a raw body.
pub fn logged_text(
    log: &EventLog,
    label: &str,
    status: u16,
    body: &str,
) -> impl Fn(&Request) -> ResponseTemplate + Send + Sync + 'static {
    let log = log.clone();
    let label = label.to_string();
    let body = body.to_string();
    move |_req: &Request| {
        log.push(label.clone());
        ResponseTemplate::new(status).set_body_string(body.clone())
    }
}

// -- Wallet -------------------------------------------------------------------

pub struct FakeWallet {
    pub log: EventLog,
    pub accounts: Vec<String>,
    pub chain_id: Result<String, WalletError>,
    pub signature: Result<String, WalletError>,
    pub signed_messages: Mutex<Vec<(String, String)>>,
}

impl FakeWallet {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            accounts: vec![ACCOUNT.to_string()],
            chain_id: Ok("0x1".to_string()),
            signature: Ok("0xsig".to_string()),
            signed_messages: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting(log: &EventLog) -> Self {
        Self {
            signature: Err(WalletError::Rejected("User denied message signature".into())),
            ..Self::new(log)
        }
    }
}

#[async_trait]
impl WalletProvider for FakeWallet {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        self.log.push("wallet:request_accounts");
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<String, WalletError> {
        self.log.push("wallet:chain_id");
        self.chain_id.clone()
    }

    async fn personal_sign(&self, message: &str, address: &Identity) -> Result<String, WalletError> {
        self.log.push("wallet:personal_sign");
        self.signed_messages
            .lock()
            .push((message.to_string(), address.to_string()));
        self.signature.clone()
    }
}

// -- Authenticator ------------------------------------------------------------

pub struct FakeAuthenticator {
    pub log: EventLog,
    pub failure: Option<AuthenticatorError>,
    pub creation_options: Mutex<Option<PublicKeyCredentialCreationOptions>>,
    pub request_options: Mutex<Option<PublicKeyCredentialRequestOptions>>,
}

impl FakeAuthenticator {
    pub fn new(log: &EventLog) -> Self {
        Self {
            log: log.clone(),
            failure: None,
            creation_options: Mutex::new(None),
            request_options: Mutex::new(None),
        }
    }

    pub fn failing(log: &EventLog, error: AuthenticatorError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(log)
        }
    }
}

/// Attestation the fake authenticator returns from `create`.
///
/// Encodes to rawId `-_8`, attestationObject `AQID`, clientDataJSON `e30`.
pub fn sample_attestation() -> PlatformAttestation {
    PlatformCredential {
        id: "cred-1".into(),
        raw_id: vec![0xfb, 0xff],
        credential_type: "public-key".into(),
        authenticator_attachment: Some("platform".into()),
        response: AttestationResponse {
            attestation_object: vec![1, 2, 3],
            client_data_json: b"{}".to_vec(),
        },
    }
}

/// Assertion the fake authenticator returns from `get`.
///
/// Encodes to rawId `CQk`, authenticatorData `AQ`, clientDataJSON `Ag`,
/// signature `Aw`.
pub fn sample_assertion() -> PlatformAssertion {
    PlatformCredential {
        id: "cred-1".into(),
        raw_id: vec![9, 9],
        credential_type: "public-key".into(),
        authenticator_attachment: Some("platform".into()),
        response: AssertionResponse {
            authenticator_data: vec![1],
            client_data_json: vec![2],
            signature: vec![3],
            attestation_object: None,
        },
    }
}

#[async_trait]
impl PlatformAuthenticator for FakeAuthenticator {
    async fn create(
        &self,
        options: &PublicKeyCredentialCreationOptions,
    ) -> Result<PlatformAttestation, AuthenticatorError> {
        self.log.push("authenticator:create");
        *self.creation_options.lock() = Some(options.clone());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(sample_attestation()),
        }
    }

    async fn get(
        &self,
        options: &PublicKeyCredentialRequestOptions,
    ) -> Result<PlatformAssertion, AuthenticatorError> {
        self.log.push("authenticator:get");
        *self.request_options.lock() = Some(options.clone());
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(sample_assertion()),
        }
    }
}

// -- Orchestrator -------------------------------------------------------------

pub type TestOrchestrator = CeremonyOrchestrator<Arc<FakeWallet>, Arc<FakeAuthenticator>>;

pub fn orchestrator(
    config: LighthouseConfig,
    wallet: &Arc<FakeWallet>,
    authenticator: &Arc<FakeAuthenticator>,
) -> TestOrchestrator {
    CeremonyOrchestrator::new(config, wallet.clone(), authenticator.clone()).unwrap()
}

/// Orchestrator against `uri`, already connected as [`ACCOUNT`].
pub async fn connected(
    uri: &str,
    wallet: &Arc<FakeWallet>,
    authenticator: &Arc<FakeAuthenticator>,
) -> TestOrchestrator {
    let orchestrator = orchestrator(
        LighthouseConfig::local_mock(uri).unwrap(),
        wallet,
        authenticator,
    );
    orchestrator.connect().await.unwrap();
    orchestrator
}
