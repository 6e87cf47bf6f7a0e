//! # Ceremony Orchestrator
//!
//! Sequences the three wallet-bound passkey ceremonies against Lighthouse.
//! Every ceremony walks the same stages:
//!
//! ```text
//! Idle ──start call──▶ Started ──reshape + authenticator──▶ Transformed ──finish call──▶ Completed
//! ```
//!
//! | Ceremony | Before `Started` | `Started` | `Transformed` | `Completed` |
//! |----------|------------------|-----------|---------------|-------------|
//! | Register | message + wallet signature | `register/start` | `create` + encode | `register/finish` body truthy |
//! | Login    | — | `login/start` | `get` + encode | `login/finish` token stored |
//! | Delete   | — | `login/start` lookup | message + wallet signature | `DELETE /passkey/delete` |
//!
//! Login never asks the wallet for anything: holding the passkey is the
//! proof. Register and Delete need a wallet signature because there is no
//! passkey yet, or it is the thing being removed.
//!
//! ## Serialization
//!
//! One ceremony runs at a time per orchestrator, so a challenge issued to
//! this identity is never consumed by two overlapping ceremonies.
//! `connect`/`disconnect` do not wait for that lock; a login that finishes
//! after the session changed refuses to store its token.
//!
//! ## Failure
//!
//! Any fault ends the ceremony immediately with a [`CeremonyError`] naming
//! the ceremony, the last stage it reached, and the fault. Faults never
//! touch the session.

use parking_lot::RwLock;
use passbind_core::{
    adapter, ChainId, CredentialId, CredentialLookup, Identity, Session, SessionToken,
};
use serde_json::Value;

use crate::authenticator::PlatformAuthenticator;
use crate::config::LighthouseConfig;
use crate::error::{CeremonyFault, LighthouseApiError};
use crate::passkey::{
    is_truthy, DeleteCredentialRequest, LoginFinishRequest, RegisterFinishRequest,
};
use crate::signature::SignatureProvider;
use crate::wallet::WalletProvider;
use crate::LighthouseClient;

/// Which ceremony ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ceremony {
    Register,
    Login,
    Delete,
}

impl std::fmt::Display for Ceremony {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Register => "register",
            Self::Login => "login",
            Self::Delete => "delete",
        })
    }
}

/// How far a ceremony got.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CeremonyStage {
    Idle,
    Started,
    Transformed,
    Completed,
}

impl std::fmt::Display for CeremonyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Started => "started",
            Self::Transformed => "transformed",
            Self::Completed => "completed",
        })
    }
}

/// A ceremony that ended in failure.
#[derive(Debug, thiserror::Error)]
#[error("{ceremony} failed after reaching {stage}: {fault}")]
pub struct CeremonyError {
    pub ceremony: Ceremony,
    /// Last stage reached before the fault.
    pub stage: CeremonyStage,
    #[source]
    pub fault: CeremonyFault,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct Registration {
    pub identity: Identity,
    /// Credential id reported by the authenticator.
    pub credential_id: String,
    /// `register/finish` response body.
    pub response: Value,
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct Deletion {
    pub identity: Identity,
    /// `None` only under lenient credential lookup.
    pub credential_id: Option<CredentialId>,
}

struct Progress {
    ceremony: Ceremony,
    stage: CeremonyStage,
}

impl Progress {
    fn new(ceremony: Ceremony) -> Self {
        Self {
            ceremony,
            stage: CeremonyStage::Idle,
        }
    }

    fn advance(&mut self, stage: CeremonyStage) {
        tracing::debug!(ceremony = %self.ceremony, from = %self.stage, to = %stage, "ceremony stage");
        self.stage = stage;
    }
}

/// Drives Register, Login and Delete for one connected wallet.
pub struct CeremonyOrchestrator<W, A> {
    client: LighthouseClient,
    wallet: W,
    authenticator: A,
    device_name: String,
    credential_lookup: CredentialLookup,
    session: RwLock<Option<Session>>,
    in_flight: tokio::sync::Mutex<()>,
}

impl<W: WalletProvider, A: PlatformAuthenticator> CeremonyOrchestrator<W, A> {
    /// Build an orchestrator with its own HTTP client.
    pub fn new(
        config: LighthouseConfig,
        wallet: W,
        authenticator: A,
    ) -> Result<Self, LighthouseApiError> {
        let client = LighthouseClient::new(&config)?;
        Ok(Self::with_client(client, &config, wallet, authenticator))
    }

    /// Build an orchestrator around an existing client.
    pub fn with_client(
        client: LighthouseClient,
        config: &LighthouseConfig,
        wallet: W,
        authenticator: A,
    ) -> Self {
        Self {
            client,
            wallet,
            authenticator,
            device_name: config.device_name.clone(),
            credential_lookup: config.credential_lookup,
            session: RwLock::new(None),
            in_flight: tokio::sync::Mutex::new(()),
        }
    }

    // -- Session --------------------------------------------------------------

    /// Request wallet access and open a session for its first account.
    ///
    /// A chain-id failure is logged and leaves the chain unset; account
    /// access failures abort.
    pub async fn connect(&self) -> Result<Session, CeremonyFault> {
        let accounts = self
            .wallet
            .request_accounts()
            .await
            .map_err(CeremonyFault::Wallet)?;
        let address = accounts.into_iter().next().ok_or(CeremonyFault::NoAccounts)?;
        let identity = Identity::new(&address)?;

        let chain_id = match self.wallet.chain_id().await {
            Ok(id) => Some(ChainId(id)),
            Err(e) => {
                tracing::warn!(identity = %identity, error = %e, "could not read chain id");
                None
            }
        };

        let session = Session::new(identity, chain_id);
        *self.session.write() = Some(session.clone());
        tracing::info!(identity = %session.identity(), chain = ?session.chain_id().map(ToString::to_string), "wallet connected");
        Ok(session)
    }

    /// Drop the session, including any login token.
    pub fn disconnect(&self) {
        if let Some(session) = self.session.write().take() {
            tracing::info!(identity = %session.identity(), "wallet disconnected");
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Option<Session> {
        self.session.read().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.session.read().as_ref().map(|s| s.identity().clone())
    }

    pub fn token(&self) -> Option<SessionToken> {
        self.session.read().as_ref().and_then(|s| s.token().cloned())
    }

    /// Access the underlying Lighthouse client.
    pub fn client(&self) -> &LighthouseClient {
        &self.client
    }

    // -- Ceremonies -----------------------------------------------------------

    /// Enroll a passkey for the connected wallet.
    pub async fn register(&self) -> Result<Registration, CeremonyError> {
        let _guard = self.in_flight.lock().await;
        let mut progress = Progress::new(Ceremony::Register);
        let result = self.run_register(&mut progress).await;
        conclude(progress, result)
    }

    /// Authenticate with the enrolled passkey and store the session token.
    pub async fn login(&self) -> Result<SessionToken, CeremonyError> {
        let _guard = self.in_flight.lock().await;
        let mut progress = Progress::new(Ceremony::Login);
        let result = self.run_login(&mut progress).await;
        conclude(progress, result)
    }

    /// Remove the enrolled passkey, authorized by a wallet signature.
    pub async fn delete(&self) -> Result<Deletion, CeremonyError> {
        let _guard = self.in_flight.lock().await;
        let mut progress = Progress::new(Ceremony::Delete);
        let result = self.run_delete(&mut progress).await;
        conclude(progress, result)
    }

    async fn run_register(&self, progress: &mut Progress) -> Result<Registration, CeremonyFault> {
        let identity = self.current_identity()?;
        let signature = self.signer().prove_control(&identity).await?;

        let server = self.client.passkeys().register_start(&identity).await?;
        progress.advance(CeremonyStage::Started);

        let options = adapter::creation_options(server);
        let attestation = self.authenticator.create(&options).await?;
        let credential = attestation.to_serializable();
        progress.advance(CeremonyStage::Transformed);

        let response = self
            .client
            .passkeys()
            .register_finish(&RegisterFinishRequest {
                data: &credential,
                address: &identity,
                signature: &signature,
                name: &self.device_name,
            })
            .await?;
        if !is_truthy(&response) {
            return Err(CeremonyFault::RegistrationFailed);
        }
        progress.advance(CeremonyStage::Completed);

        Ok(Registration {
            identity,
            credential_id: credential.id,
            response,
        })
    }

    async fn run_login(&self, progress: &mut Progress) -> Result<SessionToken, CeremonyFault> {
        let identity = self.current_identity()?;

        let server = self.client.passkeys().login_start(&identity).await?;
        progress.advance(CeremonyStage::Started);

        let prepared = adapter::request_options(server, self.credential_lookup)?;
        let assertion = self.authenticator.get(&prepared.options).await?;
        let credential = assertion.to_serializable();
        progress.advance(CeremonyStage::Transformed);

        let response = self
            .client
            .passkeys()
            .login_finish(&LoginFinishRequest {
                credential_id: prepared.credential_id.as_ref(),
                data: &credential,
            })
            .await?;
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .map(SessionToken::new)
            .ok_or(CeremonyFault::LoginFailed)?;

        let stored = self
            .session
            .write()
            .as_mut()
            .map_or(false, |s| s.record_login(&identity, token.clone()));
        if !stored {
            return Err(CeremonyFault::SessionChanged);
        }
        progress.advance(CeremonyStage::Completed);

        Ok(token)
    }

    async fn run_delete(&self, progress: &mut Progress) -> Result<Deletion, CeremonyFault> {
        let identity = self.current_identity()?;

        let server = self.client.passkeys().login_start(&identity).await?;
        let credential_id = adapter::enrolled_credential_id(&server, self.credential_lookup)?;
        progress.advance(CeremonyStage::Started);

        let signature = self.signer().prove_control(&identity).await?;
        progress.advance(CeremonyStage::Transformed);

        self.client
            .passkeys()
            .delete(
                &DeleteCredentialRequest {
                    address: &identity,
                    credential_id: credential_id.as_ref(),
                },
                &signature,
            )
            .await?;
        progress.advance(CeremonyStage::Completed);

        Ok(Deletion {
            identity,
            credential_id,
        })
    }

    fn current_identity(&self) -> Result<Identity, CeremonyFault> {
        self.identity().ok_or(CeremonyFault::NotConnected)
    }

    fn signer(&self) -> SignatureProvider<'_, W> {
        SignatureProvider::new(self.client.messages(), &self.wallet)
    }
}

fn conclude<T>(progress: Progress, result: Result<T, CeremonyFault>) -> Result<T, CeremonyError> {
    match result {
        Ok(value) => {
            tracing::info!(ceremony = %progress.ceremony, "ceremony succeeded");
            Ok(value)
        }
        Err(fault) => {
            tracing::warn!(ceremony = %progress.ceremony, stage = %progress.stage, error = %fault, "ceremony failed");
            Err(CeremonyError {
                ceremony: progress.ceremony,
                stage: progress.stage,
                fault,
            })
        }
    }
}
