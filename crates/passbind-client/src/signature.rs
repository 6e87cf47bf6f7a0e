//! Wallet proof-of-control.
//!
//! Register and Delete must show that the caller controls the wallet behind
//! the identity. The proof is a wallet signature over a message the server
//! issued for that identity:
//!
//! 1. [`SignatureProvider::get_auth_message`] fetches the message.
//! 2. [`SignatureProvider::sign_message`] asks the wallet to sign it verbatim.
//!
//! Neither step retries. A wallet denial is a hard
//! [`CeremonyFault::SignatureRejected`] and ends the ceremony.

use passbind_core::{Identity, WalletSignature};

use crate::error::CeremonyFault;
use crate::messages::MessageClient;
use crate::wallet::{WalletError, WalletProvider};

/// Fetches auth messages and has the wallet sign them.
pub struct SignatureProvider<'a, W: ?Sized> {
    messages: &'a MessageClient,
    wallet: &'a W,
}

impl<'a, W: WalletProvider + ?Sized> SignatureProvider<'a, W> {
    pub fn new(messages: &'a MessageClient, wallet: &'a W) -> Self {
        Self { messages, wallet }
    }

    /// The message the server wants `identity` to sign.
    ///
    /// Uses the first entry of the response; an empty list (or an entry
    /// with no message) is [`CeremonyFault::NoChallengeAvailable`].
    pub async fn get_auth_message(&self, identity: &Identity) -> Result<String, CeremonyFault> {
        let entries = self.messages.fetch(identity).await.map_err(|e| {
            tracing::warn!(identity = %identity, payload = %e.payload(), "auth message fetch failed");
            CeremonyFault::NetworkFault(e)
        })?;

        entries
            .into_iter()
            .next()
            .and_then(|entry| entry.message)
            .ok_or_else(|| CeremonyFault::NoChallengeAvailable {
                identity: identity.clone(),
            })
    }

    /// Ask the wallet to sign `message` as `identity`.
    ///
    /// May wait indefinitely on the user.
    pub async fn sign_message(
        &self,
        identity: &Identity,
        message: &str,
    ) -> Result<WalletSignature, CeremonyFault> {
        tracing::debug!(identity = %identity, "requesting wallet signature");
        match self.wallet.personal_sign(message, identity).await {
            Ok(signature) => Ok(WalletSignature::new(signature)),
            Err(WalletError::Rejected(reason)) => {
                tracing::warn!(identity = %identity, %reason, "wallet rejected signature request");
                Err(CeremonyFault::SignatureRejected(reason))
            }
            Err(other) => Err(CeremonyFault::Wallet(other)),
        }
    }

    /// Fetch a fresh message and sign it.
    pub async fn prove_control(&self, identity: &Identity) -> Result<WalletSignature, CeremonyFault> {
        let message = self.get_auth_message(identity).await?;
        self.sign_message(identity, &message).await
    }
}
