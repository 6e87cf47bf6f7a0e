//! Wallet provider seam.
//!
//! The wallet is an external collaborator: account discovery, chain
//! selection and key custody all happen on its side. passbind only needs the
//! three calls an EIP-1193 provider exposes for this flow
//! (`eth_requestAccounts`, `eth_chainId`, `personal_sign`).
//!
//! Every call may block on a human approving a prompt. There is no timeout;
//! the wallet's own UI is the only way to cancel, and a cancelled prompt
//! surfaces as [`WalletError::Rejected`].

use std::sync::Arc;

use async_trait::async_trait;
use passbind_core::Identity;

/// Errors reported by a wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// The user denied the request in the wallet.
    #[error("user rejected the request: {0}")]
    Rejected(String),
    /// No wallet is installed or reachable.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
    #[error("{0}")]
    Other(String),
}

/// Connected wallet capable of account access and message signing.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask for account access. The first account is the active one.
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError>;

    /// Currently selected chain id, e.g. `"0x1"`.
    async fn chain_id(&self) -> Result<String, WalletError>;

    /// Sign `message` verbatim with the key behind `address`.
    async fn personal_sign(&self, message: &str, address: &Identity) -> Result<String, WalletError>;
}

#[async_trait]
impl<T: WalletProvider + ?Sized> WalletProvider for Arc<T> {
    async fn request_accounts(&self) -> Result<Vec<String>, WalletError> {
        (**self).request_accounts().await
    }

    async fn chain_id(&self) -> Result<String, WalletError> {
        (**self).chain_id().await
    }

    async fn personal_sign(&self, message: &str, address: &Identity) -> Result<String, WalletError> {
        (**self).personal_sign(message, address).await
    }
}
