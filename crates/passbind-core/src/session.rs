//! # Session Context
//!
//! The state that survives between ceremonies: who is connected, on which
//! chain, and the token from the last successful login.
//!
//! A [`Session`] is created when the wallet connects and dropped on
//! disconnect. Ceremonies read it; only a login is allowed to write the
//! token, through [`Session::record_login`].

use crate::identity::{ChainId, Identity, SessionToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    identity: Identity,
    chain_id: Option<ChainId>,
    token: Option<SessionToken>,
}

impl Session {
    pub fn new(identity: Identity, chain_id: Option<ChainId>) -> Self {
        Self {
            identity,
            chain_id,
            token: None,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn chain_id(&self) -> Option<&ChainId> {
        self.chain_id.as_ref()
    }

    pub fn token(&self) -> Option<&SessionToken> {
        self.token.as_ref()
    }

    /// Store a login token, provided the login ran for this session's identity.
    ///
    /// Returns `false` and leaves the session untouched when `identity`
    /// differs, which happens if the wallet reconnected mid-ceremony.
    pub fn record_login(&mut self, identity: &Identity, token: SessionToken) -> bool {
        if &self.identity != identity {
            return false;
        }
        self.token = Some(token);
        true
    }
}
