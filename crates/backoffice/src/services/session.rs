//! Session gate.
//!
//! A request is either anonymous or carries an [`AuthContext`] stored in its
//! server-side session. Login stores the context under a fresh session id;
//! logout flushes it. Every protected operation goes through
//! [`require_auth`] or [`require_role`].

use std::future::Future;

use thiserror::Error;
use tower_sessions::Session;

use armarinho_core::Role;

use super::auth::{AuthError, CredentialStore};
use crate::db::UserRepository;
use crate::models::session::{AuthContext, keys};

/// Errors from the underlying session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Store(String),
}

impl From<tower_sessions::session::Error> for SessionError {
    fn from(e: tower_sessions::session::Error) -> Self {
        Self::Store(e.to_string())
    }
}

/// Why a request was refused by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("insufficient permissions")]
    Forbidden,
}

/// Per-request session storage for the authentication context.
pub trait SessionStore: Send + Sync {
    /// Read the stored context, if any.
    fn load_auth(&self) -> impl Future<Output = Result<Option<AuthContext>, SessionError>> + Send;

    /// Store `context` under a new session id.
    fn store_auth(
        &self,
        context: &AuthContext,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Drop all session data and the session id.
    fn clear_auth(&self) -> impl Future<Output = Result<(), SessionError>> + Send;
}

impl SessionStore for Session {
    async fn load_auth(&self) -> Result<Option<AuthContext>, SessionError> {
        Ok(self.get::<AuthContext>(keys::AUTH_CONTEXT).await?)
    }

    async fn store_auth(&self, context: &AuthContext) -> Result<(), SessionError> {
        // Session fixation: never reuse the pre-login id
        self.cycle_id().await?;
        self.insert(keys::AUTH_CONTEXT, context).await?;
        Ok(())
    }

    async fn clear_auth(&self) -> Result<(), SessionError> {
        self.flush().await?;
        Ok(())
    }
}

/// Turns verified credentials into a session-held [`AuthContext`].
pub struct SessionGate<U> {
    credentials: CredentialStore<U>,
}

impl<U: UserRepository> SessionGate<U> {
    /// Create a gate checking credentials against `users`.
    #[must_use]
    pub const fn new(users: U) -> Self {
        Self {
            credentials: CredentialStore::new(users),
        }
    }

    /// Verify credentials and mark the session as authenticated.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when verification fails; the
    /// session is left untouched in that case.
    pub async fn login<S: SessionStore>(
        &self,
        session: &S,
        login_name: &str,
        password: &str,
    ) -> Result<AuthContext, AuthError> {
        let user = self.credentials.verify_login(login_name, password).await?;
        let context = AuthContext::from(&user);
        session.store_auth(&context).await?;

        tracing::info!(user_id = %context.user_id, role = %context.role, "User logged in");
        Ok(context)
    }
}

/// Mark the session as anonymous.
///
/// # Errors
///
/// Returns `SessionError` if the store cannot be flushed.
pub async fn logout<S: SessionStore>(session: &S) -> Result<(), SessionError> {
    session.clear_auth().await
}

/// The authenticated context of this session, if any.
///
/// A session that cannot be read is treated as anonymous.
pub async fn current<S: SessionStore>(session: &S) -> Option<AuthContext> {
    match session.load_auth().await {
        Ok(context) => context,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable session treated as anonymous");
            None
        }
    }
}

/// Require an authenticated caller.
///
/// # Errors
///
/// Returns `GateError::Unauthenticated` when `context` is `None`.
pub const fn require_auth(context: Option<&AuthContext>) -> Result<&AuthContext, GateError> {
    match context {
        Some(context) => Ok(context),
        None => Err(GateError::Unauthenticated),
    }
}

/// Require an authenticated caller holding `role`.
///
/// # Errors
///
/// Returns `GateError::Unauthenticated` when `context` is `None`, and
/// `GateError::Forbidden` when the caller's role differs.
pub fn require_role(context: Option<&AuthContext>, role: Role) -> Result<&AuthContext, GateError> {
    let context = require_auth(context)?;
    if context.role == role {
        Ok(context)
    } else {
        Err(GateError::Forbidden)
    }
}
