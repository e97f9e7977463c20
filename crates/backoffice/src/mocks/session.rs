//! Mock session.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::models::session::AuthContext;
use crate::services::session::{SessionError, SessionStore};

/// A single in-memory session with an observable id.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    context: Arc<Mutex<Option<AuthContext>>>,
    id: Arc<AtomicU64>,
    broken: Arc<AtomicBool>,
}

impl MemorySession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session id. Changes every time the id is cycled.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id.load(Ordering::SeqCst)
    }

    /// Make every subsequent read fail, like a corrupted session record.
    pub fn break_reads(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    fn lock_error() -> SessionError {
        SessionError::Store("mutex poisoned".to_owned())
    }
}

impl SessionStore for MemorySession {
    fn load_auth(&self) -> impl Future<Output = Result<Option<AuthContext>, SessionError>> + Send {
        let result = if self.broken.load(Ordering::SeqCst) {
            Err(SessionError::Store("unreadable session".to_owned()))
        } else {
            self.context
                .lock()
                .map(|ctx| ctx.clone())
                .map_err(|_| Self::lock_error())
        };
        async move { result }
    }

    fn store_auth(
        &self,
        context: &AuthContext,
    ) -> impl Future<Output = Result<(), SessionError>> + Send {
        self.id.fetch_add(1, Ordering::SeqCst);
        let result = self
            .context
            .lock()
            .map(|mut ctx| *ctx = Some(context.clone()))
            .map_err(|_| Self::lock_error());
        async move { result }
    }

    fn clear_auth(&self) -> impl Future<Output = Result<(), SessionError>> + Send {
        let result = self
            .context
            .lock()
            .map(|mut ctx| *ctx = None)
            .map_err(|_| Self::lock_error());
        async move { result }
    }
}
