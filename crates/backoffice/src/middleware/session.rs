//! Session middleware configuration.
//!
//! Sessions live in process memory and are lost on restart; users simply log
//! in again.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::BackofficeConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "armarinho_session";

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(config: &BackofficeConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::minutes(config.session_idle_minutes),
        ))
        .with_secure(config.secure_cookies())
        .with_same_site(tower_sessions::cookie::SameSite::Strict)
        .with_http_only(true)
        .with_path("/")
}
