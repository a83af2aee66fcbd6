//! Cookie-based session support: flash messages and the authenticated user.

mod auth;
mod flash;

pub use auth::{AuthData, CurrentUser, UserSession};
pub use flash::{FlashKind, FlashMessage, FlashMessages};

// Re-export tower-sessions types for convenience
pub use tower_sessions::{Expiry, Session, SessionManagerLayer};
pub use tower_sessions_memory_store::MemoryStore;

use axum::{extract::FromRequestParts, http::request::Parts};
use time::Duration;

use crate::config::SessionConfig;
use crate::error::Error;

/// Create a memory-backed `SessionManagerLayer` from configuration.
pub fn create_session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    use tower_sessions::cookie::SameSite;

    let store = MemoryStore::default();

    let expiry = if config.expiry_secs == 0 {
        Expiry::OnSessionEnd
    } else {
        Expiry::OnInactivity(Duration::seconds(config.expiry_secs as i64))
    };

    let same_site = match config.same_site.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    };

    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_expiry(expiry)
        .with_secure(config.secure)
        .with_http_only(config.http_only)
        .with_same_site(same_site)
}

/// Extractor handing out the raw session for handlers that write to it
/// (flash pushes before a redirect).
pub struct SessionHandle(pub Session);

impl<S> FromRequestParts<S> for SessionHandle
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        Ok(Self(session))
    }
}

/// Pull the session out of request extensions, where `SessionManagerLayer`
/// places it.
pub(crate) fn session_from_parts(parts: &Parts) -> Result<Session, Error> {
    parts.extensions.get::<Session>().cloned().ok_or_else(|| {
        Error::Session("session not found in request extensions; is SessionManagerLayer configured?".to_string())
    })
}
