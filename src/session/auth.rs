//! Session-based authentication state.
//!
//! [`UserSession`] wraps the raw session for login and logout handlers;
//! [`CurrentUser`] is the extractor every protected handler takes, making
//! the acting identity an explicit parameter rather than ambient context.

use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Error;

const AUTH_SESSION_KEY: &str = "_auth";

/// Authentication data stored in the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthData {
    /// Authenticated user identity (None if not logged in)
    pub user_id: Option<String>,
    /// Unix timestamp of authentication
    pub authenticated_at: Option<i64>,
}

impl AuthData {
    /// Whether a user is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

/// Session wrapper for handlers that change authentication state.
pub struct UserSession {
    session: Session,
    data: AuthData,
}

impl UserSession {
    /// Current authentication data.
    #[must_use]
    pub fn data(&self) -> &AuthData {
        &self.data
    }

    /// The underlying session, e.g. for flash pushes.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Record a login and regenerate the session id to prevent fixation.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn login(&mut self, user_id: impl Into<String>) -> Result<(), Error> {
        self.data.user_id = Some(user_id.into());
        self.data.authenticated_at = Some(chrono::Utc::now().timestamp());
        self.save().await?;
        self.session
            .cycle_id()
            .await
            .map_err(|e| Error::Session(format!("failed to regenerate session id: {e}")))
    }

    /// Clear authentication state.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn logout(&mut self) -> Result<(), Error> {
        self.data = AuthData::default();
        self.save().await
    }

    async fn save(&self) -> Result<(), Error> {
        self.session
            .insert(AUTH_SESSION_KEY, &self.data)
            .await
            .map_err(|e| Error::Session(format!("failed to save auth data: {e}")))
    }
}

impl<S> FromRequestParts<S> for UserSession
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = super::session_from_parts(parts)?;
        let data: AuthData = session
            .get(AUTH_SESSION_KEY)
            .await
            .map_err(|e| Error::Session(format!("failed to read auth data: {e}")))?
            .unwrap_or_default();

        Ok(Self { session, data })
    }
}

/// The authenticated user, required by every protected handler.
///
/// Rejects with [`Error::Unauthorized`] (a redirect to the login page)
/// when no identity is present in the session.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User identity, compared against `Ingredient::owner_id`
    pub id: String,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user_session = UserSession::from_request_parts(parts, state).await?;
        match user_session.data.user_id {
            Some(id) => Ok(Self { id }),
            None => Err(Error::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_data_defaults_to_anonymous() {
        let data = AuthData::default();
        assert!(!data.is_authenticated());
        assert!(data.user_id.is_none());
    }

    #[test]
    fn auth_data_round_trips_through_json() {
        let data = AuthData {
            user_id: Some("alice".to_string()),
            authenticated_at: Some(1_700_000_000),
        };
        let json = serde_json::to_string(&data).unwrap();
        let back: AuthData = serde_json::from_str(&json).unwrap();
        assert!(back.is_authenticated());
        assert_eq!(back.user_id.as_deref(), Some("alice"));
    }
}
