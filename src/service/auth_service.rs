use std::sync::Arc;

use chrono::Duration;
use uuid::Uuid;

use crate::error::{ErrorMessage, HttpError};
use crate::models::sessionmodel::Session;
use crate::store::sessions::SessionProvider;
use crate::utils::password;

/// The single staff identity and the session rules gating every mutating
/// endpoint. Only the argon2 hash of the configured password is retained.
pub struct AuthService {
    staff_username: String,
    staff_password_hash: String,
    session_max_age: Duration,
    sessions: Arc<dyn SessionProvider>,
}

impl AuthService {
    pub fn new(
        staff_username: impl Into<String>,
        staff_password: &str,
        session_max_age: Duration,
        sessions: Arc<dyn SessionProvider>,
    ) -> Result<Self, argon2::password_hash::Error> {
        Ok(AuthService {
            staff_username: staff_username.into(),
            staff_password_hash: password::hash(staff_password)?,
            session_max_age,
            sessions,
        })
    }

    /// Checks both credential fields before answering so the response shape
    /// never reveals which one was wrong. On success a fresh session with an
    /// absolute expiry is established.
    pub async fn login(&self, username: &str, pass: &str) -> Result<(Uuid, String), HttpError> {
        let username_matches = username == self.staff_username;
        let password_matches = password::compare(pass, &self.staff_password_hash).unwrap_or(false);

        if !username_matches || !password_matches {
            return Err(HttpError::unauthorized(
                ErrorMessage::InvalidCredentials.to_string(),
            ));
        }

        let session = Session::new(username, self.session_max_age);
        let session_id = self
            .sessions
            .create(session)
            .await
            .map_err(|err| HttpError::server_error(err.to_string()))?;

        Ok((session_id, username.to_string()))
    }

    pub async fn logout(&self, session_id: Option<Uuid>) -> Result<(), HttpError> {
        if let Some(id) = session_id {
            self.sessions.destroy(id).await.map_err(|err| {
                tracing::error!("Failed to destroy session {}: {}", id, err);
                HttpError::server_error(ErrorMessage::SessionDestroyFailed.to_string())
            })?;
        }
        Ok(())
    }

    /// Resolves the caller's session, treating missing, unknown, and expired
    /// sessions alike as anonymous.
    pub async fn current_session(&self, session_id: Option<Uuid>) -> Option<Session> {
        let id = session_id?;
        let session = self.sessions.get(id).await.ok().flatten()?;
        if session.is_expired() {
            return None;
        }
        Some(session)
    }

    pub fn session_max_age(&self) -> Duration {
        self.session_max_age
    }
}
