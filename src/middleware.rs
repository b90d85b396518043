use std::sync::Arc;

use axum::{
    extract::{OriginalUri, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::{ErrorMessage, HttpError},
    AppState,
};

pub const SESSION_COOKIE: &str = "session_id";

/// Inserted into request extensions once the session check passes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionAuth {
    pub username: String,
}

pub fn session_id_from(cookie_jar: &CookieJar) -> Option<Uuid> {
    cookie_jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
}

/// Refuses anonymous callers before the wrapped handler ever runs: API paths
/// get a 401 JSON envelope, page paths a redirect to the login page.
pub async fn require_auth(
    cookie_jar: CookieJar,
    OriginalUri(original_uri): OriginalUri,
    Extension(app_state): Extension<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let session_id = session_id_from(&cookie_jar);

    match app_state.auth_service.current_session(session_id).await {
        Some(session) => {
            req.extensions_mut().insert(SessionAuth {
                username: session.username,
            });
            next.run(req).await
        }
        None => {
            tracing::debug!("Unauthenticated request refused for {}", original_uri.path());
            if original_uri.path().starts_with("/api/") {
                HttpError::unauthorized(ErrorMessage::AuthenticationRequired.to_string())
                    .into_response()
            } else {
                Redirect::to("/login").into_response()
            }
        }
    }
}
