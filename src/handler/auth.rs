use std::sync::Arc;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use validator::Validate;

use crate::{
    dtos::authdtos::{AuthStatusResponseDto, LoginResponseDto, LoginStaffDto, Response, StaffUserDto},
    error::{ErrorMessage, HttpError},
    middleware::{session_id_from, SESSION_COOKIE},
    AppState,
};

pub fn auth_handler() -> Router {
    Router::new()
        .route("/login", post(login_staff))
        .route("/logout", post(logout_staff))
        .route("/status", get(auth_status))
}

pub async fn login_staff(
    Extension(app_state): Extension<Arc<AppState>>,
    cookie_jar: CookieJar,
    Json(body): Json<LoginStaffDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|_| HttpError::bad_request(ErrorMessage::MissingCredentials.to_string()))?;

    let (session_id, username) = app_state
        .auth_service
        .login(&body.username, &body.password)
        .await?;

    let max_age = app_state.auth_service.session_max_age();
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .max_age(time::Duration::seconds(max_age.num_seconds()))
        .http_only(true)
        .build();

    let response = LoginResponseDto {
        success: true,
        message: "Login successful".to_string(),
        user: StaffUserDto { username },
    };

    Ok((cookie_jar.add(cookie), Json(response)))
}

pub async fn logout_staff(
    Extension(app_state): Extension<Arc<AppState>>,
    cookie_jar: CookieJar,
) -> Result<impl IntoResponse, HttpError> {
    let session_id = session_id_from(&cookie_jar);
    app_state.auth_service.logout(session_id).await?;

    let jar = cookie_jar.remove(Cookie::build((SESSION_COOKIE, "")).path("/").build());
    let response = Response {
        success: true,
        message: "Logout successful".to_string(),
    };

    Ok((jar, Json(response)))
}

pub async fn auth_status(
    Extension(app_state): Extension<Arc<AppState>>,
    cookie_jar: CookieJar,
) -> impl IntoResponse {
    let session_id = session_id_from(&cookie_jar);
    let session = app_state.auth_service.current_session(session_id).await;

    Json(AuthStatusResponseDto {
        success: true,
        is_authenticated: session.is_some(),
        user: session.map(|session| StaffUserDto {
            username: session.username,
        }),
    })
}
