use std::path::Path as FilePath;
use std::sync::Arc;

use axum::{
    handler::Handler,
    middleware,
    response::{Html, IntoResponse},
    routing::get,
    Extension, Router,
};

use crate::{error::HttpError, middleware::require_auth, AppState};

/// Page shells for the browser UI. The markup itself lives in the public
/// directory and is treated as an external collaborator; these handlers only
/// pick the right file and gate the staff-only pages.
pub fn pages_handler() -> Router {
    Router::new()
        .route("/", get(submit_page))
        .route("/submit", get(submit_page))
        .route("/login", get(login_page))
        .route(
            "/board",
            get(board_page.layer(middleware::from_fn(require_auth))),
        )
        .route(
            "/ticket/:id",
            get(ticket_detail_page.layer(middleware::from_fn(require_auth))),
        )
}

async fn serve_page(app_state: &AppState, file: &str) -> Result<Html<String>, HttpError> {
    let path = FilePath::new(&app_state.env.public_dir).join(file);
    let markup = tokio::fs::read_to_string(&path).await.map_err(|err| {
        tracing::warn!("Could not read page {}: {}", path.display(), err);
        HttpError::not_found(format!("{file} not found"))
    })?;
    Ok(Html(markup))
}

pub async fn submit_page(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    serve_page(&app_state, "submit.html").await
}

pub async fn login_page(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    serve_page(&app_state, "login.html").await
}

pub async fn board_page(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    serve_page(&app_state, "board.html").await
}

pub async fn ticket_detail_page(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    serve_page(&app_state, "ticket-detail.html").await
}
