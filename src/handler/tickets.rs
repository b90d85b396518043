use std::sync::Arc;

use axum::{
    extract::Path,
    handler::Handler,
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{
    dtos::ticketdtos::{NewTicketDto, TicketListResponseDto, TicketResponseDto, UpdateTicketDto},
    error::{ErrorMessage, HttpError},
    middleware::{require_auth, SessionAuth},
    store::ticketstore::TicketExt,
    AppState,
};

pub fn tickets_handler() -> Router {
    Router::new()
        .route("/", get(get_tickets).post(create_ticket))
        .route(
            "/:id",
            get(get_ticket)
                .patch(update_ticket.layer(middleware::from_fn(require_auth)))
                .delete(delete_ticket.layer(middleware::from_fn(require_auth))),
        )
}

// Ids on the wire are uuid strings; anything that does not parse cannot match
// a stored ticket, so it reads as not found rather than a bad request.
fn parse_ticket_id(id: &str) -> Result<Uuid, HttpError> {
    Uuid::parse_str(id)
        .map_err(|_| HttpError::not_found(ErrorMessage::TicketNotFound.to_string()))
}

pub async fn get_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let tickets = app_state.ticket_store.list_tickets().await;
    let count = tickets.len();

    Ok(Json(TicketListResponseDto {
        success: true,
        data: tickets,
        count,
    }))
}

pub async fn get_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_ticket_id(&id)?;
    let ticket = app_state.ticket_store.get_ticket(id).await?;

    Ok(Json(TicketResponseDto {
        success: true,
        message: None,
        data: ticket,
    }))
}

pub async fn create_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<NewTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state.ticket_store.create_ticket(body).await?;

    let response = TicketResponseDto {
        success: true,
        message: Some("Ticket created successfully".to_string()),
        data: ticket,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn update_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(staff): Extension<SessionAuth>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_ticket_id(&id)?;
    let ticket = app_state.ticket_store.update_ticket(id, body).await?;
    tracing::info!("Ticket {} updated by {}", ticket.id, staff.username);

    Ok(Json(TicketResponseDto {
        success: true,
        message: Some("Ticket updated successfully".to_string()),
        data: ticket,
    }))
}

pub async fn delete_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(staff): Extension<SessionAuth>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let id = parse_ticket_id(&id)?;
    let ticket = app_state.ticket_store.delete_ticket(id).await?;
    tracing::info!("Ticket {} deleted by {}", ticket.id, staff.username);

    Ok(Json(TicketResponseDto {
        success: true,
        message: Some("Ticket deleted successfully".to_string()),
        data: ticket,
    }))
}
