use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum ErrorMessage {
    AuthenticationRequired,
    InvalidCredentials,
    MissingCredentials,
    TicketNotFound,
    ValidationFailed,
    SessionDestroyFailed,
}

impl ErrorMessage {
    fn to_str(&self) -> String {
        match self {
            ErrorMessage::AuthenticationRequired => "Authentication required".to_string(),
            ErrorMessage::InvalidCredentials => "Invalid username or password".to_string(),
            ErrorMessage::MissingCredentials => "Username and password are required".to_string(),
            ErrorMessage::TicketNotFound => "Ticket not found".to_string(),
            ErrorMessage::ValidationFailed => "Validation failed".to_string(),
            ErrorMessage::SessionDestroyFailed => "Logout error".to_string(),
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct HttpError {
    pub message: String,
    pub status: StatusCode,
    pub errors: Option<Vec<String>>,
}

impl HttpError {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        HttpError {
            message: message.into(),
            status,
            errors: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// 400 carrying the individual field errors from ticket validation.
    pub fn validation(errors: Vec<String>) -> Self {
        HttpError {
            message: ErrorMessage::ValidationFailed.to_string(),
            status: StatusCode::BAD_REQUEST,
            errors: Some(errors),
        }
    }

    pub fn into_http_response(self) -> Response {
        let body = ErrorResponse {
            success: false,
            message: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HttpError: message: {}, status: {}", self.message, self.status)
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}
