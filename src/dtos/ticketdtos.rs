use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::OnceLock;

use crate::models::ticketmodel::Ticket;

/// Public submission body. Every field is optional at the serde level so the
/// validator can report all missing fields in one pass instead of bouncing on
/// the first deserialization failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicketDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub device_name: Option<String>,
    pub description: Option<String>,
}

/// Staff update body. `assigned_to` is tri-state: key absent leaves the
/// assignment alone, an explicit null clears it, a string sets it.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicketDto {
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<String>>,
    pub note: Option<String>,
    pub author: Option<String>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Collects every violation instead of stopping at the first one; an empty
/// list means the submission is acceptable.
pub fn validate_ticket(ticket: &NewTicketDto) -> Vec<String> {
    let mut errors = Vec::new();

    if ticket.name.as_deref().map_or(true, |s| s.trim().is_empty()) {
        errors.push("Name is required".to_string());
    }

    if ticket.phone.as_deref().map_or(true, |s| s.trim().is_empty()) {
        errors.push("Phone number is required".to_string());
    }

    match ticket.email.as_deref().map(str::trim) {
        None | Some("") => errors.push("Email is required".to_string()),
        Some(email) => {
            if !email_regex().is_match(email) {
                errors.push("Invalid email format".to_string());
            }
        }
    }

    if ticket.device_name.as_deref().map_or(true, |s| s.trim().is_empty()) {
        errors.push("Device name is required".to_string());
    }

    errors
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketResponseDto {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Ticket,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TicketListResponseDto {
    pub success: bool,
    pub data: Vec<Ticket>,
    pub count: usize,
}
