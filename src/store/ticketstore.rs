use std::path::PathBuf;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dtos::ticketdtos::{validate_ticket, NewTicketDto, UpdateTicketDto};
use crate::error::{ErrorMessage, HttpError};
use crate::models::ticketmodel::{Note, Ticket, TicketPriority, TicketStatus};

#[derive(Error, Debug)]
pub enum TicketStoreError {
    #[error("Ticket not found")]
    NotFound,

    #[error("Validation failed")]
    ValidationFailed(Vec<String>),
}

impl From<TicketStoreError> for HttpError {
    fn from(error: TicketStoreError) -> Self {
        match error {
            TicketStoreError::NotFound => {
                HttpError::not_found(ErrorMessage::TicketNotFound.to_string())
            }
            TicketStoreError::ValidationFailed(errors) => HttpError::validation(errors),
        }
    }
}

/// Sole owner of the ticket collection and its on-disk mirror. Every
/// mutation runs under the write lock so read-modify-persist sequences never
/// interleave, and the file is rewritten wholesale before the lock is
/// released.
#[derive(Debug)]
pub struct TicketStore {
    data_file: PathBuf,
    tickets: RwLock<Vec<Ticket>>,
}

#[async_trait]
pub trait TicketExt {
    async fn create_ticket(&self, submission: NewTicketDto) -> Result<Ticket, TicketStoreError>;

    async fn list_tickets(&self) -> Vec<Ticket>;

    async fn get_ticket(&self, id: Uuid) -> Result<Ticket, TicketStoreError>;

    async fn update_ticket(
        &self,
        id: Uuid,
        changes: UpdateTicketDto,
    ) -> Result<Ticket, TicketStoreError>;

    async fn delete_ticket(&self, id: Uuid) -> Result<Ticket, TicketStoreError>;
}

impl TicketStore {
    /// Loads the persisted collection if present and valid, otherwise starts
    /// empty. A malformed or unreadable file is logged, never fatal.
    pub fn load(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        let tickets = match std::fs::read_to_string(&data_file) {
            Ok(raw) => match serde_json::from_str::<Vec<Ticket>>(&raw) {
                Ok(tickets) => {
                    tracing::info!(
                        "Loaded {} tickets from {}",
                        tickets.len(),
                        data_file.display()
                    );
                    tickets
                }
                Err(err) => {
                    tracing::warn!(
                        "Malformed ticket data in {}: {}; starting fresh",
                        data_file.display(),
                        err
                    );
                    Vec::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No existing ticket data found, starting fresh");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(
                    "Could not read ticket data from {}: {}; starting fresh",
                    data_file.display(),
                    err
                );
                Vec::new()
            }
        };

        TicketStore {
            data_file,
            tickets: RwLock::new(tickets),
        }
    }

    // Best-effort durability: on failure the in-memory mutation stands and
    // the error is only logged.
    fn persist(&self, tickets: &[Ticket]) {
        match serde_json::to_string_pretty(tickets) {
            Ok(raw) => {
                if let Err(err) = std::fs::write(&self.data_file, raw) {
                    tracing::error!(
                        "Failed to save {} tickets to {}: {}",
                        tickets.len(),
                        self.data_file.display(),
                        err
                    );
                }
            }
            Err(err) => tracing::error!("Failed to serialize tickets: {}", err),
        }
    }
}

#[async_trait]
impl TicketExt for TicketStore {
    async fn create_ticket(&self, submission: NewTicketDto) -> Result<Ticket, TicketStoreError> {
        let errors = validate_ticket(&submission);
        if !errors.is_empty() {
            return Err(TicketStoreError::ValidationFailed(errors));
        }

        let now = Utc::now();
        let ticket = Ticket {
            id: Uuid::new_v4(),
            name: submission.name.unwrap_or_default().trim().to_string(),
            phone: submission.phone.unwrap_or_default().trim().to_string(),
            email: submission.email.unwrap_or_default().trim().to_string(),
            device_name: submission.device_name.unwrap_or_default().trim().to_string(),
            description: submission.description.unwrap_or_default().trim().to_string(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            assigned_to: None,
            notes: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let mut tickets = self.tickets.write().await;
        tickets.push(ticket.clone());
        self.persist(&tickets);

        Ok(ticket)
    }

    async fn list_tickets(&self) -> Vec<Ticket> {
        self.tickets.read().await.clone()
    }

    async fn get_ticket(&self, id: Uuid) -> Result<Ticket, TicketStoreError> {
        self.tickets
            .read()
            .await
            .iter()
            .find(|ticket| ticket.id == id)
            .cloned()
            .ok_or(TicketStoreError::NotFound)
    }

    /// Permissive merge: unknown status/priority strings are ignored rather
    /// than rejected, `assignedTo` is applied verbatim whenever the key was
    /// sent (explicit null clears), and a non-empty note appends. Only when
    /// something actually changed does `updatedAt` move and the collection
    /// get persisted.
    async fn update_ticket(
        &self,
        id: Uuid,
        changes: UpdateTicketDto,
    ) -> Result<Ticket, TicketStoreError> {
        let mut tickets = self.tickets.write().await;
        let index = tickets
            .iter()
            .position(|ticket| ticket.id == id)
            .ok_or(TicketStoreError::NotFound)?;

        let mut updated = false;
        {
            let ticket = &mut tickets[index];

            if let Some(status) = changes
                .status
                .as_deref()
                .and_then(|s| s.parse::<TicketStatus>().ok())
            {
                ticket.status = status;
                updated = true;
            }

            if let Some(priority) = changes
                .priority
                .as_deref()
                .and_then(|p| p.parse::<TicketPriority>().ok())
            {
                ticket.priority = priority;
                updated = true;
            }

            if let Some(assigned_to) = changes.assigned_to {
                ticket.assigned_to = assigned_to;
                updated = true;
            }

            if let Some(text) = changes
                .note
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
            {
                let author = changes
                    .author
                    .as_deref()
                    .filter(|author| !author.is_empty())
                    .unwrap_or("Staff");
                ticket.notes.push(Note {
                    id: Uuid::new_v4(),
                    text: text.to_string(),
                    author: author.to_string(),
                    timestamp: Utc::now(),
                });
                updated = true;
            }

            if updated {
                ticket.updated_at = Utc::now();
            }
        }

        if updated {
            self.persist(&tickets);
        }

        Ok(tickets[index].clone())
    }

    async fn delete_ticket(&self, id: Uuid) -> Result<Ticket, TicketStoreError> {
        let mut tickets = self.tickets.write().await;
        let index = tickets
            .iter()
            .position(|ticket| ticket.id == id)
            .ok_or(TicketStoreError::NotFound)?;

        let removed = tickets.remove(index);
        self.persist(&tickets);

        Ok(removed)
    }
}
