use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl FromStr for TicketStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in-progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "closed" => Ok(TicketStatus::Closed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl FromStr for TicketPriority {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            _ => Err(()),
        }
    }
}

/// One customer support request. Field names on the wire are camelCase to
/// match the submission form and the persisted ticket file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub device_name: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Append-only staff annotation on a ticket. Never edited or removed once
/// attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub text: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&TicketStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
        assert_eq!(serde_json::to_string(&TicketStatus::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::from_str::<TicketStatus>("\"resolved\"").unwrap(),
            TicketStatus::Resolved
        );
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("closed".parse::<TicketStatus>(), Ok(TicketStatus::Closed));
        assert_eq!("in-progress".parse::<TicketStatus>(), Ok(TicketStatus::InProgress));
        assert!("bogus".parse::<TicketStatus>().is_err());
        assert!("Open".parse::<TicketStatus>().is_err());
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("urgent".parse::<TicketPriority>(), Ok(TicketPriority::Urgent));
        assert_eq!("medium".parse::<TicketPriority>(), Ok(TicketPriority::Medium));
        assert!("critical".parse::<TicketPriority>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TicketStatus::default(), TicketStatus::Open);
        assert_eq!(TicketPriority::default(), TicketPriority::Medium);
    }

    #[test]
    fn test_ticket_json_uses_camel_case() {
        let ticket = Ticket {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            phone: "1234567890".to_string(),
            email: "a@b.com".to_string(),
            device_name: "Phone".to_string(),
            description: String::new(),
            status: TicketStatus::Open,
            priority: TicketPriority::Medium,
            assigned_to: None,
            notes: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let value = serde_json::to_value(&ticket).unwrap();
        assert!(value.get("deviceName").is_some());
        assert!(value.get("assignedTo").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("device_name").is_none());
    }
}
