use chrono::{DateTime, Duration, Utc};

/// Server-held proof of a successful staff login. The client only ever sees
/// the opaque session id; the record itself never leaves the process.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(username: impl Into<String>, max_age: Duration) -> Self {
        let now = Utc::now();
        Session {
            username: username.into(),
            created_at: now,
            expires_at: now + max_age,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
