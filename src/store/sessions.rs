use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::sessionmodel::Session;

#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session storage failure")]
    Storage,
}

/// Storage seam for sessions, so the auth gate never touches transport or
/// container details directly.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn create(&self, session: Session) -> Result<Uuid, SessionStoreError>;

    async fn destroy(&self, id: Uuid) -> Result<(), SessionStoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Session>, SessionStoreError>;
}

#[derive(Debug, Default)]
pub struct MemorySessions {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemorySessions {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionProvider for MemorySessions {
    async fn create(&self, session: Session) -> Result<Uuid, SessionStoreError> {
        let id = Uuid::new_v4();
        self.sessions.write().await.insert(id, session);
        Ok(id)
    }

    async fn destroy(&self, id: Uuid) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }
}
