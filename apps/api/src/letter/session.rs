//! In-memory letter sessions.
//!
//! Sessions are process-local and die with the process; there is no
//! persistence layer. A session holds the source texts, the current letter,
//! and the personalization chat history.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;

/// Opening system turn seeding every session's chat history.
pub const PERSONALIZATION_SYSTEM_MESSAGE: &str =
    "You are a helpful assistant for cover letter personalization.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    fn now(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub id: Uuid,
    pub resume_text: String,
    pub job_description: String,
    pub current_letter: String,
    pub history: Vec<ChatTurn>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Number of user-requested refinements applied so far.
    pub fn refinement_count(&self) -> usize {
        self.history.iter().filter(|t| t.role == Role::User).count()
    }
}

/// Shared session map. Cheap to clone; all handlers see the same state.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session seeded with the system turn and the first
    /// generated letter, and returns a snapshot of it.
    pub async fn create(
        &self,
        resume_text: String,
        job_description: String,
        letter: String,
    ) -> Session {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            resume_text,
            job_description,
            history: vec![
                ChatTurn::now(Role::System, PERSONALIZATION_SYSTEM_MESSAGE),
                ChatTurn::now(Role::Assistant, letter.clone()),
            ],
            current_letter: letter,
            created_at: now,
            updated_at: now,
        };

        self.inner
            .write()
            .await
            .insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<Session, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No letter session with id {id}")))
    }

    /// Records one refinement round: the user's request and the model's
    /// updated letter, which becomes the current letter.
    pub async fn apply_refinement(
        &self,
        id: Uuid,
        user_request: &str,
        updated_letter: String,
    ) -> Result<Session, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("No letter session with id {id}")))?;

        session
            .history
            .push(ChatTurn::now(Role::User, user_request));
        session
            .history
            .push(ChatTurn::now(Role::Assistant, updated_letter.clone()));
        session.current_letter = updated_letter;
        session.updated_at = Utc::now();

        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_seeds_history() {
        let store = SessionStore::new();
        let session = store
            .create("resume".into(), "jd".into(), "Dear team,".into())
            .await;

        assert_eq!(session.history.len(), 2);
        assert_eq!(session.history[0].role, Role::System);
        assert_eq!(session.history[1].role, Role::Assistant);
        assert_eq!(session.current_letter, "Dear team,");
        assert_eq!(session.refinement_count(), 0);
    }

    #[tokio::test]
    async fn test_get_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_apply_refinement_updates_letter_and_history() {
        let store = SessionStore::new();
        let session = store
            .create("resume".into(), "jd".into(), "v1".into())
            .await;

        let updated = store
            .apply_refinement(session.id, "make it formal", "v2".into())
            .await
            .unwrap();

        assert_eq!(updated.current_letter, "v2");
        assert_eq!(updated.history.len(), 4);
        assert_eq!(updated.refinement_count(), 1);

        // Store reflects the change on a fresh read.
        let fetched = store.get(session.id).await.unwrap();
        assert_eq!(fetched.current_letter, "v2");
    }
}
