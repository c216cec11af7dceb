use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{errors::AppResult, models::domain::ExamSession};

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<ExamSession>>;
    /// Inserts or wholesale replaces the session with the same id.
    async fn save(&self, session: ExamSession) -> AppResult<ExamSession>;
    async fn delete(&self, id: &Uuid) -> AppResult<bool>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<usize>;
}

pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<Uuid, ExamSession>>>,
    ttl: Duration,
}

impl InMemorySessionRepository {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_id(&self, id: &Uuid) -> AppResult<Option<ExamSession>> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(id)
            .filter(|session| !session.is_expired(Utc::now(), self.ttl))
            .cloned())
    }

    async fn save(&self, session: ExamSession) -> AppResult<ExamSession> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    async fn delete(&self, id: &Uuid) -> AppResult<bool> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<usize> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now, self.ttl));
        let purged = before - sessions.len();

        if purged > 0 {
            log::info!("Purged {} expired exam sessions", purged);
        }
        Ok(purged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{ExamMetadata, Phase, QuestionRecord};

    fn session() -> ExamSession {
        ExamSession::new(
            Uuid::new_v4(),
            ExamMetadata {
                subject: "Kimia".to_string(),
                topic: "Stoikiometri".to_string(),
                phase: Phase::E,
                grade: "10".to_string(),
            },
            vec![QuestionRecord::default()],
        )
    }

    #[tokio::test]
    async fn save_then_find_returns_session() {
        let repository = InMemorySessionRepository::new(Duration::minutes(60));
        let saved = repository.save(session()).await.expect("save");

        let found = repository.find_by_id(&saved.id).await.expect("find");
        assert_eq!(found, Some(saved));
    }

    #[tokio::test]
    async fn save_replaces_existing_session_wholesale() {
        let repository = InMemorySessionRepository::new(Duration::minutes(60));
        let first = repository.save(session()).await.expect("save");

        let replacement = ExamSession {
            records: Vec::new(),
            ..first.clone()
        };
        repository.save(replacement).await.expect("save");

        let found = repository
            .find_by_id(&first.id)
            .await
            .expect("find")
            .expect("session exists");
        assert!(found.records.is_empty());
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn delete_reports_whether_session_existed() {
        let repository = InMemorySessionRepository::new(Duration::minutes(60));
        let saved = repository.save(session()).await.expect("save");

        assert!(repository.delete(&saved.id).await.expect("delete"));
        assert!(!repository.delete(&saved.id).await.expect("delete"));
        assert_eq!(repository.find_by_id(&saved.id).await.expect("find"), None);
    }

    #[tokio::test]
    async fn expired_sessions_are_hidden_and_purged() {
        let repository = InMemorySessionRepository::new(Duration::minutes(5));
        let mut stale = session();
        stale.created_at = Utc::now() - Duration::minutes(10);
        let stale = repository.save(stale).await.expect("save");
        let fresh = repository.save(session()).await.expect("save");

        assert_eq!(repository.find_by_id(&stale.id).await.expect("find"), None);
        assert_eq!(repository.purge_expired(Utc::now()).await.expect("purge"), 1);
        assert!(repository.find_by_id(&fresh.id).await.expect("find").is_some());
    }
}
