use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{curriculum::Phase, question::QuestionRecord};

/// Descriptive fields carried from the request into the exported document.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamMetadata {
    pub subject: String,
    pub topic: String,
    pub phase: Phase,
    pub grade: String,
}

impl ExamMetadata {
    pub fn file_name(&self) -> String {
        format!(
            "Soal_{}_Kelas_{}_Fase_{}.docx",
            self.subject, self.grade, self.phase
        )
    }
}

/// The most recent successful generation for one client.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExamSession {
    pub id: Uuid,
    pub metadata: ExamMetadata,
    pub records: Vec<QuestionRecord>,
    pub created_at: DateTime<Utc>,
}

impl ExamSession {
    pub fn new(id: Uuid, metadata: ExamMetadata, records: Vec<QuestionRecord>) -> Self {
        ExamSession {
            id,
            metadata,
            records,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.created_at > ttl
    }
}
