use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{DifficultyCounts, ExamSession},
        dto::{
            request::{DistributionPreviewRequestDto, GenerateExamRequestDto},
            response::DistributionPreviewDto,
        },
    },
    repositories::SessionRepository,
    services::{
        distribution_service, document_service,
        generation_service::{self, QuestionGenerator},
        prompt_service,
    },
};

pub struct ExamService {
    generator: Option<Arc<dyn QuestionGenerator>>,
    sessions: Arc<dyn SessionRepository>,
}

impl ExamService {
    /// `generator` is `None` when the generation service is not configured.
    pub fn new(
        generator: Option<Arc<dyn QuestionGenerator>>,
        sessions: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            generator,
            sessions,
        }
    }

    pub fn generation_ready(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn generate_exam(&self, request: GenerateExamRequestDto) -> AppResult<ExamSession> {
        request.validate()?;

        if let Some(previous) = request.session_id {
            self.sessions.delete(&previous).await?;
        }

        let specs = distribution_service::split(&request.question_types, &request.difficulty)
            .inspect_err(|e| log::warn!("Rejected exam request: {}", e))?;

        let generator = self.generator.as_ref().ok_or_else(|| {
            AppError::ServiceUnavailable(
                "Generation client is not configured. Check GEMINI_API_KEY.".to_string(),
            )
        })?;

        let generation_request = prompt_service::build_generation_request(&request, &specs);
        log::info!(
            "Generating {} questions for {} grade {} (phase {})",
            specs.len(),
            request.subject,
            request.grade,
            request.phase
        );

        let content = generator
            .generate(&generation_request)
            .await
            .inspect_err(|e| log::error!("Generation call failed: {}", e))?;

        let records = generation_service::parse_generated_exam(&content)
            .inspect_err(|e| log::error!("Could not parse generation response: {}", e))?;

        if records.is_empty() {
            log::warn!("Generation returned no questions");
            return Err(AppError::EmptyResult);
        }

        self.sessions.purge_expired(Utc::now()).await?;

        let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);
        let session = ExamSession::new(session_id, request.metadata(), records);
        let session = self.sessions.save(session).await?;

        log::info!(
            "Stored exam session {} with {} questions",
            session.id,
            session.records.len()
        );
        Ok(session)
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<ExamSession> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Exam session '{}' not found", id)))
    }

    pub async fn delete_session(&self, id: &Uuid) -> AppResult<()> {
        if self.sessions.delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("Exam session '{}' not found", id)))
        }
    }

    /// File name and .docx bytes for a stored session.
    pub async fn export_document(&self, id: &Uuid) -> AppResult<(String, Vec<u8>)> {
        let session = self.get_session(id).await?;
        document_service::export_session(&session)
    }

    /// Form helper: clamps the difficulty counts to the type total and shows
    /// the resulting question specs when both totals agree.
    pub fn preview_distribution(
        &self,
        request: DistributionPreviewRequestDto,
    ) -> AppResult<DistributionPreviewDto> {
        request.validate()?;

        let total = request.question_types.total();
        let difficulty = request
            .difficulty
            .map(|counts| counts.clamped(total))
            .unwrap_or_else(|| DifficultyCounts::suggested(total));

        let specs = distribution_service::split(&request.question_types, &difficulty).ok();

        Ok(DistributionPreviewDto {
            total,
            difficulty,
            consistent: specs.is_some(),
            option_count: request.phase.map(|phase| phase.option_count()),
            specs: specs.unwrap_or_default(),
        })
    }
}
