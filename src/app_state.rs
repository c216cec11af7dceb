use std::sync::Arc;

use chrono::Duration;

use crate::{
    config::Config,
    repositories::InMemorySessionRepository,
    services::{
        exam_service::ExamService,
        generation_service::{OpenAiQuestionGenerator, QuestionGenerator},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub exam_service: Arc<ExamService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        if !config.generation_configured() {
            log::warn!("GEMINI_API_KEY is not set; exam generation is disabled");
        }

        let generator = OpenAiQuestionGenerator::from_config(&config).map(|generator| {
            log::info!("Generation client ready (model {})", generator.model());
            Arc::new(generator) as Arc<dyn QuestionGenerator>
        });

        Self::with_generator(config, generator)
    }

    /// Builds the state around an explicit generator, or none at all.
    pub fn with_generator(config: Config, generator: Option<Arc<dyn QuestionGenerator>>) -> Self {
        let sessions = Arc::new(InMemorySessionRepository::new(Duration::minutes(
            config.session_ttl_minutes,
        )));

        Self {
            exam_service: Arc::new(ExamService::new(generator, sessions)),
            config: Arc::new(config),
        }
    }
}
