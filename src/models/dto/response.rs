use serde::Serialize;
use uuid::Uuid;

use crate::models::domain::{
    DifficultyCounts, ExamSession, Phase, QuestionRecord, QuestionSpec, QuestionType,
};

/// One blueprint (kisi-kisi) row as shown in the on-screen preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlueprintRowDto {
    pub number: String,
    pub question_type: String,
    pub learning_outcome: String,
    pub indicator: String,
    pub cognitive_level: String,
}

impl From<&QuestionRecord> for BlueprintRowDto {
    fn from(record: &QuestionRecord) -> Self {
        BlueprintRowDto {
            number: record.number_label(),
            question_type: record.type_label().to_string(),
            learning_outcome: record.learning_outcome.clone(),
            indicator: record.indicator.clone(),
            cognitive_level: record.level_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDto {
    pub letter: char,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPreviewDto {
    pub number: String,
    pub question_type: String,
    pub cognitive_level: String,
    pub question: String,
    /// Only filled for multiple choice, bounded by the phase's letters.
    pub options: Vec<OptionDto>,
    pub answer_key: String,
}

impl QuestionPreviewDto {
    pub fn from_record(record: &QuestionRecord, phase: Phase) -> Self {
        let options = if record.question_type == Some(QuestionType::MultipleChoice) {
            record
                .options
                .present(phase.option_letters())
                .map(|(letter, text)| OptionDto {
                    letter,
                    text: text.to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };

        QuestionPreviewDto {
            number: record.number_label(),
            question_type: record.type_label().to_string(),
            cognitive_level: record.level_label().to_string(),
            question: record.question.clone(),
            options,
            answer_key: record.answer_key.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExamSessionResponseDto {
    pub session_id: Uuid,
    pub total: usize,
    pub file_name: String,
    pub download_url: String,
    pub blueprint: Vec<BlueprintRowDto>,
    pub questions: Vec<QuestionPreviewDto>,
    pub message: String,
}

impl From<&ExamSession> for ExamSessionResponseDto {
    fn from(session: &ExamSession) -> Self {
        let phase = session.metadata.phase;
        ExamSessionResponseDto {
            session_id: session.id,
            total: session.records.len(),
            file_name: session.metadata.file_name(),
            download_url: format!("/api/exams/{}/document", session.id),
            blueprint: session.records.iter().map(BlueprintRowDto::from).collect(),
            questions: session
                .records
                .iter()
                .map(|record| QuestionPreviewDto::from_record(record, phase))
                .collect(),
            message: "Soal dan kisi-kisi berhasil dibuat".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PhaseDto {
    pub phase: Phase,
    pub grades: Vec<&'static str>,
    pub option_letters: Vec<char>,
}

impl From<Phase> for PhaseDto {
    fn from(phase: Phase) -> Self {
        PhaseDto {
            phase,
            grades: phase.grades().to_vec(),
            option_letters: phase.option_letters().to_vec(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DistributionPreviewDto {
    pub total: u32,
    pub difficulty: DifficultyCounts,
    pub consistent: bool,
    pub option_count: Option<usize>,
    pub specs: Vec<QuestionSpec>,
}

#[derive(Debug, Serialize)]
pub struct DeleteSessionResponse {
    pub message: String,
}
