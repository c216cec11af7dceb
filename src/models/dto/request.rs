use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::domain::{DifficultyCounts, ExamMetadata, Phase, TypeCounts};

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_grade_for_phase"))]
pub struct GenerateExamRequestDto {
    pub phase: Phase,

    #[validate(length(min = 1, max = 10), custom(function = "single_line_text"))]
    pub grade: String,

    #[validate(length(min = 1, max = 100), custom(function = "single_line_text"))]
    pub subject: String,

    #[validate(length(min = 1, max = 200), custom(function = "single_line_text"))]
    pub topic: String,

    /// Accepts either a JSON list or a single comma-separated string.
    #[serde(default, deserialize_with = "comma_separated_or_list")]
    pub sub_topics: Vec<String>,

    #[validate(length(min = 1, max = 4000))]
    pub learning_outcome: String,

    #[validate(nested)]
    pub question_types: TypeCounts,

    #[validate(nested)]
    pub difficulty: DifficultyCounts,

    /// Session of a previous generation that this request replaces.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

impl GenerateExamRequestDto {
    pub fn total_questions(&self) -> u32 {
        self.question_types.total()
    }

    pub fn metadata(&self) -> ExamMetadata {
        ExamMetadata {
            subject: self.subject.trim().to_string(),
            topic: self.topic.trim().to_string(),
            phase: self.phase,
            grade: self.grade.trim().to_string(),
        }
    }
}

fn validate_grade_for_phase(request: &GenerateExamRequestDto) -> Result<(), ValidationError> {
    if request.phase.accepts_grade(&request.grade) {
        return Ok(());
    }

    let mut error = ValidationError::new("grade_not_in_phase");
    error.message = Some(
        format!(
            "Grade '{}' is not part of phase {} (allowed: {})",
            request.grade,
            request.phase,
            request.phase.grades().join(", ")
        )
        .into(),
    );
    Err(error)
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DistributionPreviewRequestDto {
    #[serde(default)]
    pub phase: Option<Phase>,

    #[validate(nested)]
    pub question_types: TypeCounts,

    /// When omitted the suggested defaults for the total are used.
    #[serde(default)]
    #[validate(nested)]
    pub difficulty: Option<DifficultyCounts>,
}

/// Subject, grade and topic end up in the download file name and header, so
/// control characters are refused up front.
fn single_line_text(value: &str) -> Result<(), ValidationError> {
    if !value.chars().any(char::is_control) {
        return Ok(());
    }

    let mut error = ValidationError::new("control_characters");
    error.message = Some("Must not contain control characters such as line breaks".into());
    Err(error)
}

fn comma_separated_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SubTopics {
        Text(String),
        List(Vec<String>),
    }

    let items = match Option::<SubTopics>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(SubTopics::Text(text)) => text.split(',').map(str::to_string).collect(),
        Some(SubTopics::List(list)) => list,
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
