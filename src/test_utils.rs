use serde_json::{json, Value};

use crate::models::{
    domain::{AnswerOptions, CognitiveLevel, QuestionRecord, QuestionType},
    dto::request::GenerateExamRequestDto,
};

pub mod fixtures {
    use super::*;

    /// Ten-question chemistry request for phase E that passes validation.
    pub fn generate_request_json() -> Value {
        json!({
            "phase": "E",
            "grade": "10",
            "subject": "Kimia",
            "topic": "Stoikiometri",
            "sub_topics": "Konsep mol, Hukum dasar kimia",
            "learning_outcome": "Peserta didik mampu menerapkan konsep mol dalam perhitungan kimia.",
            "question_types": { "multiple_choice": 5, "essay": 2, "short_answer": 3 },
            "difficulty": { "low": 3, "medium": 4, "high": 3 }
        })
    }

    pub fn generate_request() -> GenerateExamRequestDto {
        serde_json::from_value(generate_request_json()).expect("fixture request should deserialize")
    }

    pub fn multiple_choice_record(number: u32) -> QuestionRecord {
        QuestionRecord {
            number: Some(number),
            question_type: Some(QuestionType::MultipleChoice),
            learning_outcome: "Menerapkan konsep mol".to_string(),
            indicator: "Menghitung jumlah mol dari massa zat".to_string(),
            cognitive_level: Some(CognitiveLevel::C3),
            question: format!("Berapa mol dalam {} gram air?", number * 18),
            options: AnswerOptions {
                a: Some(format!("{} mol", number)),
                b: Some("2 mol".to_string()),
                c: Some("3 mol".to_string()),
                d: Some("4 mol".to_string()),
                e: Some("5 mol".to_string()),
            },
            answer_key: "A".to_string(),
        }
    }

    /// Raw generation output with `count` multiple-choice questions.
    pub fn generated_exam_json(count: u32) -> String {
        let records: Vec<QuestionRecord> = (1..=count).map(multiple_choice_record).collect();
        json!({ "soal_dan_kisi_kisi": records }).to_string()
    }
}

pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::generation_service::parse_generated_exam;
    use validator::Validate;

    #[test]
    fn test_fixture_request_is_valid() {
        let request = generate_request();
        assert!(request.validate().is_ok());
        assert_eq!(request.total_questions(), 10);
        assert_eq!(request.sub_topics, vec!["Konsep mol", "Hukum dasar kimia"]);
    }

    #[test]
    fn test_generated_exam_json_parses_back() {
        let records = parse_generated_exam(&generated_exam_json(3)).expect("fixture should parse");
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], multiple_choice_record(3));
    }
}
