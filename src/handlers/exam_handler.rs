use actix_web::{
    delete, get, http::header::ContentDisposition, post, web, HttpRequest, HttpResponse,
};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::Phase,
        dto::{
            request::{DistributionPreviewRequestDto, GenerateExamRequestDto},
            response::{DeleteSessionResponse, ExamSessionResponseDto, PhaseDto},
        },
    },
    services::document_service::DOCX_CONTENT_TYPE,
};

/// Malformed or mistyped JSON bodies are reported in the same error shape as
/// validation failures.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {}", err);
        AppError::ValidationError(err.to_string()).into()
    })
}

#[get("/api/curriculum/phases")]
pub async fn list_phases() -> HttpResponse {
    let phases: Vec<PhaseDto> = Phase::ALL.into_iter().map(PhaseDto::from).collect();
    HttpResponse::Ok().json(phases)
}

#[post("/api/exams/distribution")]
pub async fn preview_distribution(
    state: web::Data<AppState>,
    request: web::Json<DistributionPreviewRequestDto>,
) -> Result<HttpResponse, AppError> {
    let preview = state
        .exam_service
        .preview_distribution(request.into_inner())?;
    Ok(HttpResponse::Ok().json(preview))
}

#[post("/api/exams")]
pub async fn generate_exam(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateExamRequestDto>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "[{}] Exam generation requested",
        get_request_id(&req).unwrap_or_default()
    );
    let session = state.exam_service.generate_exam(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(ExamSessionResponseDto::from(&session)))
}

#[get("/api/exams/{id}")]
pub async fn get_exam(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.exam_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(ExamSessionResponseDto::from(&session)))
}

#[get("/api/exams/{id}/document")]
pub async fn download_exam_document(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let (file_name, bytes) = state.exam_service.export_document(&id).await?;
    Ok(HttpResponse::Ok()
        .content_type(DOCX_CONTENT_TYPE)
        .insert_header(ContentDisposition::attachment(file_name))
        .body(bytes))
}

#[delete("/api/exams/{id}")]
pub async fn delete_exam(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.exam_service.delete_session(&id).await?;
    Ok(HttpResponse::Ok().json(DeleteSessionResponse {
        message: format!("Exam session '{}' deleted", id),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    use crate::{
        config::Config,
        services::generation_service::{MockQuestionGenerator, QuestionGenerator},
        test_utils::{
            fixtures,
            test_helpers::{assert_error_status, assert_success_status},
        },
    };

    fn state_with(generator: Option<MockQuestionGenerator>) -> AppState {
        AppState::with_generator(
            Config::test_config(),
            generator.map(|g| Arc::new(g) as Arc<dyn QuestionGenerator>),
        )
    }

    fn answering(count: u32) -> MockQuestionGenerator {
        let mut generator = MockQuestionGenerator::new();
        generator
            .expect_generate()
            .returning(move |_| Ok(fixtures::generated_exam_json(count)));
        generator
    }

    #[actix_web::test]
    async fn test_list_phases() {
        let app = test::init_service(App::new().service(list_phases)).await;
        let req = test::TestRequest::get().uri("/api/curriculum/phases").to_request();

        let body: Value = test::call_and_read_body_json(&app, req).await;
        let phases = body.as_array().expect("array of phases");
        assert_eq!(phases.len(), 6);
        assert_eq!(phases[4]["phase"], "E");
        assert_eq!(phases[4]["grades"], serde_json::json!(["10"]));
        assert_eq!(phases[4]["option_letters"].as_array().map(Vec::len), Some(5));
    }

    #[actix_web::test]
    async fn test_generate_then_download() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(Some(answering(2)))))
                .service(generate_exam)
                .service(download_exam_document),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .set_json(fixtures::generate_request_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total"], 2);
        assert_eq!(body["file_name"], "Soal_Kimia_Kelas_10_Fase_E.docx");
        let download_url = body["download_url"].as_str().expect("download url").to_string();

        let req = test::TestRequest::get().uri(&download_url).to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());
        assert_eq!(
            resp.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some(DOCX_CONTENT_TYPE)
        );
        let disposition = resp
            .headers()
            .get("content-disposition")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(disposition.contains("Soal_Kimia_Kelas_10_Fase_E.docx"));

        let bytes = test::read_body(resp).await;
        assert_eq!(&bytes[..2], b"PK");
    }

    #[actix_web::test]
    async fn test_generate_with_mismatched_counts_is_bad_request() {
        let mut generator = MockQuestionGenerator::new();
        generator.expect_generate().never();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(Some(generator))))
                .service(generate_exam),
        )
        .await;

        let mut payload = fixtures::generate_request_json();
        payload["difficulty"]["low"] = serde_json::json!(9);

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_subject_with_line_break_is_rejected_before_generation() {
        let mut generator = MockQuestionGenerator::new();
        generator.expect_generate().never();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(Some(generator))))
                .app_data(json_config())
                .service(generate_exam),
        )
        .await;

        let mut payload = fixtures::generate_request_json();
        payload["subject"] = serde_json::json!("Kimia\r\nX-Evil: 1");

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["kind"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_grade_outside_phase_is_bad_request() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(None)))
                .app_data(json_config())
                .service(generate_exam),
        )
        .await;

        let mut payload = fixtures::generate_request_json();
        payload["grade"] = serde_json::json!("7");

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_phase_uses_error_shape() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(None)))
                .app_data(json_config())
                .service(generate_exam),
        )
        .await;

        let mut payload = fixtures::generate_request_json();
        payload["phase"] = serde_json::json!("Z");

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
        assert_eq!(body["kind"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_generate_without_api_key_is_unavailable() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(None)))
                .service(generate_exam),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exams")
            .set_json(fixtures::generate_request_json())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn test_download_unknown_session_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(None)))
                .service(download_exam_document)
                .service(get_exam)
                .service(delete_exam),
        )
        .await;

        for req in [
            test::TestRequest::get()
                .uri(&format!("/api/exams/{}/document", Uuid::new_v4()))
                .to_request(),
            test::TestRequest::get()
                .uri(&format!("/api/exams/{}", Uuid::new_v4()))
                .to_request(),
            test::TestRequest::delete()
                .uri(&format!("/api/exams/{}", Uuid::new_v4()))
                .to_request(),
        ] {
            let resp = test::call_service(&app, req).await;
            assert_error_status(resp.status());
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }

    #[actix_web::test]
    async fn test_preview_distribution() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state_with(None)))
                .service(preview_distribution),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/exams/distribution")
            .set_json(serde_json::json!({
                "phase": "C",
                "question_types": { "multiple_choice": 2 },
                "difficulty": { "low": 5, "medium": 5 }
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["total"], 2);
        assert_eq!(body["difficulty"]["low"], 2);
        assert_eq!(body["difficulty"]["medium"], 0);
        assert_eq!(body["consistent"], true);
        assert_eq!(body["option_count"], 4);
        assert_eq!(body["specs"].as_array().map(Vec::len), Some(2));
    }
}
