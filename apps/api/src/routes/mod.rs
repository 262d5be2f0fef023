pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::ingest::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes/ingest",
            post(handlers::handle_ingest).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/api/v1/resumes/:id", get(handlers::handle_get_resume))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::dispatcher::tests::{StubOcr, GOOD_TEXT};
    use crate::extraction::ExtractionDispatcher;
    use crate::ingest::IngestPipeline;
    use crate::sink::MemoryResumeSink;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "resume-ingest-test-boundary";

    fn app(ocr_text: &str, max_upload_bytes: usize) -> Router {
        let state = AppState {
            pipeline: Arc::new(IngestPipeline::new(ExtractionDispatcher::with_ocr(
                StubOcr::returning(ocr_text),
            ))),
            sink: Arc::new(MemoryResumeSink::new()),
        };
        build_router(state, max_upload_bytes)
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(filename: &str, mime: &str, content: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: {mime}\r\n\r\n{content}\r\n"
        )
    }

    fn ingest_request(parts: &[String]) -> Request<Body> {
        let mut body = parts.concat();
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/ingest")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app("", 1024)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_ingest_accepts_and_stores_with_metadata() {
        let app = app(GOOD_TEXT, 1 << 20);
        let request = ingest_request(&[
            text_part("job_title", "Staff Engineer"),
            text_part("company", "Initech"),
            file_part("scan.png", "image/png", "fake image bytes"),
        ]);

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["accepted"], true);
        assert_eq!(body["used_fallback"], true);
        assert_eq!(
            body["segments"]["skills"],
            "rust go python kubernetes postgres\n"
        );
        assert_eq!(body["segments"].as_object().unwrap().len(), 12);

        let id = body["resume_id"].as_str().unwrap();
        let response = app
            .oneshot(
                Request::get(format!("/api/v1/resumes/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let stored = json_body(response).await;
        assert_eq!(stored["filename"], "scan.png");
        assert_eq!(stored["metadata"]["job_title"], "Staff Engineer");
        assert_eq!(stored["metadata"]["company"], "Initech");
    }

    #[tokio::test]
    async fn test_ingest_rejects_missing_experience() {
        let contact_only = "John Smith\n555-1234\njohn.smith@example.com\n\
            221B Baker Street London NW1 6XE United Kingdom\n\
            linkedin.com/in/johnsmith github.com/johnsmith";
        let response = app(contact_only, 1 << 20)
            .oneshot(ingest_request(&[file_part(
                "cv.doc",
                "application/msword",
                "legacy bytes",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["accepted"], false);
        assert_eq!(body["reason"], "MissingExperienceSection");
    }

    #[tokio::test]
    async fn test_ingest_rejects_unmappable_type() {
        let response = app(GOOD_TEXT, 1 << 20)
            .oneshot(ingest_request(&[file_part(
                "resume",
                "application/octet-stream",
                "???",
            )]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json_body(response).await["reason"], "UnreadableDocument");
    }

    #[tokio::test]
    async fn test_ingest_requires_file_part() {
        let response = app(GOOD_TEXT, 1 << 20)
            .oneshot(ingest_request(&[text_part("job_title", "Engineer")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ingest_rejects_upload_over_size_limit() {
        let oversized = "x".repeat(8 * 1024);
        let response = app(GOOD_TEXT, 1024)
            .oneshot(ingest_request(&[file_part("cv.pdf", "application/pdf", &oversized)]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json_body(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn test_unknown_resume_is_404() {
        let response = app("", 1024)
            .oneshot(
                Request::get(format!("/api/v1/resumes/{}", uuid::Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
