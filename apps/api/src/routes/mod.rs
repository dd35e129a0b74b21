pub mod health;
pub mod score;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/score",
            post(score::handle_score).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::scoring::dictionary::SkillDictionary;
    use crate::scoring::engine::ScoreEngine;
    use crate::scoring::recommend::VideoCatalog;
    use crate::scoring::similarity::tests::tech_embedder;
    use crate::scoring::skills::{NoEntityRecognizer, SkillExtractor};

    const BOUNDARY: &str = "atscore-test-boundary";

    fn test_state() -> AppState {
        AppState {
            config: Config {
                host: "127.0.0.1".to_string(),
                port: 0,
                rust_log: "info".to_string(),
                embedding_model: "test".to_string(),
                hf_token: None,
                max_upload_bytes: 1024 * 1024,
            },
            engine: Arc::new(ScoreEngine::new(
                SkillDictionary::technical().unwrap(),
                SkillExtractor::new(Box::new(NoEntityRecognizer)),
                Box::new(tech_embedder()),
                VideoCatalog::interview_prep(),
            )),
        }
    }

    /// (field name, file name, contents)
    fn multipart_body(parts: Vec<(&str, &str, Vec<u8>)>) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, file_name, contents) in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
            body.extend_from_slice(&contents);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn score_request(parts: Vec<(&str, &str, Vec<u8>)>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/score")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health_is_always_healthy() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "status": "healthy" }));
    }

    #[tokio::test]
    async fn test_missing_resume_is_bad_request() {
        let (status, body) = send(score_request(vec![("jd", "jd.pdf", b"%PDF".to_vec())])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Resume and Job Description files are required");
    }

    #[tokio::test]
    async fn test_unsupported_extension_is_bad_request() {
        let (status, body) = send(score_request(vec![
            ("resume", "resume.txt", b"python".to_vec()),
            ("jd", "jd.docx", b"python".to_vec()),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Only PDF and DOCX files are supported");
    }

    #[tokio::test]
    async fn test_empty_resume_file_is_server_error() {
        let (status, body) = send(score_request(vec![
            ("resume", "resume.pdf", b"".to_vec()),
            ("jd", "jd.docx", b"".to_vec()),
        ]))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Text extraction failed");
    }

    #[tokio::test]
    async fn test_unknown_fields_are_ignored() {
        let (status, _) = send(score_request(vec![
            ("cover_letter", "letter.pdf", b"hello".to_vec()),
            ("resume", "resume.pdf", b"".to_vec()),
        ]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_docx_upload_is_scored() {
        use docx_rs::{Docx, Paragraph, Run};

        fn docx(text: &str) -> Vec<u8> {
            let mut buf = std::io::Cursor::new(Vec::new());
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
                .build()
                .pack(&mut buf)
                .unwrap();
            buf.into_inner()
        }

        let resume = docx("Experienced in Python and TensorFlow for machine learning");
        let jd = docx("Looking for Python, TensorFlow, and Keras experience");
        let (status, body) = send(score_request(vec![
            ("resume", "resume.docx", resume),
            ("jd", "jd.DOCX", jd),
        ]))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["matched_skills"], serde_json::json!(["python", "tensorflow"]));
        assert_eq!(body["missing_skills"], serde_json::json!(["keras"]));
        assert_eq!(body["skill_match"], 66.7);
        assert_eq!(body["interview_videos"].as_array().unwrap().len(), 3);
        assert_eq!(
            body["suggestions"][0],
            "Focus on Data Science interview preparation"
        );
        assert!(body.get("primary_field").is_none());
    }
}
