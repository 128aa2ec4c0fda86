pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(handlers::handle_home))
        .route("/screen", get(handlers::handle_screen))
        .route("/create-resume", get(handlers::handle_create_resume))
        // Screening
        .route("/analyze", post(handlers::handle_analyze))
        .route("/api/v1/analyze", post(handlers::handle_analyze_json))
        .route("/generate-resume", post(handlers::handle_generate_resume))
        .layer(upload_limit)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::documents::{DocumentExtractor, ExtractError};
    use crate::llm_client::{Completer, LlmError};

    const BOUNDARY: &str = "screener-test-boundary";

    struct PlainTextExtractor;

    impl DocumentExtractor for PlainTextExtractor {
        fn extract(&self, path: &Path) -> Result<String, ExtractError> {
            Ok(std::fs::read_to_string(path)?)
        }
    }

    struct FixedCompleter(&'static str);

    #[async_trait]
    impl Completer for FixedCompleter {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct EmptyCompleter;

    #[async_trait]
    impl Completer for EmptyCompleter {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    fn test_config(upload_dir: PathBuf) -> Config {
        Config {
            completion_api_key: "test-key".to_string(),
            completion_api_url: "http://127.0.0.1:9/unused".to_string(),
            completion_model: "llama3-8b-8192".to_string(),
            completion_max_tokens: 1000,
            completion_temperature: 0.7,
            completion_timeout_secs: 5,
            upload_dir,
            max_upload_bytes: 1024 * 1024,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }

    fn test_router(upload_dir: PathBuf, reply: &'static str) -> Router {
        build_router(AppState {
            config: test_config(upload_dir),
            completer: Arc::new(FixedCompleter(reply)),
            extractor: Arc::new(PlainTextExtractor),
        })
    }

    fn multipart_request(uri: &str, files: &[(&str, &str, &str)]) -> Request<Body> {
        let mut body = String::new();
        for (field, file_name, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\n\
                 Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/pdf\r\n\r\n\
                 {content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    const REPLY: &str = "Compatibility Score: 85/100. Matching Skills: - Python - SQL. \
                         Missing Skills: - Leadership.";

    #[tokio::test]
    async fn test_health() {
        let dir = tempfile::tempdir().unwrap();
        let response = test_router(dir.path().to_path_buf(), REPLY)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_pages_render() {
        let dir = tempfile::tempdir().unwrap();
        for uri in ["/", "/screen", "/create-resume"] {
            let response = test_router(dir.path().to_path_buf(), REPLY)
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(body_text(response).await.starts_with("<!DOCTYPE html>"));
        }
    }

    #[tokio::test]
    async fn test_analyze_renders_report() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let request = multipart_request(
            "/analyze",
            &[
                ("job_description", "job.pdf", "Data engineer: Python, SQL, leadership"),
                ("resume", "resume.pdf", "Python and SQL developer"),
            ],
        );

        let response = test_router(uploads.clone(), REPLY)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("85/100"));
        assert!(html.contains("Excellent Match"));
        assert!(html.contains("<li>Python</li>"));
        assert!(html.contains("<li>Leadership</li>"));
        assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_analyses_leave_no_uploads_behind() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        let router = build_router(AppState {
            config: test_config(uploads.clone()),
            completer: Arc::new(EmptyCompleter),
            extractor: Arc::new(PlainTextExtractor),
        });

        for _ in 0..5 {
            let request = multipart_request(
                "/analyze",
                &[
                    ("job_description", "job.pdf", "jd"),
                    ("resume", "resume.pdf", "cv"),
                ],
            );
            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        }

        assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_json_returns_structured_result() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(
            "/api/v1/analyze",
            &[
                ("job_description", "job.pdf", "jd"),
                ("resume", "resume.pdf", "cv"),
            ],
        );

        let response = test_router(dir.path().to_path_buf(), "Nothing useful here.")
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["score"], 75);
        assert_eq!(json["category"], "Good");
        assert_eq!(json["score_source"]["kind"], "default");
        assert_eq!(json["missing_skills"][0], "Additional Experience Needed");
    }

    #[tokio::test]
    async fn test_analyze_without_resume_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request("/analyze", &[("job_description", "job.pdf", "jd")]);

        let response = test_router(dir.path().to_path_buf(), REPLY)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "resume file is required");
    }

    #[tokio::test]
    async fn test_analyze_with_empty_file_is_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let request = multipart_request(
            "/analyze",
            &[("job_description", "job.pdf", ""), ("resume", "resume.pdf", "cv")],
        );

        let response = test_router(dir.path().to_path_buf(), REPLY)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_generate_resume_is_not_offered_yet() {
        let dir = tempfile::tempdir().unwrap();
        let request = Request::post("/generate-resume")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Jane+Doe&skills=Rust"))
            .unwrap();

        let response = test_router(dir.path().to_path_buf(), REPLY)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "Resume generation feature coming soon!");
    }
}
