//! Axum route handlers for resume screening.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    response::Html,
    Form, Json,
};
use tracing::{debug, info};

use crate::analysis::interpreter::AnalysisResult;
use crate::analysis::pipeline::analyze_documents;
use crate::documents::{remove_upload, save_upload};
use crate::errors::AppError;
use crate::render;
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Multipart intake
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct UploadedFile {
    file_name: Option<String>,
    data: Bytes,
}

#[derive(Debug)]
struct ScreeningUpload {
    job_description: UploadedFile,
    resume: UploadedFile,
}

async fn read_screening_upload(mut multipart: Multipart) -> Result<ScreeningUpload, AppError> {
    let mut job_description = None;
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read field '{name}': {e}")))?;

        match name.as_str() {
            JOB_DESCRIPTION_FIELD => job_description = Some(UploadedFile { file_name, data }),
            RESUME_FIELD => resume = Some(UploadedFile { file_name, data }),
            other => debug!("Ignoring unexpected upload field '{other}'"),
        }
    }

    Ok(ScreeningUpload {
        job_description: require_file(job_description, JOB_DESCRIPTION_FIELD)?,
        resume: require_file(resume, RESUME_FIELD)?,
    })
}

fn require_file(file: Option<UploadedFile>, field: &str) -> Result<UploadedFile, AppError> {
    let file = file.ok_or_else(|| AppError::Validation(format!("{field} file is required")))?;
    if file.data.is_empty() {
        return Err(AppError::Validation(format!("{field} file is empty")));
    }
    Ok(file)
}

async fn run_analysis(state: &AppState, multipart: Multipart) -> Result<AnalysisResult, AppError> {
    let upload = read_screening_upload(multipart).await?;
    let upload_dir = &state.config.upload_dir;

    let job_path = save_upload(
        upload_dir,
        upload.job_description.file_name.as_deref(),
        &upload.job_description.data,
    )
    .await?;
    let resume_path = match save_upload(
        upload_dir,
        upload.resume.file_name.as_deref(),
        &upload.resume.data,
    )
    .await
    {
        Ok(path) => path,
        Err(e) => {
            remove_upload(&job_path).await;
            return Err(e.into());
        }
    };

    info!(
        job = %job_path.display(),
        resume = %resume_path.display(),
        "Stored screening uploads"
    );

    let result = analyze_documents(
        state.extractor.clone(),
        state.completer.as_ref(),
        &job_path,
        &resume_path,
    )
    .await;

    // Uploads live only for the duration of one request.
    remove_upload(&job_path).await;
    remove_upload(&resume_path).await;
    result
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
pub async fn handle_home() -> Html<String> {
    Html(render::home_page())
}

/// GET /screen
pub async fn handle_screen() -> Html<String> {
    Html(render::screen_page())
}

/// GET /create-resume
pub async fn handle_create_resume() -> Html<String> {
    Html(render::create_resume_page())
}

/// POST /analyze
///
/// Multipart upload of `job_description` and `resume` PDFs. Renders the report page.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let result = run_analysis(&state, multipart).await?;
    Ok(Html(render::result_page(&result)))
}

/// POST /api/v1/analyze
///
/// Same upload as `/analyze`, returning the structured result as JSON.
pub async fn handle_analyze_json(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AppError> {
    let result = run_analysis(&state, multipart).await?;
    Ok(Json(result))
}

/// POST /generate-resume
///
/// Accepts the create-resume form. Generation itself is not offered yet.
pub async fn handle_generate_resume(Form(form): Form<HashMap<String, String>>) -> &'static str {
    debug!("Received resume generation form with {} fields", form.len());
    "Resume generation feature coming soon!"
}
