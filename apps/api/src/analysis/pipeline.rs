//! Analysis pipeline: stored documents → text → prompt → completion → interpreted result.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use tracing::info;

use crate::analysis::interpreter::{interpret, AnalysisResult};
use crate::documents::DocumentExtractor;
use crate::errors::AppError;
use crate::llm_client::prompts::build_analysis_prompt;
use crate::llm_client::Completer;

/// Runs one full analysis for a stored job description and resume.
///
/// Extraction and completion failures are returned to the caller; the
/// interpretation step itself cannot fail.
pub async fn analyze_documents(
    extractor: Arc<dyn DocumentExtractor>,
    completer: &dyn Completer,
    job_path: &Path,
    resume_path: &Path,
) -> Result<AnalysisResult, AppError> {
    let job_text = extract_blocking(extractor.clone(), job_path.to_path_buf()).await?;
    let resume_text = extract_blocking(extractor, resume_path.to_path_buf()).await?;

    info!(
        job_chars = job_text.len(),
        resume_chars = resume_text.len(),
        "Extracted document text, requesting analysis"
    );

    let prompt = build_analysis_prompt(&job_text, &resume_text);
    let reply = completer.complete(&prompt).await?;

    let result = interpret(reply);
    info!(
        score = result.score.value(),
        category = result.category.label(),
        inferred = result.score_is_inferred(),
        "Analysis complete"
    );
    Ok(result)
}

async fn extract_blocking(
    extractor: Arc<dyn DocumentExtractor>,
    path: PathBuf,
) -> Result<String, AppError> {
    let text = tokio::task::spawn_blocking(move || extractor.extract(&path))
        .await
        .map_err(|e| AppError::Internal(anyhow!("Document extraction task failed: {e}")))??;
    Ok(text)
}
