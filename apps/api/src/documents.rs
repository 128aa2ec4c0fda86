//! Document intake — stores uploaded files and turns PDFs into plain text.
//!
//! Extraction is a flat concatenation of page text in page order; no layout or
//! structure survives. Callers run `extract` on the blocking pool.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF '{path}': {message}")]
    Pdf { path: String, message: String },
}

/// Turns a stored document into UTF-8 text.
/// Carried in `AppState` as `Arc<dyn DocumentExtractor>`.
pub trait DocumentExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Default extractor backed by `pdf-extract`.
pub struct PdfExtractor;

impl DocumentExtractor for PdfExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path)?;
        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| ExtractError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("Extracted {} chars from {}", text.len(), path.display());
        Ok(text)
    }
}

/// Writes an uploaded file into `upload_dir` and returns its path.
///
/// The client-supplied name is sanitized and prefixed with a random id; two
/// uploads with the same name always land on distinct paths.
pub async fn save_upload(
    upload_dir: &Path,
    file_name: Option<&str>,
    data: &[u8],
) -> Result<PathBuf, std::io::Error> {
    tokio::fs::create_dir_all(upload_dir).await?;
    let safe = secure_filename(file_name.unwrap_or_default());
    let safe = if safe.is_empty() {
        "upload.pdf".to_string()
    } else {
        safe
    };
    let path = upload_dir.join(format!("{}_{}", Uuid::new_v4().simple(), safe));
    tokio::fs::write(&path, data).await?;
    debug!("Stored upload at {} ({} bytes)", path.display(), data.len());
    Ok(path)
}

/// Deletes a stored upload. Failures are logged and otherwise ignored.
pub async fn remove_upload(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove upload {}: {}", path.display(), e);
    }
}

/// Reduces a client-supplied file name to a flat, ASCII-only name.
///
/// Path separators become word breaks, runs of whitespace become `_`, and any
/// character outside `[A-Za-z0-9_.-]` is dropped. Leading dots and underscores
/// are trimmed so the result is never hidden and never `..`.
pub fn secure_filename(name: &str) -> String {
    let flattened: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();
    let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_start_matches(['.', '_']).to_string()
}
