use std::sync::Arc;

use crate::config::Config;
use crate::documents::DocumentExtractor;
use crate::llm_client::Completer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is fixed at startup; requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Completion backend. Default: `CompletionClient` against the configured endpoint.
    pub completer: Arc<dyn Completer>,
    /// Document text extractor. Default: `PdfExtractor`.
    pub extractor: Arc<dyn DocumentExtractor>,
}
