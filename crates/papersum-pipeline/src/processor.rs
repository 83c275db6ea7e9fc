use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use papersum_core::{Document, DocumentFormat, Metadata, SummarizationBackend, SummarizeError};
use papersum_ingest::{IngestError, extract_document};

use crate::output::render_summary;

/// Why one document produced no summary file.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("failed to extract text: {0}")]
    Extraction(#[source] IngestError),
    #[error("extraction task failed: {0}")]
    ExtractionTask(#[from] tokio::task::JoinError),
    #[error("no summary generated: {0}")]
    Summarization(#[from] SummarizeError),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<IngestError> for ProcessError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::UnsupportedFormat(path) => ProcessError::UnsupportedFormat(path),
            other => ProcessError::Extraction(other),
        }
    }
}

/// Turns one input document into one summary file.
///
/// The processor owns no per-document state; the same instance handles every
/// file of a batch.
#[derive(Clone)]
pub struct PaperProcessor {
    backend: Arc<dyn SummarizationBackend>,
}

impl PaperProcessor {
    pub fn new(backend: Arc<dyn SummarizationBackend>) -> Self {
        Self { backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Extract a document's text on the blocking pool.
    pub async fn extract(&self, input: &Path) -> Result<Document, ProcessError> {
        if DocumentFormat::from_path(input).is_none() {
            return Err(ProcessError::UnsupportedFormat(input.to_path_buf()));
        }
        let path = input.to_path_buf();
        let doc = tokio::task::spawn_blocking(move || extract_document(&path)).await??;
        Ok(doc)
    }

    /// Process one paper: extract, infer metadata, summarize, render and
    /// write `output`, replacing any existing file.
    ///
    /// Returns the rendered text. Nothing is written unless summarization
    /// succeeded.
    pub async fn process(&self, input: &Path, output: &Path) -> Result<String, ProcessError> {
        let doc = self.extract(input).await?;
        let metadata = papersum_parsing::infer_from_document(&doc);
        let summary = self.summarize_document(&doc, &metadata).await?;

        let rendered = render_summary(&metadata, &summary);
        tokio::fs::write(output, &rendered)
            .await
            .map_err(|source| ProcessError::Write {
                path: output.to_path_buf(),
                source,
            })?;

        tracing::info!(
            input = %input.display(),
            output = %output.display(),
            "summary written"
        );
        Ok(rendered)
    }

    async fn summarize_document(
        &self,
        doc: &Document,
        metadata: &Metadata,
    ) -> Result<String, ProcessError> {
        let text = doc.text();
        tracing::debug!(
            path = %doc.path.display(),
            backend = self.backend.name(),
            chars = text.len(),
            has_title = metadata.title.is_some(),
            "summarizing"
        );

        match self.backend.summarize(&text).await {
            Ok(summary) if summary.trim().is_empty() => Err(SummarizeError::Empty {
                backend: self.backend.name().to_string(),
            }
            .into()),
            Ok(summary) => Ok(summary),
            Err(e) => {
                tracing::warn!(path = %doc.path.display(), error = %e, "summarization failed");
                Err(e.into())
            }
        }
    }
}
