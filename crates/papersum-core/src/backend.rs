use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for format-specific text extraction backends.
///
/// Implementors only turn a file into page texts; line splitting, metadata
/// inference and chunking live in `papersum_parsing`.
pub trait DocumentBackend: Send + Sync {
    /// Extract the text of every page, in order.
    ///
    /// Formats without page boundaries return a single entry.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError>;
}
