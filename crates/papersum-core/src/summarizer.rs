//! The summarization backend seam shared by the remote and local variants.

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizeError {
    /// Every chunk was at or below the minimum word count.
    #[error("no chunk longer than {min_words} words to summarize")]
    NoValidChunks { min_words: usize },
    /// The model call failed (network, HTTP status, malformed payload, inference).
    #[error("{backend} request failed: {message}")]
    Backend { backend: String, message: String },
    /// The model answered but produced no text.
    #[error("{backend} returned an empty summary")]
    Empty { backend: String },
}

pub type SummaryFuture<'a> = Pin<Box<dyn Future<Output = Result<String, SummarizeError>> + Send + 'a>>;

/// A backend that condenses a document's full text into a summary.
///
/// An `Err` means no summary for this document: the caller reports it and
/// moves on to the next file.
pub trait SummarizationBackend: Send + Sync {
    /// Short name used in logs and reports (e.g. "remote", "local").
    fn name(&self) -> &str;

    /// Summarize the full extracted text of one document.
    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a>;
}
