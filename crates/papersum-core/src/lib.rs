use std::path::{Path, PathBuf};

pub mod backend;
pub mod config_file;
pub mod summarizer;

pub use backend::{BackendError, DocumentBackend};
pub use summarizer::{SummarizationBackend, SummarizeError, SummaryFuture};

/// Supported input document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    /// `.docx`, and legacy `.doc` which is routed to the same reader.
    Word,
}

impl DocumentFormat {
    /// Map a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" | "doc" => Some(DocumentFormat::Word),
            _ => None,
        }
    }

    /// Detect the format of `path` from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "PDF",
            DocumentFormat::Word => "Word",
        }
    }
}

/// A document after text extraction.
///
/// PDF documents carry one entry per page. Word documents have no page
/// boundaries and carry a single entry with every paragraph.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub format: DocumentFormat,
    pub pages: Vec<String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, format: DocumentFormat, pages: Vec<String>) -> Self {
        Self {
            path: path.into(),
            format,
            pages,
        }
    }

    /// Text of the first page, if the document has any pages.
    pub fn first_page(&self) -> Option<&str> {
        self.pages.first().map(String::as_str)
    }

    /// Full document text, pages joined by newlines.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }

    /// File name for display, falling back to the full path.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Bibliographic metadata inferred from a document's first page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub authors: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.authors.is_none()
    }
}

/// A contiguous run of words from a document, sized for model input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub word_count: usize,
}

/// Output of the chunked summarization pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryResult {
    /// One summary per retained chunk, in document order.
    pub chunk_summaries: Vec<String>,
    /// Chunk summaries joined with single spaces.
    pub intermediate: String,
    /// Result of the condensation pass, when the intermediate text was long
    /// enough to need one.
    pub condensed: Option<String>,
}

impl SummaryResult {
    pub fn was_condensed(&self) -> bool {
        self.condensed.is_some()
    }

    pub fn final_summary(&self) -> &str {
        self.condensed.as_deref().unwrap_or(&self.intermediate)
    }

    pub fn into_final(self) -> String {
        self.condensed.unwrap_or(self.intermediate)
    }
}
