use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod docx;

pub use docx::DocxBackend;
// Re-export domain types for convenience
pub use papersum_core::{BackendError, Document, DocumentBackend, DocumentFormat};

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("{format} extraction error: {source}")]
    Backend {
        format: &'static str,
        #[source]
        source: BackendError,
    },
    #[cfg(not(feature = "pdf"))]
    #[error("PDF support not compiled in (enable the `pdf` feature of papersum-ingest)")]
    NoPdfSupport,
}

/// Extract the text of a PDF or Word document.
///
/// Dispatches on the file extension (case-insensitive):
/// - `.pdf` → MuPDF backend (requires `pdf` feature), one entry per page
/// - `.docx` / `.doc` → Word paragraph reader, a single entry
///
/// Typographic ligatures are expanded in the returned text.
pub fn extract_document(path: &Path) -> Result<Document, IngestError> {
    let format = DocumentFormat::from_path(path)
        .ok_or_else(|| IngestError::UnsupportedFormat(path.to_path_buf()))?;

    let pages = match format {
        DocumentFormat::Pdf => extract_pdf(path)?,
        DocumentFormat::Word => extract_with(&DocxBackend, path, format)?,
    };

    let pages = pages
        .iter()
        .map(|p| papersum_parsing::expand_ligatures(p))
        .collect();

    Ok(Document::new(path, format, pages))
}

fn extract_with(
    backend: &dyn DocumentBackend,
    path: &Path,
    format: DocumentFormat,
) -> Result<Vec<String>, IngestError> {
    backend
        .extract_pages(path)
        .map_err(|source| IngestError::Backend {
            format: format.label(),
            source,
        })
}

#[cfg(feature = "pdf")]
fn extract_pdf(path: &Path) -> Result<Vec<String>, IngestError> {
    extract_with(
        &papersum_pdf_mupdf::MupdfBackend::new(),
        path,
        DocumentFormat::Pdf,
    )
}

#[cfg(not(feature = "pdf"))]
fn extract_pdf(_path: &Path) -> Result<Vec<String>, IngestError> {
    Err(IngestError::NoPdfSupport)
}

/// Returns true if the path has a `.pdf`, `.docx` or `.doc` extension.
pub fn is_supported_path(path: &Path) -> bool {
    DocumentFormat::from_path(path).is_some()
}

/// List the supported documents directly inside `dir`, in directory-listing
/// order. Subdirectories are not descended into.
pub fn collect_inputs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() {
            continue;
        }
        if is_supported_path(&path) {
            inputs.push(path);
        } else {
            tracing::debug!(path = %path.display(), "skipping unsupported file");
        }
    }
    Ok(inputs)
}
