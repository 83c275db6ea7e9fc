use std::path::Path;

use mupdf::{Document, TextPageFlags};

use papersum_core::{BackendError, DocumentBackend};

/// MuPDF-based implementation of [`DocumentBackend`].
///
/// This crate isolates the AGPL mupdf dependency so that the Word path and
/// the summarizers do not transitively depend on it.
///
/// Every page is returned in full. The first page is where titles and
/// authors live, so nothing is cropped from the top or bottom.
#[derive(Debug, Default, Clone, Copy)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let mut pages = Vec::new();

        for page_result in document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?
        {
            let page = page_result.map_err(|e| BackendError::ExtractionError(e.to_string()))?;
            let text_page = page
                .to_text_page(TextPageFlags::empty())
                .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

            // Block/line iteration keeps one text line per output line.
            let mut page_text = String::new();
            for block in text_page.blocks() {
                for line in block.lines() {
                    page_text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
                    page_text.push('\n');
                }
            }
            pages.push(page_text);
        }

        tracing::debug!(path = %path.display(), pages = pages.len(), "pdf text extracted");
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_open_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = MupdfBackend::new()
            .extract_pages(&dir.path().join("absent.pdf"))
            .unwrap_err();
        assert!(matches!(err, BackendError::OpenError(_)), "{err:?}");
    }

    #[test]
    fn backend_is_object_safe() {
        let backend: Box<dyn DocumentBackend> = Box::new(MupdfBackend);
        let dir = tempfile::tempdir().unwrap();
        assert!(backend.extract_pages(&dir.path().join("nope.pdf")).is_err());
    }
}
