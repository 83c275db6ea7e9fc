//! Title and author inference from a document's first page.
//!
//! Inference never fails: a page with nothing recognizable yields an empty
//! [`Metadata`].

use papersum_core::{Document, Metadata};

use crate::authors::scan_authors;
use crate::text_processing::text_lines;
use crate::title::scan_title;

/// Infer title and authors from trimmed, non-empty first-page lines.
pub fn infer_metadata(lines: &[&str]) -> Metadata {
    let scan = scan_title(lines);
    let authors = scan_authors(lines, scan.end_idx);

    tracing::debug!(
        title = scan.title.is_some(),
        authors = authors.is_some(),
        end_idx = scan.end_idx,
        "metadata inferred"
    );

    Metadata {
        title: scan.title,
        authors,
    }
}

/// Split raw page text into lines and infer metadata from them.
pub fn infer_from_page(page_text: &str) -> Metadata {
    infer_metadata(&text_lines(page_text))
}

/// Infer metadata from the first page of an extracted document.
pub fn infer_from_document(doc: &Document) -> Metadata {
    match doc.first_page() {
        Some(page) if !page.trim().is_empty() => infer_from_page(page),
        _ => {
            tracing::warn!(
                path = %doc.path.display(),
                "first page has no text, skipping metadata"
            );
            Metadata::default()
        }
    }
}
