//! Word (`.docx`) paragraph reader.
//!
//! A `.docx` file is a ZIP archive; the body text lives in
//! `word/document.xml` as `<w:p>` paragraphs made of `<w:t>` runs.

use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use papersum_core::{BackendError, DocumentBackend};

const DOCUMENT_PART: &str = "word/document.xml";

/// Reads every paragraph of a Word document, joined by newlines.
///
/// Word documents have no reliable page boundaries, so the whole body is
/// returned as a single page.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxBackend;

impl DocumentBackend for DocxBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, BackendError> {
        let file = std::fs::File::open(path)?;
        let paragraphs = read_paragraphs(file)?;
        tracing::debug!(
            path = %path.display(),
            paragraphs = paragraphs.len(),
            "word text extracted"
        );
        Ok(vec![paragraphs.join("\n")])
    }
}

/// Read the paragraphs of a `.docx` archive.
pub fn read_paragraphs<R: Read + Seek>(reader: R) -> Result<Vec<String>, BackendError> {
    let mut archive = ZipArchive::new(reader)
        .map_err(|e| BackendError::OpenError(format!("not a Word document: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| BackendError::OpenError(format!("missing {DOCUMENT_PART}: {e}")))?
        .read_to_string(&mut xml)?;

    parse_document_xml(&xml)
}

/// Extract paragraph texts from `word/document.xml` content.
///
/// Empty paragraphs are kept as empty strings. Tabs and explicit line breaks
/// inside a paragraph become `\t` and `\n`.
pub fn parse_document_xml(xml: &str) -> Result<Vec<String>, BackendError> {
    let mut reader = Reader::from_str(xml);

    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;
    let mut in_text = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    current.clear();
                }
                b"t" if in_paragraph => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" if in_paragraph => current.push('\t'),
                b"br" | b"cr" if in_paragraph => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_text => {
                let text = e
                    .unescape()
                    .map_err(|e| BackendError::ExtractionError(e.to_string()))?;
                current.push_str(&text);
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = false;
                    in_text = false;
                    paragraphs.push(std::mem::take(&mut current));
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(BackendError::ExtractionError(format!(
                    "malformed {DOCUMENT_PART} at position {}: {e}",
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
