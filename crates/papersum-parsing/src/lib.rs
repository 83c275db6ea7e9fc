pub mod authors;
pub mod chunker;
pub mod metadata;
pub mod text_processing;
pub mod title;

pub use chunker::{Chunker, DEFAULT_MIN_WORDS, DEFAULT_TARGET_SIZE, chunk_text};
pub use metadata::{infer_from_document, infer_from_page, infer_metadata};
pub use text_processing::{expand_ligatures, text_lines, word_count};
// Re-export domain types from core (canonical definitions live there)
pub use papersum_core::{Chunk, Document, Metadata};
