use papersum_core::Metadata;

pub const HEADER: &str = "Research Paper Analysis";

/// Render the summary file contents.
///
/// ```text
/// Research Paper Analysis
///
/// Title: <title>
///
/// Author: <authors>
///
/// Summary:
/// <summary>
/// ```
///
/// The `Title:` and `Author:` blocks are omitted when absent.
pub fn render_summary(metadata: &Metadata, summary: &str) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str("\n\n");
    if let Some(title) = &metadata.title {
        out.push_str(&format!("Title: {title}\n\n"));
    }
    if let Some(authors) = &metadata.authors {
        out.push_str(&format!("Author: {authors}\n\n"));
    }
    out.push_str(&format!("Summary:\n{summary}\n"));
    out
}
