use std::io::Write;
use std::path::Path;

use owo_colors::OwoColorize;
use papersum_core::{Chunk, Document, Metadata};
use papersum_pipeline::{BatchEvent, BatchReport, Outcome};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print a per-document progress event.
pub fn print_event(w: &mut dyn Write, event: &BatchEvent, color: ColorMode) -> std::io::Result<()> {
    match event {
        BatchEvent::Processing {
            index,
            total,
            input,
        } => {
            writeln!(w, "[{}/{}] Processing: {}", index + 1, total, file_name(input))?;
        }
        BatchEvent::Saved { output, .. } => {
            if color.enabled() {
                writeln!(w, "  {} {}", "Summary saved to:".green(), output.display())?;
            } else {
                writeln!(w, "  Summary saved to: {}", output.display())?;
            }
        }
        BatchEvent::Failed { input, reason, .. } => {
            if color.enabled() {
                writeln!(
                    w,
                    "  {} {}: {}",
                    "Failed to generate summary for".red(),
                    file_name(input),
                    reason
                )?;
            } else {
                writeln!(
                    w,
                    "  Failed to generate summary for {}: {}",
                    file_name(input),
                    reason
                )?;
            }
        }
    }
    Ok(())
}

/// Notice printed when the input folder holds nothing to process.
pub fn print_no_inputs(w: &mut dyn Write, input_dir: &Path, color: ColorMode) -> std::io::Result<()> {
    let msg = format!(
        "No PDF or Word documents found in '{}'. Place your papers there and run again.",
        input_dir.display()
    );
    if color.enabled() {
        writeln!(w, "{}", msg.yellow())?;
    } else {
        writeln!(w, "{}", msg)?;
    }
    Ok(())
}

/// Print the closing summary of a batch run.
pub fn print_batch_summary(
    w: &mut dyn Write,
    report: &BatchReport,
    output_dir: &Path,
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    let succeeded = report.succeeded();
    let failed = report.failed();

    if color.enabled() {
        writeln!(
            w,
            "Processed {} documents: {} succeeded, {} failed",
            report.reports.len(),
            succeeded.to_string().green(),
            if failed > 0 {
                failed.to_string().red().to_string()
            } else {
                failed.to_string()
            }
        )?;
    } else {
        writeln!(
            w,
            "Processed {} documents: {} succeeded, {} failed",
            report.reports.len(),
            succeeded,
            failed
        )?;
    }

    for r in &report.reports {
        if let Outcome::Failure { reason } = &r.outcome {
            writeln!(w, "  - {}: {}", file_name(&r.input), reason)?;
        }
    }

    if succeeded > 0 {
        writeln!(
            w,
            "Summaries have been saved in the '{}' folder.",
            output_dir.display()
        )?;
    }
    Ok(())
}

/// Print the dry-run view of one document: inferred metadata and chunking.
pub fn print_inspection(
    w: &mut dyn Write,
    doc: &Document,
    metadata: &Metadata,
    chunks: &[Chunk],
    min_words: usize,
    color: ColorMode,
) -> std::io::Result<()> {
    let name = doc.display_name();
    if color.enabled() {
        writeln!(
            w,
            "{} {} ({}, {} page{})\n",
            "INSPECT:".bold().cyan(),
            name.bold(),
            doc.format.label(),
            doc.pages.len(),
            if doc.pages.len() == 1 { "" } else { "s" }
        )?;
    } else {
        writeln!(
            w,
            "INSPECT: {} ({}, {} page{})\n",
            name,
            doc.format.label(),
            doc.pages.len(),
            if doc.pages.len() == 1 { "" } else { "s" }
        )?;
    }

    writeln!(
        w,
        "  Title:   {}",
        metadata.title.as_deref().unwrap_or("(none)")
    )?;
    writeln!(
        w,
        "  Authors: {}",
        metadata.authors.as_deref().unwrap_or("(none)")
    )?;
    writeln!(w, "  Words:   {}", papersum_parsing::word_count(&doc.text()))?;
    writeln!(w)?;

    let kept = chunks.iter().filter(|c| c.word_count > min_words).count();
    writeln!(
        w,
        "  Chunks:  {} ({} kept, {} at or below {} words)",
        chunks.len(),
        kept,
        chunks.len() - kept,
        min_words
    )?;
    for (i, chunk) in chunks.iter().enumerate() {
        let line = format!("    [{}] {} words", i + 1, chunk.word_count);
        if chunk.word_count > min_words {
            writeln!(w, "{}", line)?;
        } else if color.enabled() {
            writeln!(w, "{}", format!("{} (dropped)", line).dimmed())?;
        } else {
            writeln!(w, "{} (dropped)", line)?;
        }
    }
    Ok(())
}

/// Print a progress event from inside the batch callback.
///
/// The callback cannot return an error, so a failed write to the terminal
/// is logged and the batch continues.
pub fn emit_event(w: &mut dyn Write, event: &BatchEvent, color: ColorMode) -> bool {
    match print_event(w, event, color).and_then(|_| w.flush()) {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(error = %e, "failed to print progress event");
            false
        }
    }
}
