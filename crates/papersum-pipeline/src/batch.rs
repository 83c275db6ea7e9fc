use std::path::{Path, PathBuf};

use crate::processor::PaperProcessor;

/// Progress events emitted by [`run_batch`].
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Processing {
        index: usize,
        total: usize,
        input: PathBuf,
    },
    Saved {
        index: usize,
        total: usize,
        input: PathBuf,
        output: PathBuf,
    },
    Failed {
        index: usize,
        total: usize,
        input: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { output_path: PathBuf },
    Failure { reason: String },
}

/// What happened to one input of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingReport {
    pub input: PathBuf,
    pub outcome: Outcome,
}

impl ProcessingReport {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub reports: Vec<ProcessingReport>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.reports.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.reports.len() - self.succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// `<output_dir>/<input stem>_summary.txt`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{stem}_summary.txt"))
}

/// Process `inputs` one at a time, writing each summary into `output_dir`.
///
/// A failure is recorded in that document's report and the batch moves on;
/// nothing here aborts early. `output_dir` is created if missing.
pub async fn run_batch(
    processor: &PaperProcessor,
    inputs: &[PathBuf],
    output_dir: &Path,
    progress: impl Fn(BatchEvent),
) -> BatchReport {
    if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
        tracing::warn!(path = %output_dir.display(), error = %e, "could not create output directory");
    }

    let total = inputs.len();
    let mut report = BatchReport::default();

    for (index, input) in inputs.iter().enumerate() {
        progress(BatchEvent::Processing {
            index,
            total,
            input: input.clone(),
        });

        let output = output_path_for(input, output_dir);
        let outcome = match processor.process(input, &output).await {
            Ok(_) => {
                progress(BatchEvent::Saved {
                    index,
                    total,
                    input: input.clone(),
                    output: output.clone(),
                });
                Outcome::Success {
                    output_path: output,
                }
            }
            Err(e) => {
                let reason = e.to_string();
                tracing::warn!(input = %input.display(), error = %reason, "document failed");
                progress(BatchEvent::Failed {
                    index,
                    total,
                    input: input.clone(),
                    reason: reason.clone(),
                });
                Outcome::Failure { reason }
            }
        };

        report.reports.push(ProcessingReport {
            input: input.clone(),
            outcome,
        });
    }

    report
}
