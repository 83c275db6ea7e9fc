pub mod batch;
pub mod output;
pub mod processor;

pub use batch::{BatchEvent, BatchReport, Outcome, ProcessingReport, output_path_for, run_batch};
pub use output::render_summary;
pub use processor::{PaperProcessor, ProcessError};
