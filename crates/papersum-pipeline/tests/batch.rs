use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use papersum_core::SummarizeError;
use papersum_llm::mock::{MockBackend, MockSummaryModel};
use papersum_llm::LocalBatchSummarizer;
use papersum_pipeline::{
    BatchEvent, Outcome, PaperProcessor, ProcessError, output_path_for, run_batch,
};
use zip::write::SimpleFileOptions;

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{body}</w:body></w:document>"
    );
    let mut zip = zip::ZipWriter::new(std::fs::File::create(path).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn climate_paper(path: &Path) {
    write_docx(
        path,
        &[
            "International Journal of X",
            "Deep Learning for Climate Modeling.",
            "John Smith Jane Doe",
            "University of Example",
            "We apply deep networks to regional climate projection.",
        ],
    );
}

#[tokio::test]
async fn process_writes_rendered_template() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("climate.docx");
    let output = dir.path().join("climate_summary.txt");
    climate_paper(&input);

    let backend = Arc::new(MockBackend::ok("A neural approach to climate."));
    let processor = PaperProcessor::new(backend.clone());

    let rendered = processor.process(&input, &output).await.unwrap();
    let expected = "Research Paper Analysis\n\n\
        Title: Deep Learning for Climate Modeling.\n\n\
        Author: John Smith Jane Doe\n\n\
        Summary:\nA neural approach to climate.\n";
    assert_eq!(rendered, expected);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), expected);

    // The backend sees the full document text.
    let seen = backend.seen_texts();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("regional climate projection"));
}

#[tokio::test]
async fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("paper.docx");
    let output = dir.path().join("paper_summary.txt");
    climate_paper(&input);
    std::fs::write(&output, "stale contents").unwrap();

    let processor = PaperProcessor::new(Arc::new(MockBackend::ok("fresh")));
    processor.process(&input, &output).await.unwrap();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.ends_with("Summary:\nfresh\n"));
    assert!(!written.contains("stale"));
}

#[tokio::test]
async fn summarization_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("paper.docx");
    let output = dir.path().join("paper_summary.txt");
    climate_paper(&input);

    let processor = PaperProcessor::new(Arc::new(MockBackend::failing("model offline")));
    let err = processor.process(&input, &output).await.unwrap_err();

    assert!(matches!(err, ProcessError::Summarization(_)), "{err:?}");
    assert!(!output.exists());
}

#[tokio::test]
async fn blank_summary_counts_as_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("paper.docx");
    let output = dir.path().join("paper_summary.txt");
    climate_paper(&input);

    let processor = PaperProcessor::new(Arc::new(MockBackend::ok("   ")));
    let err = processor.process(&input, &output).await.unwrap_err();

    assert!(
        matches!(err, ProcessError::Summarization(SummarizeError::Empty { .. })),
        "{err:?}"
    );
    assert!(!output.exists());
}

#[tokio::test]
async fn unsupported_format_is_reported_without_backend_call() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    std::fs::write(&input, "hello").unwrap();

    let backend = Arc::new(MockBackend::ok("unused"));
    let processor = PaperProcessor::new(backend.clone());
    let err = processor
        .process(&input, &dir.path().join("notes_summary.txt"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProcessError::UnsupportedFormat(_)), "{err:?}");
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn unwritable_output_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("paper.docx");
    climate_paper(&input);

    let processor = PaperProcessor::new(Arc::new(MockBackend::ok("summary")));
    let output = dir.path().join("no-such-dir").join("paper_summary.txt");
    let err = processor.process(&input, &output).await.unwrap_err();
    assert!(matches!(err, ProcessError::Write { .. }), "{err:?}");
}

#[tokio::test]
async fn extraction_failure_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("output");

    let broken = dir.path().join("broken.docx");
    std::fs::write(&broken, b"this is not a zip archive").unwrap();
    let good = dir.path().join("good.docx");
    climate_paper(&good);

    let backend = Arc::new(MockBackend::ok("Summary text."));
    let processor = PaperProcessor::new(backend.clone());

    let events = Mutex::new(Vec::new());
    let inputs: Vec<PathBuf> = vec![broken.clone(), good.clone()];
    let report = run_batch(&processor, &inputs, &out_dir, |e| {
        events.lock().unwrap().push(e);
    })
    .await;

    assert_eq!(report.reports.len(), 2);
    assert_eq!(report.succeeded(), 1);
    assert!(report.has_failures());

    assert!(matches!(report.reports[0].outcome, Outcome::Failure { .. }));
    assert!(!output_path_for(&broken, &out_dir).exists());

    let good_out = output_path_for(&good, &out_dir);
    assert_eq!(
        report.reports[1].outcome,
        Outcome::Success {
            output_path: good_out.clone()
        }
    );
    assert!(
        std::fs::read_to_string(&good_out)
            .unwrap()
            .contains("Summary:\nSummary text.")
    );

    // Only the readable document reached the backend.
    assert_eq!(backend.call_count(), 1);

    let events = events.into_inner().unwrap();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], BatchEvent::Processing { index: 0, total: 2, .. }));
    assert!(matches!(events[1], BatchEvent::Failed { index: 0, .. }));
    assert!(matches!(events[2], BatchEvent::Processing { index: 1, .. }));
    assert!(matches!(events[3], BatchEvent::Saved { index: 1, .. }));
}

#[tokio::test]
async fn summarization_failure_mid_batch_continues() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = dir.path().join("out");
    let a = dir.path().join("a.docx");
    let b = dir.path().join("b.docx");
    climate_paper(&a);
    climate_paper(&b);

    let backend = Arc::new(MockBackend::with_sequence(vec![
        Err(SummarizeError::Empty {
            backend: "mock".into(),
        }),
        Ok("second works".into()),
    ]));
    let processor = PaperProcessor::new(backend);

    let report = run_batch(&processor, &[a.clone(), b.clone()], &out_dir, |_| {}).await;
    assert!(!report.reports[0].is_success());
    assert!(report.reports[1].is_success());
    assert!(!output_path_for(&a, &out_dir).exists());
    assert!(output_path_for(&b, &out_dir).exists());
}

#[tokio::test]
async fn local_summarizer_too_short_document_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("short.docx");
    climate_paper(&input);

    // The paper has far fewer than 100 words, so no chunk survives.
    let model = MockSummaryModel::echo_words(10);
    let processor = PaperProcessor::new(Arc::new(LocalBatchSummarizer::new(model)));
    let err = processor
        .process(&input, &dir.path().join("short_summary.txt"))
        .await
        .unwrap_err();

    assert!(
        matches!(
            err,
            ProcessError::Summarization(SummarizeError::NoValidChunks { min_words: 100 })
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn local_summarizer_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("long.docx");
    let body = vec!["experiment"; 300].join(" ");
    write_docx(
        &input,
        &["Sparse Attention for Long Documents.", "Ada Lovelace", body.as_str()],
    );

    let model = MockSummaryModel::echo_words(12);
    let processor = PaperProcessor::new(Arc::new(LocalBatchSummarizer::new(model)));
    let output = dir.path().join("long_summary.txt");
    let rendered = processor.process(&input, &output).await.unwrap();

    assert!(rendered.starts_with(
        "Research Paper Analysis\n\nTitle: Sparse Attention for Long Documents.\n\nAuthor: Ada Lovelace\n\n"
    ));
    assert!(rendered.contains("Summary:\nsummary summary"));
}
