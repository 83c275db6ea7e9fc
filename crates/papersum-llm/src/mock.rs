//! Hand-rolled fakes for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use papersum_core::{SummarizationBackend, SummarizeError, SummaryFuture};

use crate::error::LlmError;
use crate::local::{BatchFuture, LengthBounds, SummaryModel};

/// One scripted reply of [`MockSummaryModel`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Return exactly these summaries, whatever the inputs were.
    Summaries(Vec<String>),
    /// Return one summary of `n` words per input.
    EchoWords(usize),
    /// Fail the call with this message.
    Fail(String),
}

/// A recorded [`SummaryModel::summarize_batch`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall {
    pub inputs: Vec<String>,
    pub bounds: LengthBounds,
}

/// A [`SummaryModel`] that records every call and answers from a script.
///
/// Replies are consumed in order; the last one repeats once the script runs
/// out.
pub struct MockSummaryModel {
    replies: Mutex<Vec<MockReply>>,
    fallback: MockReply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockSummaryModel {
    pub fn scripted(mut replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "script must have at least one reply");
        // Reverse so pop() yields them in order.
        replies.reverse();
        let fallback = replies[0].clone();
        Self {
            replies: Mutex::new(replies),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer every input with an `n`-word summary.
    pub fn echo_words(n: usize) -> Self {
        Self::scripted(vec![MockReply::EchoWords(n)])
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn next_reply(&self) -> MockReply {
        self.replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

impl SummaryModel for MockSummaryModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    fn summarize_batch<'a>(
        &'a self,
        inputs: &'a [String],
        bounds: LengthBounds,
    ) -> BatchFuture<'a> {
        self.calls.lock().unwrap().push(RecordedCall {
            inputs: inputs.to_vec(),
            bounds,
        });
        let reply = self.next_reply();

        Box::pin(async move {
            match reply {
                MockReply::Summaries(s) => Ok(s),
                MockReply::EchoWords(n) => Ok(inputs
                    .iter()
                    .map(|_| vec!["summary"; n].join(" "))
                    .collect()),
                MockReply::Fail(msg) => Err(LlmError::Other(msg)),
            }
        })
    }
}

/// A [`SummarizationBackend`] returning scripted results.
pub struct MockBackend {
    responses: Mutex<Vec<Result<String, SummarizeError>>>,
    fallback: Result<String, SummarizeError>,
    seen: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl MockBackend {
    /// Always return `response`.
    pub fn new(response: Result<String, SummarizeError>) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            seen: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Always succeed with `summary`.
    pub fn ok(summary: &str) -> Self {
        Self::new(Ok(summary.to_string()))
    }

    /// Always fail with a backend error.
    pub fn failing(message: &str) -> Self {
        Self::new(Err(SummarizeError::Backend {
            backend: "mock".into(),
            message: message.into(),
        }))
    }

    /// Return responses in order, repeating the last.
    pub fn with_sequence(mut responses: Vec<Result<String, SummarizeError>>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        responses.reverse();
        let fallback = responses[0].clone();
        Self {
            responses: Mutex::new(responses),
            fallback,
            seen: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Texts passed to `summarize()`, in call order.
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl SummarizationBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| self.fallback.clone());

        Box::pin(async move { response })
    }
}
