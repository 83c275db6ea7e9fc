use std::future::Future;
use std::pin::Pin;

use papersum_core::{SummarizationBackend, SummarizeError, SummaryFuture, SummaryResult};
use papersum_parsing::{Chunker, word_count};

use crate::error::LlmError;

/// Output length bounds passed to the model, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

/// Bounds for the per-chunk pass.
pub const CHUNK_BOUNDS: LengthBounds = LengthBounds { min: 50, max: 150 };

/// Bounds for the condensation pass.
pub const CONDENSE_BOUNDS: LengthBounds = LengthBounds { min: 200, max: 300 };

/// Joined chunk summaries longer than this (in words) get condensed.
pub const CONDENSE_THRESHOLD_WORDS: usize = 500;

pub type BatchFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<String>, LlmError>> + Send + 'a>>;

/// An abstractive summarization model that accepts a batch of inputs.
///
/// Decoding is expected to be deterministic. Implementations return exactly
/// one summary per input, in input order.
pub trait SummaryModel: Send + Sync {
    fn name(&self) -> &str;

    fn summarize_batch<'a>(&'a self, inputs: &'a [String], bounds: LengthBounds)
    -> BatchFuture<'a>;
}

/// Chunked long-document summarizer over a [`SummaryModel`].
#[derive(Debug)]
pub struct LocalBatchSummarizer<M> {
    model: M,
    chunker: Chunker,
    condense_threshold: usize,
}

impl<M: SummaryModel> LocalBatchSummarizer<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            chunker: Chunker::default(),
            condense_threshold: CONDENSE_THRESHOLD_WORDS,
        }
    }

    pub fn with_chunker(mut self, chunker: Chunker) -> Self {
        self.chunker = chunker;
        self
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn chunker(&self) -> Chunker {
        self.chunker
    }

    /// Summarize `text`, keeping every intermediate result.
    ///
    /// Steps:
    /// 1. Chunk the text and drop short chunks
    /// 2. Summarize all chunks in one batch with [`CHUNK_BOUNDS`]
    /// 3. Join the chunk summaries with single spaces
    /// 4. If that exceeds [`CONDENSE_THRESHOLD_WORDS`], summarize it once more
    ///    with [`CONDENSE_BOUNDS`]
    pub async fn summarize_detailed(&self, text: &str) -> Result<SummaryResult, SummarizeError> {
        let backend = self.model.name();

        let inputs: Vec<String> = self
            .chunker
            .chunk(text)
            .into_iter()
            .map(|c| c.text)
            .collect();

        if inputs.is_empty() {
            return Err(SummarizeError::NoValidChunks {
                min_words: self.chunker.min_words,
            });
        }

        tracing::debug!(model = backend, chunks = inputs.len(), "summarizing chunks");
        let chunk_summaries = self.run_batch(&inputs, CHUNK_BOUNDS).await?;

        let intermediate = chunk_summaries.join(" ");
        if intermediate.trim().is_empty() {
            return Err(SummarizeError::Empty {
                backend: backend.to_string(),
            });
        }

        let words = word_count(&intermediate);
        let condensed = if words > self.condense_threshold {
            tracing::debug!(model = backend, words, "condensing joined summary");
            let mut out = self
                .run_batch(std::slice::from_ref(&intermediate), CONDENSE_BOUNDS)
                .await?;
            let text = out.pop().unwrap_or_default();
            if text.trim().is_empty() {
                return Err(SummarizeError::Empty {
                    backend: backend.to_string(),
                });
            }
            Some(text)
        } else {
            None
        };

        Ok(SummaryResult {
            chunk_summaries,
            intermediate,
            condensed,
        })
    }

    async fn run_batch(
        &self,
        inputs: &[String],
        bounds: LengthBounds,
    ) -> Result<Vec<String>, SummarizeError> {
        let backend = self.model.name();
        let outputs = self
            .model
            .summarize_batch(inputs, bounds)
            .await
            .map_err(|e| e.into_summarize_error(backend))?;

        if outputs.len() != inputs.len() {
            return Err(LlmError::CountMismatch {
                expected: inputs.len(),
                got: outputs.len(),
            }
            .into_summarize_error(backend));
        }
        Ok(outputs)
    }
}

impl<M: SummaryModel> SummarizationBackend for LocalBatchSummarizer<M> {
    fn name(&self) -> &str {
        "local"
    }

    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        Box::pin(async move {
            self.summarize_detailed(text)
                .await
                .map(SummaryResult::into_final)
        })
    }
}
