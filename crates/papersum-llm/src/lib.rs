//! Summarization backends.
//!
//! - [`RemoteModelClient`]: one chat-completion call over the full text.
//! - [`LocalBatchSummarizer`]: chunk, summarize every chunk in one batch, and
//!   condense the joined result when it is still too long. The model behind
//!   it is any [`SummaryModel`], e.g. an [`InferenceEndpoint`].

pub mod error;
pub mod inference;
pub mod local;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod remote;

pub use error::LlmError;
pub use inference::{DEFAULT_ENDPOINT, DEFAULT_SUMMARY_MODEL, InferenceEndpoint};
pub use local::{
    BatchFuture, CHUNK_BOUNDS, CONDENSE_BOUNDS, CONDENSE_THRESHOLD_WORDS, LengthBounds,
    LocalBatchSummarizer, SummaryModel,
};
pub use remote::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_SYSTEM_PROMPT, RemoteModelClient};

pub(crate) fn default_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(2)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
