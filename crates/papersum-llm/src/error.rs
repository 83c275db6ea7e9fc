use papersum_core::SummarizeError;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rate limited")]
    RateLimited,

    #[error("API request failed (status {status})")]
    Status { status: u16 },

    #[error("empty response from {provider}")]
    EmptyResponse { provider: &'static str },

    #[error("expected {expected} summaries, got {got}")]
    CountMismatch { expected: usize, got: usize },

    #[error("{0}")]
    Other(String),
}

impl LlmError {
    /// Convert into the backend-neutral error reported by the pipeline.
    pub fn into_summarize_error(self, backend: &str) -> SummarizeError {
        match self {
            LlmError::EmptyResponse { .. } => SummarizeError::Empty {
                backend: backend.to_string(),
            },
            other => SummarizeError::Backend {
                backend: backend.to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_response_maps_to_empty() {
        let err = LlmError::EmptyResponse { provider: "remote" }.into_summarize_error("remote");
        assert_eq!(
            err,
            SummarizeError::Empty {
                backend: "remote".into()
            }
        );
    }

    #[test]
    fn other_errors_keep_their_message() {
        let err = LlmError::Status { status: 503 }.into_summarize_error("local");
        assert_eq!(
            err,
            SummarizeError::Backend {
                backend: "local".into(),
                message: "API request failed (status 503)".into(),
            }
        );
    }
}
