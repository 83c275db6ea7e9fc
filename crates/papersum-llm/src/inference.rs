use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::local::{BatchFuture, LengthBounds, SummaryModel};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SUMMARY_MODEL: &str = "facebook/bart-large-cnn";

/// A summarization model served over HTTP in the Hugging Face inference
/// format.
///
/// `POST {endpoint}/models/{model}` with
/// `{"inputs": [..], "parameters": {"min_length", "max_length", "do_sample", "truncation"}}`,
/// answered by `[{"summary_text": ".."}, ..]`.
#[derive(Clone)]
pub struct InferenceEndpoint {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for InferenceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceEndpoint")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl InferenceEndpoint {
    pub fn new(mut endpoint: String, model: String) -> Self {
        while endpoint.ends_with('/') {
            endpoint.pop();
        }
        Self {
            client: crate::default_client(),
            endpoint,
            model,
            api_key: None,
            timeout: None,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_api_key(mut self, api_key: String) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn url(&self) -> String {
        format!("{}/models/{}", self.endpoint, self.model)
    }

    async fn send(&self, inputs: &[String], bounds: LengthBounds) -> Result<Vec<String>, LlmError> {
        let body = InferenceRequest {
            inputs,
            parameters: Parameters {
                min_length: bounds.min,
                max_length: bounds.max,
                do_sample: false,
                truncation: true,
            },
        };

        let mut request = self.client.post(self.url()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(
            model = %self.model,
            inputs = inputs.len(),
            min_length = bounds.min,
            max_length = bounds.max,
            "sending summarization batch"
        );
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            tracing::warn!(status = %status, body = %text, "summarization request failed");
            return Err(LlmError::Status {
                status: status.as_u16(),
            });
        }

        let outputs: Vec<SummaryOutput> = serde_json::from_str(&text)?;
        if outputs.len() != inputs.len() {
            return Err(LlmError::CountMismatch {
                expected: inputs.len(),
                got: outputs.len(),
            });
        }

        Ok(outputs.into_iter().map(|o| o.summary_text).collect())
    }
}

impl SummaryModel for InferenceEndpoint {
    fn name(&self) -> &str {
        &self.model
    }

    fn summarize_batch<'a>(
        &'a self,
        inputs: &'a [String],
        bounds: LengthBounds,
    ) -> BatchFuture<'a> {
        Box::pin(self.send(inputs, bounds))
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a [String],
    parameters: Parameters,
}

#[derive(Serialize)]
struct Parameters {
    min_length: usize,
    max_length: usize,
    do_sample: bool,
    truncation: bool,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_endpoint_and_model() {
        let ep = InferenceEndpoint::new("http://localhost:9000/".into(), DEFAULT_SUMMARY_MODEL.into());
        assert_eq!(ep.url(), "http://localhost:9000/models/facebook/bart-large-cnn");
    }

    #[test]
    fn request_serialization() {
        let inputs = vec!["first chunk".to_string(), "second chunk".to_string()];
        let body = InferenceRequest {
            inputs: &inputs,
            parameters: Parameters {
                min_length: 50,
                max_length: 150,
                do_sample: false,
                truncation: true,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": ["first chunk", "second chunk"],
                "parameters": {
                    "min_length": 50,
                    "max_length": 150,
                    "do_sample": false,
                    "truncation": true
                }
            })
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let ep = InferenceEndpoint::new(DEFAULT_ENDPOINT.into(), DEFAULT_SUMMARY_MODEL.into())
            .with_api_key("hf_secret".into());
        let shown = format!("{ep:?}");
        assert!(!shown.contains("hf_secret"));
    }
}
