use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use papersum_core::{SummarizationBackend, SummaryFuture};

use crate::error::LlmError;

pub const DEFAULT_BASE_URL: &str = "https://api.x.ai/v1";
pub const DEFAULT_MODEL: &str = "grok-beta";

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a research paper analyzer. Analyze this paper and provide:
1. A comprehensive summary of the main research objectives and methodology
2. Key findings and important results
3. Significant conclusions and implications

Format the response in clear sections and maintain academic tone.";

/// Client for an OpenAI-compatible chat-completions API.
///
/// Sends the whole document as one user message after a fixed system prompt
/// and returns the first choice verbatim.
#[derive(Clone)]
pub struct RemoteModelClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    system_prompt: String,
    timeout: Option<Duration>,
}

impl fmt::Debug for RemoteModelClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteModelClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt_len", &self.system_prompt.len())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RemoteModelClient {
    pub fn new(api_key: String, mut base_url: String, model: String) -> Self {
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: crate::default_client(),
            api_key,
            base_url,
            model,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout: None,
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_system_prompt(mut self, prompt: String) -> Self {
        self.system_prompt = prompt;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one chat completion over `text`.
    pub async fn complete(&self, text: &str) -> Result<String, LlmError> {
        let messages = [
            ApiMessage {
                role: "system",
                content: &self.system_prompt,
            },
            ApiMessage {
                role: "user",
                content: text,
            },
        ];
        let body = ChatRequest {
            model: &self.model,
            messages: &messages,
        };

        let mut request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(model = %self.model, chars = text.len(), "sending chat completion");
        let response = request.send().await?;

        let status = response.status();
        let text = response.text().await?;

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimited);
        }

        if !status.is_success() {
            tracing::warn!(status = %status, body = %text, "chat completion failed");
            return Err(LlmError::Status {
                status: status.as_u16(),
            });
        }

        let resp: ChatResponse = serde_json::from_str(&text)?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyResponse { provider: "remote" })
    }
}

impl SummarizationBackend for RemoteModelClient {
    fn name(&self) -> &str {
        "remote"
    }

    fn summarize<'a>(&'a self, text: &'a str) -> SummaryFuture<'a> {
        Box::pin(async move {
            self.complete(text)
                .await
                .map_err(|e| e.into_summarize_error(self.name()))
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ApiMessage<'a>],
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}
