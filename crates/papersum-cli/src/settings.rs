//! Configuration resolution: CLI flag > environment > config file > default.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use papersum_core::config_file::ConfigFile;
use papersum_llm::{DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_SUMMARY_MODEL};
use papersum_parsing::Chunker;

pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Chunked summarization through a local inference endpoint
    Local,
    /// One chat-completion call to a hosted model
    Remote,
}

impl BackendKind {
    fn parse(s: &str) -> Option<Self> {
        let kind = <Self as ValueEnum>::from_str(s.trim(), true).ok();
        if kind.is_none() {
            tracing::warn!(value = s, "ignoring unknown summarizer backend");
        }
        kind
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub input_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub local_model: Option<String>,
}

#[derive(Clone)]
pub struct RemoteSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub timeout: Option<Duration>,
}

impl fmt::Debug for RemoteSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LocalSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub backend: BackendKind,
    pub remote: RemoteSettings,
    pub local: LocalSettings,
    pub chunker: Chunker,
}

/// Resolve settings from CLI values, environment lookups and the merged
/// config file.
pub fn resolve(cli: Overrides, file: &ConfigFile, env: impl Fn(&str) -> Option<String>) -> Settings {
    let paths = file.paths.clone().unwrap_or_default();
    let remote = file.remote.clone().unwrap_or_default();
    let local = file.local.clone().unwrap_or_default();
    let chunking = file.chunking.clone().unwrap_or_default();
    let summarizer = file.summarizer.clone().unwrap_or_default();

    let input_dir = cli
        .input_dir
        .or_else(|| paths.input_dir.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));
    let output_dir = cli
        .output_dir
        .or_else(|| paths.output_dir.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let api_key = cli
        .api_key
        .or_else(|| env("PAPERSUM_API_KEY"))
        .or_else(|| env("XAI_API_KEY"))
        .or(remote.api_key)
        .filter(|k| !k.trim().is_empty());

    let backend = cli
        .backend
        .or_else(|| env("PAPERSUM_BACKEND").and_then(|s| BackendKind::parse(&s)))
        .or_else(|| summarizer.backend.as_deref().and_then(BackendKind::parse))
        .unwrap_or(if api_key.is_some() {
            BackendKind::Remote
        } else {
            BackendKind::Local
        });

    let remote = RemoteSettings {
        api_key,
        base_url: cli
            .base_url
            .or_else(|| env("PAPERSUM_BASE_URL"))
            .or(remote.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        model: cli
            .model
            .or_else(|| env("PAPERSUM_MODEL"))
            .or(remote.model)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        system_prompt: remote.system_prompt,
        timeout: remote.request_timeout_secs.map(Duration::from_secs),
    };

    let local = LocalSettings {
        endpoint: cli
            .endpoint
            .or_else(|| env("PAPERSUM_LOCAL_ENDPOINT"))
            .or(local.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
        model: cli
            .local_model
            .or(local.model)
            .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
        timeout: local.request_timeout_secs.map(Duration::from_secs),
    };

    let defaults = Chunker::default();
    let chunker = Chunker::new(
        chunking.target_size.unwrap_or(defaults.target_size),
        chunking.min_words.unwrap_or(defaults.min_words),
    );

    Settings {
        input_dir,
        output_dir,
        backend,
        remote,
        local,
        chunker,
    }
}
