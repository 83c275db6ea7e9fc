use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub summarizer: Option<SummarizerConfig>,
    pub remote: Option<RemoteConfig>,
    pub local: Option<LocalConfig>,
    pub chunking: Option<ChunkingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub input_dir: Option<String>,
    pub output_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// `"local"` or `"remote"`.
    pub backend: Option<String>,
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub system_prompt: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("system_prompt", &self.system_prompt.as_ref().map(|p| p.len()))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub target_size: Option<usize>,
    pub min_words: Option<usize>,
}

/// Platform config directory path: `<config_dir>/papersum/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papersum").join("config.toml"))
}

/// Load config by cascading CWD `.papersum.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".papersum.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Take `field` from `overlay` if set there, otherwise from `base`.
fn pick<S, T>(overlay: &Option<S>, base: &Option<S>, field: impl Fn(&S) -> Option<T>) -> Option<T> {
    overlay
        .as_ref()
        .and_then(&field)
        .or_else(|| base.as_ref().and_then(&field))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        paths: Some(PathsConfig {
            input_dir: pick(&overlay.paths, &base.paths, |p| p.input_dir.clone()),
            output_dir: pick(&overlay.paths, &base.paths, |p| p.output_dir.clone()),
        }),
        summarizer: Some(SummarizerConfig {
            backend: pick(&overlay.summarizer, &base.summarizer, |s| s.backend.clone()),
        }),
        remote: Some(RemoteConfig {
            api_key: pick(&overlay.remote, &base.remote, |r| r.api_key.clone()),
            base_url: pick(&overlay.remote, &base.remote, |r| r.base_url.clone()),
            model: pick(&overlay.remote, &base.remote, |r| r.model.clone()),
            system_prompt: pick(&overlay.remote, &base.remote, |r| r.system_prompt.clone()),
            request_timeout_secs: pick(&overlay.remote, &base.remote, |r| r.request_timeout_secs),
        }),
        local: Some(LocalConfig {
            endpoint: pick(&overlay.local, &base.local, |l| l.endpoint.clone()),
            model: pick(&overlay.local, &base.local, |l| l.model.clone()),
            request_timeout_secs: pick(&overlay.local, &base.local, |l| l.request_timeout_secs),
        }),
        chunking: Some(ChunkingConfig {
            target_size: pick(&overlay.chunking, &base.chunking, |c| c.target_size),
            min_words: pick(&overlay.chunking, &base.chunking, |c| c.min_words),
        }),
    }
}
