use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub site: SiteConfig,
    pub content: ContentConfig,
    pub server: ServerConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
}

/// Site identity shown in the page shell.
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Owner name shown in the header and footer copyright line.
    pub owner: String,
    /// Attribution line appended to the footer (e.g. a job title).
    pub role: String,
    #[serde(default)]
    pub tagline: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// Directory holding one markdown file per project.
    pub dir: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
}

fn default_include_globs() -> Vec<String> {
    vec!["*.md".to_string(), "*.mdx".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub model: Option<String>,
    /// Override the provider base URL (self-hosted gateways, tests).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Timeout for a single provider call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for one whole proxy request (all fan-out calls joined).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "disabled".to_string(),
            model: None,
            base_url: None,
            timeout_secs: 30,
            request_timeout_secs: 60,
        }
    }
}

fn default_provider() -> String {
    "disabled".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_request_timeout_secs() -> u64 {
    60
}

impl EmbeddingConfig {
    pub fn is_enabled(&self) -> bool {
        self.provider != "disabled"
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.site.owner.trim().is_empty() {
        anyhow::bail!("site.owner must not be empty");
    }

    if config.content.include_globs.is_empty() {
        anyhow::bail!("content.include_globs must not be empty");
    }

    if config.embedding.timeout_secs == 0 {
        anyhow::bail!("embedding.timeout_secs must be > 0");
    }

    if config.embedding.request_timeout_secs == 0 {
        anyhow::bail!("embedding.request_timeout_secs must be > 0");
    }

    if config.embedding.is_enabled() && config.embedding.model.is_none() {
        anyhow::bail!(
            "embedding.model must be specified when provider is '{}'",
            config.embedding.provider
        );
    }

    match config.embedding.provider.as_str() {
        "disabled" | "openai" => {}
        other => anyhow::bail!(
            "Unknown embedding provider: '{}'. Must be disabled or openai.",
            other
        ),
    }

    Ok(config)
}
