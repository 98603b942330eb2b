use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::cli::Cli;
use crate::domain::document::{OperationSelector, DEFAULT_MEDIA_TYPE_FILTER};
use crate::domain::schema::DEFAULT_MAX_DEPTH;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "ai-swagger.toml";

/// Path of the generate endpoint, shared by the backend route and the plugin client
pub const DEFAULT_ENDPOINT_PATH: &str = "/ai-swagger/generate";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub generator: GeneratorConfig,
    /// LLM used for AI generation; random generation only when absent
    #[serde(default)]
    pub llm: Option<LlmConfig>,
    #[serde(default)]
    pub plugin: PluginConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings::default(),
            generator: GeneratorConfig::default(),
            llm: None,
            plugin: PluginConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// How the backend produces example bodies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Always ask the LLM (random generation when it fails)
    Ai,
    /// Schema-driven random values only
    Random,
    /// LLM when configured, random otherwise
    #[default]
    Auto,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ai => write!(f, "ai"),
            Self::Random => write!(f, "random"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// When false the generate route is not mounted
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub mode: GenerationMode,
    /// Route the generate handler is mounted on
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            mode: GenerationMode::default(),
            endpoint_path: default_endpoint_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    /// Environment variable holding the API key
    #[serde(default)]
    pub api_key_env: Option<String>,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

// ============================================================================
// Plugin Configuration
// ============================================================================

/// Settings for the editor-side generate action
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PluginConfig {
    /// Origin of the backend, e.g. "http://127.0.0.1:3000"
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_endpoint_path")]
    pub endpoint_path: String,
    /// Reference resolution depth limit
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Substring a media type must contain to count as JSON
    #[serde(default = "default_media_type_filter")]
    pub media_type_filter: String,
    #[serde(default)]
    pub selector: OperationSelector,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint_path: default_endpoint_path(),
            max_depth: default_max_depth(),
            media_type_filter: default_media_type_filter(),
            selector: OperationSelector::default(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_endpoint_path() -> String {
    DEFAULT_ENDPOINT_PATH.to_string()
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_media_type_filter() -> String {
    DEFAULT_MEDIA_TYPE_FILTER.to_string()
}

// ============================================================================
// Loading
// ============================================================================

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_path(DEFAULT_CONFIG_FILE)
    }

    /// Create settings from CLI arguments (config file, env vars, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::from_path(&cli.config)?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from an optional TOML file plus `AI_SWAGGER__*` environment variables
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix("AI_SWAGGER").separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        Ok(settings)
    }

    /// Apply CLI overrides (CLI > env vars > config file)
    pub fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(mode) = cli.mode {
            self.generator.mode = mode;
        }
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.generator.endpoint_path.starts_with('/') {
            anyhow::bail!(
                "generator.endpoint_path must start with '/': {}",
                self.generator.endpoint_path
            );
        }
        if self.plugin.media_type_filter.is_empty() {
            anyhow::bail!("plugin.media_type_filter must not be empty");
        }
        if let Some(llm) = &self.llm {
            if llm.model.trim().is_empty() {
                anyhow::bail!("llm.model must not be empty");
            }
        }
        Ok(())
    }
}
