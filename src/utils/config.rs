use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/app.yml";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout: u64,
    #[serde(default = "default_request_timeout")]
    pub client_request_timeout: u64,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocalesConfig {
    pub default: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    pub id: String,
    pub weights: PathBuf,
    pub tokenizer: PathBuf,
    /// Grouped-query attention factor, only used for GGML weights.
    #[serde(default = "default_gqa")]
    pub gqa: usize,
    #[serde(default)]
    pub use_gpu: bool,
    #[serde(default = "default_true")]
    pub preload: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GenerationConfig {
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: usize,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f32,
    #[serde(default = "default_repeat_last_n")]
    pub repeat_last_n: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_context_length")]
    pub context_length: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_new_tokens: default_max_new_tokens(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            repeat_penalty: default_repeat_penalty(),
            repeat_last_n: default_repeat_last_n(),
            seed: None,
            context_length: default_context_length(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackgroundConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub url: String,
    pub cache_path: PathBuf,
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub footer: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub locales: LocalesConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    pub background: BackgroundConfig,
    pub ui: UiConfig,
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Self> {
        let config_file = std::fs::File::open(config_path.as_ref())?;
        let config: Self = serde_yaml::from_reader(config_file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Path from `APP_CONFIG`, or the default location.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os("APP_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    fn validate(&self) -> anyhow::Result<()> {
        let generation = &self.generation;
        if generation.max_new_tokens == 0 {
            anyhow::bail!("generation.max_new_tokens must be greater than zero");
        }
        if generation.context_length <= generation.max_new_tokens {
            anyhow::bail!(
                "generation.context_length ({}) must exceed generation.max_new_tokens ({})",
                generation.context_length,
                generation.max_new_tokens
            );
        }
        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            anyhow::bail!("generation.top_p must be in (0, 1]");
        }
        if !generation.temperature.is_finite() || generation.temperature < 0.0 {
            anyhow::bail!("generation.temperature must be a non-negative number");
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_request_timeout() -> u64 {
    300
}

fn default_workers() -> usize {
    2
}

fn default_gqa() -> usize {
    1
}

fn default_max_new_tokens() -> usize {
    256
}

fn default_temperature() -> f64 {
    0.01
}

fn default_top_k() -> usize {
    40
}

fn default_top_p() -> f64 {
    0.95
}

fn default_repeat_penalty() -> f32 {
    1.1
}

fn default_repeat_last_n() -> usize {
    64
}

fn default_context_length() -> usize {
    4096
}

fn default_fetch_timeout() -> u64 {
    10
}
