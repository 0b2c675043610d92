use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub roster: RosterSettings,
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub generation: GenerationSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct RosterSettings {
    #[serde(default = "default_roster_path")]
    pub path: String,
}

impl Default for RosterSettings {
    fn default() -> Self {
        Self { path: default_roster_path() }
    }
}

fn default_roster_path() -> String { "./data/influencers_top1000.csv".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingSettings {
    /// `hash` (offline, deterministic) or `http` (OpenAI-compatible endpoint)
    #[serde(default = "default_embedding_provider")]
    pub provider: String,
    #[serde(default = "default_embedding_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_embedding_model")]
    pub model: String,
    #[serde(default = "default_embedding_dimension")]
    pub dimension: usize,
    #[serde(default = "default_embedding_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_embedding_batch_size")]
    pub batch_size: usize,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: default_embedding_provider(),
            endpoint: default_embedding_endpoint(),
            api_key: None,
            model: default_embedding_model(),
            dimension: default_embedding_dimension(),
            timeout_secs: default_embedding_timeout(),
            batch_size: default_embedding_batch_size(),
        }
    }
}

fn default_embedding_provider() -> String { "hash".to_string() }
fn default_embedding_endpoint() -> String { "http://127.0.0.1:8080/v1/embeddings".to_string() }
fn default_embedding_model() -> String { "sentence-transformers/all-MiniLM-L6-v2".to_string() }
fn default_embedding_dimension() -> usize { 384 }
fn default_embedding_timeout() -> u64 { 30 }
fn default_embedding_batch_size() -> usize { 64 }

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub api_key: Option<String>,
    #[serde(default = "default_generation_model")]
    pub model: String,
    #[serde(default = "default_generation_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_generation_timeout")]
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key: None,
            model: default_generation_model(),
            endpoint: default_generation_endpoint(),
            timeout_secs: default_generation_timeout(),
        }
    }
}

fn default_true() -> bool { true }
fn default_generation_model() -> String { "gemini-2.0-flash".to_string() }
fn default_generation_endpoint() -> String { "https://generativelanguage.googleapis.com".to_string() }
fn default_generation_timeout() -> u64 { 20 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_outreach_concurrency")]
    pub outreach_concurrency: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            outreach_concurrency: default_outreach_concurrency(),
        }
    }
}

fn default_outreach_concurrency() -> usize { 4 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_relevance_weight")]
    pub relevance: f64,
    #[serde(default = "default_audience_weight")]
    pub audience: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            relevance: default_relevance_weight(),
            audience: default_audience_weight(),
        }
    }
}

fn default_relevance_weight() -> f64 { 0.75 }
fn default_audience_weight() -> f64 { 0.25 }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with INFLUENCER__)
    /// 5. Legacy variables: DATA_PATH, EMB_MODEL, GEMINI_API_KEY, GEMINI_MODEL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., INFLUENCER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("INFLUENCER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_legacy_env(settings, |key| std::env::var(key).ok())?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("INFLUENCER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the plain environment variables the service has always honoured
fn apply_legacy_env<F>(settings: Config, lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    const OVERRIDES: [(&str, &str); 4] = [
        ("DATA_PATH", "roster.path"),
        ("EMB_MODEL", "embedding.model"),
        ("GEMINI_API_KEY", "generation.api_key"),
        ("GEMINI_MODEL", "generation.model"),
    ];

    let mut builder = Config::builder().add_source(settings);
    for (var, key) in OVERRIDES {
        if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
            builder = builder.set_override(key, value)?;
        }
    }

    builder.build()
}
