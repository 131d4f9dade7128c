use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Fallback credential when no API key variable is set in the environment.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub reliability: ReliabilityConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

fn default_model() -> String {
    "gemini-3-flash-preview".into()
}

fn default_api_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            model: default_model(),
            api_base_url: default_api_base_url(),
            generation: GenerationConfig::default(),
            reliability: ReliabilityConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::Validation("model must not be empty".into()));
        }
        if self.reliability.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "reliability.max_attempts must be at least 1".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generation.temperature) {
            return Err(ConfigError::Validation(format!(
                "generation.temperature {} is outside 0.0..=2.0",
                self.generation.temperature
            )));
        }
        if !(0.0..=1.0).contains(&self.generation.top_p) {
            return Err(ConfigError::Validation(format!(
                "generation.top_p {} is outside 0.0..=1.0",
                self.generation.top_p
            )));
        }
        if self.generation.top_k == 0 {
            return Err(ConfigError::Validation(
                "generation.top_k must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

fn default_temperature() -> f64 {
    0.85
}

fn default_top_p() -> f64 {
    0.9
}

fn default_top_k() -> u32 {
    40
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    /// Total attempts per generation, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    2_000
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_dir")]
    pub output_dir: PathBuf,
}

fn default_report_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_report_dir(),
        }
    }
}
