//! Configuration management for MediSense
//!
//! TOML-based configuration with built-in defaults for every endpoint.
//! Location: ~/.medisense/config.toml (read only if present, never written)

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use crate::errors::{DashboardError, Result};

/// Complete configuration for MediSense
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub chat: ChatConfig,
    pub predictor: PredictorConfig,
    pub location: LocationConfig,
    pub facilities: FacilitiesConfig,
}

/// Shared HTTP client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Generative-text chatbot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

/// Where fill-mask inference runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictorBackend {
    /// Hosted inference endpoint
    Remote,
    /// In-process candle model downloaded from the hub
    Local,
}

/// Fill-mask predictor settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    pub backend: PredictorBackend,
    pub model_id: String,
    pub endpoint: String,
    pub top_k: usize,
    /// Environment variable holding an optional hub token
    pub token_env: String,
    /// Upper bound on downloading and loading a local model
    pub load_timeout_secs: u64,
}

/// User location resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub ip_lookup: bool,
    pub ip_lookup_url: String,
    pub geocode_url: String,
    pub fallback_place: String,
}

/// Nearby facility query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitiesConfig {
    pub overpass_url: String,
    pub radius_m: u32,
    pub list_limit: usize,
    pub map_path: Option<PathBuf>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: format!("medisense/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            temperature: 0.7,
            api_key_env: "GEMINI_API".to_string(),
        }
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            backend: PredictorBackend::Remote,
            model_id: "medicalai/ClinicalBERT".to_string(),
            endpoint: "https://api-inference.huggingface.co/models".to_string(),
            top_k: 3,
            token_env: "HF_TOKEN".to_string(),
            load_timeout_secs: 900,
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            ip_lookup: true,
            ip_lookup_url: "https://ipinfo.io/json".to_string(),
            geocode_url: "https://nominatim.openstreetmap.org/search".to_string(),
            fallback_place: "Kolkata, India".to_string(),
        }
    }
}

impl Default for FacilitiesConfig {
    fn default() -> Self {
        Self {
            overpass_url: "http://overpass-api.de/api/interpreter".to_string(),
            radius_m: 5000,
            list_limit: 5,
            map_path: None,
        }
    }
}

impl HttpConfig {
    /// Build a client with the configured timeout and user agent
    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(DashboardError::HttpError)
    }
}

impl FacilitiesConfig {
    /// Map output file (temp dir unless configured)
    pub fn map_path(&self) -> PathBuf {
        self.map_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("medisense_map.html"))
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| DashboardError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location if present, else built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".medisense").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.http.timeout_secs == 0 {
            return Err(DashboardError::ConfigError(
                "http.timeout_secs must be greater than 0".to_string()
            ));
        }

        if !(0.0..=2.0).contains(&self.chat.temperature) {
            return Err(DashboardError::ConfigError(
                "chat.temperature must be between 0.0 and 2.0".to_string()
            ));
        }

        if self.predictor.top_k == 0 {
            return Err(DashboardError::ConfigError(
                "predictor.top_k must be greater than 0".to_string()
            ));
        }

        if self.predictor.load_timeout_secs == 0 {
            return Err(DashboardError::ConfigError(
                "predictor.load_timeout_secs must be greater than 0".to_string()
            ));
        }

        if self.facilities.radius_m == 0 {
            return Err(DashboardError::ConfigError(
                "facilities.radius_m must be greater than 0".to_string()
            ));
        }

        if self.location.fallback_place.trim().is_empty() {
            return Err(DashboardError::ConfigError(
                "location.fallback_place must not be empty".to_string()
            ));
        }

        Ok(())
    }

    /// Read the chat API key from the configured environment variable
    pub fn chat_api_key(&self) -> Option<String> {
        std::env::var(&self.chat.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Read the optional hub token for fill-mask inference
    pub fn predictor_token(&self) -> Option<String> {
        std::env::var(&self.predictor.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}
