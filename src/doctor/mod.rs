//! Doctor command for system diagnostics
//!
//! Checks configuration, credentials and reachability of every remote
//! service the dashboard widgets depend on.

use colored::*;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;

use crate::cli::config::{Config, PredictorBackend};

/// Per-endpoint timeout
const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Health check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Pass,
    Warn(String),
    Fail(String),
}

/// Individual health check
#[derive(Debug)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
}

impl HealthCheck {
    fn new(name: &str, status: HealthStatus) -> Self {
        Self {
            name: name.to_string(),
            status,
        }
    }
}

/// Doctor diagnostics system
pub struct Doctor {
    config: Config,
    client: Client,
}

impl Doctor {
    /// Create a new doctor instance
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .timeout(CHECK_TIMEOUT)
            .user_agent(config.http.user_agent.clone())
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { config, client }
    }

    /// Run all health checks
    pub async fn run_diagnostics(&self) -> Vec<HealthCheck> {
        let mut checks = Vec::new();

        checks.push(self.check_config());
        checks.push(self.check_chat_key());
        checks.push(self.check_predictor().await);
        checks.push(self.check_endpoint("Chat API", &self.config.chat.endpoint).await);
        if self.config.location.ip_lookup {
            checks.push(self.check_endpoint("IP Geolocation", &self.config.location.ip_lookup_url).await);
        }
        checks.push(self.check_endpoint("Geocoding", &self.config.location.geocode_url).await);
        checks.push(self.check_endpoint("Overpass", &self.config.facilities.overpass_url).await);
        checks.push(self.check_map_output());

        checks
    }

    /// Check 1: Configuration values
    fn check_config(&self) -> HealthCheck {
        match self.config.validate() {
            Ok(()) => HealthCheck::new("Configuration", HealthStatus::Pass),
            Err(e) => HealthCheck::new("Configuration", HealthStatus::Fail(e.to_string())),
        }
    }

    /// Check 2: Chatbot API key present
    fn check_chat_key(&self) -> HealthCheck {
        if self.config.chat_api_key().is_some() {
            HealthCheck::new("Chat API Key", HealthStatus::Pass)
        } else {
            HealthCheck::new(
                "Chat API Key",
                HealthStatus::Warn(format!("{} is not set; chatbot disabled", self.config.chat.api_key_env)),
            )
        }
    }

    /// Check 3: Predictor backend
    async fn check_predictor(&self) -> HealthCheck {
        match self.config.predictor.backend {
            PredictorBackend::Remote => {
                let url = format!(
                    "{}/{}",
                    self.config.predictor.endpoint.trim_end_matches('/'),
                    self.config.predictor.model_id
                );
                let mut check = self.check_endpoint("Predictor (remote)", &url).await;
                if check.status == HealthStatus::Pass && self.config.predictor_token().is_none() {
                    check.status = HealthStatus::Warn(format!(
                        "{} is not set; anonymous requests may be rate limited",
                        self.config.predictor.token_env
                    ));
                }
                check
            }
            PredictorBackend::Local => {
                // Weights are fetched on first prediction
                HealthCheck::new("Predictor (local)", HealthStatus::Pass)
            }
        }
    }

    /// Reachability check: any HTTP answer below 500 counts as reachable
    pub async fn check_endpoint(&self, name: &str, url: &str) -> HealthCheck {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_server_error() => HealthCheck::new(
                name,
                HealthStatus::Warn(format!("{} answered {}", url, response.status())),
            ),
            Ok(_) => HealthCheck::new(name, HealthStatus::Pass),
            Err(e) => HealthCheck::new(
                name,
                HealthStatus::Fail(format!("Cannot reach {}: {}", url, e)),
            ),
        }
    }

    /// Check: map file directory is writable
    fn check_map_output(&self) -> HealthCheck {
        let map_path = self.config.facilities.map_path();
        let dir = map_path.parent().unwrap_or_else(|| Path::new("."));

        if !dir.exists() {
            return HealthCheck::new(
                "Map Output",
                HealthStatus::Fail(format!("{} does not exist", dir.display())),
            );
        }

        let test_file = dir.join(".medisense_test");
        match std::fs::write(&test_file, "test") {
            Ok(_) => {
                let _ = std::fs::remove_file(&test_file);
                HealthCheck::new("Map Output", HealthStatus::Pass)
            }
            Err(_) => HealthCheck::new(
                "Map Output",
                HealthStatus::Fail(format!("No write permission in {}", dir.display())),
            ),
        }
    }

    /// Display diagnostics results
    pub fn display_results(checks: &[HealthCheck]) {
        println!("\n{}\n", "MediSense System Diagnostics".bold().cyan());
        println!("{:<20} {}", "Check", "Status");
        println!("{}", "=".repeat(50));

        for check in checks {
            let status = match &check.status {
                HealthStatus::Pass => "PASS".green(),
                HealthStatus::Warn(msg) => format!("WARN: {}", msg).yellow(),
                HealthStatus::Fail(msg) => format!("FAIL: {}", msg).red(),
            };
            println!("{:<20} {}", check.name, status);
        }

        println!();
    }

    /// Get overall health status
    pub fn overall_status(checks: &[HealthCheck]) -> bool {
        !checks.iter().any(|c| matches!(c.status, HealthStatus::Fail(_)))
    }
}
