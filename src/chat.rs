//! Chatbot relay to the Google Generative AI API
//!
//! Each question is a single `generateContent` call:
//! - POST /v1beta/models/{model}:generateContent?key={key}
//! - fixed sampling temperature from config (0.7 by default)
//! - no conversation history, no retry
//!
//! Without an API key the relay refuses before building any request.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::cli::config::ChatConfig;
use crate::errors::ChatError;

/// One question and its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub prompt: String,
    pub reply: String,
}

/// Relay from the terminal to the hosted model
pub struct ChatRelay {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    api_key_env: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<GoogleContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GoogleContent {
    #[serde(default)]
    role: String,
    #[serde(default)]
    parts: Vec<GooglePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GooglePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<GoogleCandidate>,
}

#[derive(Debug, Deserialize)]
struct GoogleCandidate {
    content: Option<GoogleContent>,
}

impl ChatRelay {
    pub fn new(client: Client, config: &ChatConfig, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            api_key_env: config.api_key_env.clone(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Whether a credential is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Environment variable the key is read from
    pub fn api_key_env(&self) -> &str {
        &self.api_key_env
    }

    /// Ask one question and return the model's text reply
    pub async fn ask(&self, prompt: &str) -> Result<ChatExchange, ChatError> {
        let Some(api_key) = &self.api_key else {
            return Err(ChatError::MissingApiKey {
                env_var: self.api_key_env.clone(),
            });
        };

        let url = format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model);
        let request = GenerateRequest {
            contents: vec![GoogleContent {
                role: "user".to_string(),
                parts: vec![GooglePart { text: prompt.to_string() }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending chat request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Api("request timed out".to_string())
                } else {
                    ChatError::Api(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(model = %self.model, %status, "chat request rejected");
            return Err(ChatError::Api(format!("HTTP {}: {}", status, body)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Api(format!("Failed to read response body: {}", e)))?;

        let reply = extract_reply(&body).ok_or(ChatError::EmptyResponse)?;
        tracing::info!(model = %self.model, reply_len = reply.len(), "chat reply received");

        Ok(ChatExchange {
            prompt: prompt.to_string(),
            reply,
        })
    }
}

/// Text of the first candidate, if any non-blank text came back
fn extract_reply(body: &str) -> Option<String> {
    let parsed: GenerateResponse = serde_json::from_str(body).ok()?;
    let text = parsed
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect::<Vec<String>>()
        .join("");

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
