//! Hosted fill-mask inference client
//!
//! Endpoint: POST {endpoint}/{model_id} with `{"inputs": ..}`; the
//! response is an array of `{score, token, token_str, sequence}`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{FillMask, Prediction};
use crate::errors::PredictorError;

/// Fill-mask over the hosted inference API
#[derive(Debug, Clone)]
pub struct RemoteFillMask {
    client: Client,
    endpoint: String,
    model_id: String,
    token: Option<String>,
}

#[derive(Debug, Serialize)]
struct FillMaskRequest<'a> {
    inputs: &'a str,
    parameters: FillMaskParameters,
}

#[derive(Debug, Serialize)]
struct FillMaskParameters {
    top_k: usize,
}

#[derive(Debug, Deserialize)]
struct FillMaskCandidate {
    score: f32,
    #[serde(default)]
    token_str: String,
    sequence: String,
}

impl RemoteFillMask {
    pub fn new(client: Client, endpoint: &str, model_id: &str, token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model_id: model_id.to_string(),
            token,
        }
    }

    fn url(&self) -> String {
        format!("{}/{}", self.endpoint, self.model_id)
    }
}

#[async_trait]
impl FillMask for RemoteFillMask {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn fill(&self, prompt: &str, top_k: usize) -> Result<Vec<Prediction>, PredictorError> {
        let url = self.url();
        tracing::debug!(model = %self.model_id, %url, "requesting fill-mask inference");

        let mut request = self.client.post(&url).json(&FillMaskRequest {
            inputs: prompt,
            parameters: FillMaskParameters { top_k },
        });
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PredictorError::Unavailable(format!("Failed to reach inference API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(model = %self.model_id, %status, "fill-mask inference rejected");
            return Err(PredictorError::Unavailable(format!("HTTP {}: {}", status, body)));
        }

        let candidates: Vec<FillMaskCandidate> = response
            .json()
            .await
            .map_err(|e| PredictorError::Inference(format!("Failed to parse response: {}", e)))?;

        tracing::info!(model = %self.model_id, candidates = candidates.len(), "fill-mask inference complete");

        Ok(candidates
            .into_iter()
            .map(|c| Prediction {
                sequence: c.sequence,
                token: c.token_str.trim().to_string(),
                score: c.score,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_model() {
        let remote = RemoteFillMask::new(
            Client::new(),
            "https://example.test/models/",
            "medicalai/ClinicalBERT",
            None,
        );
        assert_eq!(remote.url(), "https://example.test/models/medicalai/ClinicalBERT");
        assert_eq!(remote.model_id(), "medicalai/ClinicalBERT");
    }

    #[test]
    fn test_candidate_parsing() {
        let body = r#"[{"score":0.41,"token":2023,"token_str":"fever","sequence":"... possible condition : fever."}]"#;
        let parsed: Vec<FillMaskCandidate> = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].token_str, "fever");
        assert!((parsed[0].score - 0.41).abs() < f32::EPSILON);
    }
}
