// In-process fill-mask inference via Candle
use async_trait::async_trait;
use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertForMaskedLM, Config as BertConfig};
use candle_transformers::models::distilbert::{Config as DistilBertConfig, DistilBertForMaskedLM};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::PathBuf;
use std::sync::Arc;
use tokenizers::Tokenizer;

use super::{FillMask, Prediction, MASK_TOKEN};
use crate::errors::PredictorError;

/// Masked-language model downloaded from the HuggingFace Hub
///
/// BERT and DistilBERT checkpoints load; the architecture is read from
/// `model_type` in the repo's `config.json`.
pub struct LocalFillMask {
    model_id: String,
    inner: Arc<LoadedModel>,
}

/// Checkpoint families with a masked-LM head in candle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bert,
    DistilBert,
}

impl Architecture {
    /// Read `model_type` from a model's `config.json`
    pub fn detect(config_json: &str) -> Result<Self, PredictorError> {
        let value: serde_json::Value = serde_json::from_str(config_json)
            .map_err(|e| PredictorError::Unavailable(format!("Failed to parse model config: {}", e)))?;

        match value.get("model_type").and_then(|t| t.as_str()) {
            Some("bert") => Ok(Architecture::Bert),
            Some("distilbert") => Ok(Architecture::DistilBert),
            Some(other) => Err(PredictorError::Unavailable(format!(
                "Unsupported model architecture: {}",
                other
            ))),
            None => Err(PredictorError::Unavailable(
                "Model config has no model_type".to_string(),
            )),
        }
    }
}

enum MaskedLm {
    Bert(BertForMaskedLM),
    DistilBert(DistilBertForMaskedLM),
}

struct LoadedModel {
    model: MaskedLm,
    tokenizer: Tokenizer,
    device: Device,
}

fn candle_err(e: candle_core::Error) -> PredictorError {
    PredictorError::Inference(e.to_string())
}

impl LocalFillMask {
    /// Download (first use only, hub cache afterwards) and load the model.
    /// Blocking; call from a blocking-safe context.
    pub fn load(model_id: &str) -> Result<Self, PredictorError> {
        // CPU only for now
        let device = Device::Cpu;

        let api = Api::new()
            .map_err(|e| PredictorError::Unavailable(format!("Failed to create HuggingFace API client: {}", e)))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let fetch = |file: &str| -> Result<PathBuf, PredictorError> {
            repo.get(file)
                .map_err(|e| PredictorError::Unavailable(format!("Failed to download {}: {}", file, e)))
        };

        let config_path = fetch("config.json")?;
        let tokenizer_path = fetch("tokenizer.json")?;

        let config_contents = std::fs::read_to_string(config_path)
            .map_err(|e| PredictorError::Unavailable(format!("Failed to read model config: {}", e)))?;
        let architecture = Architecture::detect(&config_contents)?;

        let tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| PredictorError::Unavailable(format!("Failed to load tokenizer: {}", e)))?;

        // Prefer safetensors; older checkpoints only ship a pickle
        let vb = match repo.get("model.safetensors") {
            Ok(weights) => unsafe {
                VarBuilder::from_mmaped_safetensors(&[weights], DType::F32, &device)
                    .map_err(candle_err)?
            },
            Err(_) => {
                let weights = fetch("pytorch_model.bin")?;
                VarBuilder::from_pth(weights, DType::F32, &device).map_err(candle_err)?
            }
        };

        let parse_err =
            |e: serde_json::Error| PredictorError::Unavailable(format!("Failed to parse model config: {}", e));
        let build_err = |e: candle_core::Error| PredictorError::Unavailable(format!("Failed to create model: {}", e));

        let model = match architecture {
            Architecture::Bert => {
                let config: BertConfig = serde_json::from_str(&config_contents).map_err(parse_err)?;
                MaskedLm::Bert(BertForMaskedLM::load(vb, &config).map_err(build_err)?)
            }
            Architecture::DistilBert => {
                let config: DistilBertConfig = serde_json::from_str(&config_contents).map_err(parse_err)?;
                MaskedLm::DistilBert(DistilBertForMaskedLM::load(vb, &config).map_err(build_err)?)
            }
        };

        tracing::info!(model = model_id, ?architecture, "local fill-mask model loaded");

        Ok(Self {
            model_id: model_id.to_string(),
            inner: Arc::new(LoadedModel { model, tokenizer, device }),
        })
    }
}

impl LoadedModel {
    fn fill(&self, prompt: &str, top_k: usize) -> Result<Vec<Prediction>, PredictorError> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| PredictorError::Inference(format!("Tokenization failed: {}", e)))?;

        let mask_id = self
            .tokenizer
            .token_to_id(MASK_TOKEN)
            .ok_or(PredictorError::MissingMask)?;
        let ids = encoding.get_ids();
        let mask_pos = ids
            .iter()
            .position(|&id| id == mask_id)
            .ok_or(PredictorError::MissingMask)?;

        let input_ids = Tensor::new(ids, &self.device).and_then(|t| t.unsqueeze(0)).map_err(candle_err)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(candle_err)?;

        // (batch, seq, vocab) -> vocab logits at the mask
        let logits = match &self.model {
            MaskedLm::Bert(model) => {
                let token_type_ids = input_ids.zeros_like().map_err(candle_err)?;
                model.forward(&input_ids, &token_type_ids, Some(&attention_mask))
            }
            MaskedLm::DistilBert(model) => {
                // Non-zero entries are hidden from attention
                let hidden = attention_mask
                    .eq(0u32)
                    .and_then(|m| m.reshape((1, 1, 1, ids.len())))
                    .map_err(candle_err)?;
                model.forward(&input_ids, &hidden)
            }
        }
        .map_err(candle_err)?;
        let mask_logits = logits.i((0, mask_pos)).map_err(candle_err)?;
        let probs: Vec<f32> = candle_nn::ops::softmax(&mask_logits, 0)
            .and_then(|p| p.to_vec1())
            .map_err(candle_err)?;

        let mut ranked: Vec<(u32, f32)> = probs
            .into_iter()
            .enumerate()
            .map(|(id, p)| (id as u32, p))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(top_k);

        ranked
            .into_iter()
            .map(|(token_id, score)| {
                let mut filled = ids.to_vec();
                filled[mask_pos] = token_id;

                let sequence = self
                    .tokenizer
                    .decode(&filled, true)
                    .map_err(|e| PredictorError::Inference(format!("Decoding failed: {}", e)))?;
                let token = self
                    .tokenizer
                    .decode(&[token_id], true)
                    .map_err(|e| PredictorError::Inference(format!("Decoding failed: {}", e)))?;

                Ok(Prediction {
                    sequence,
                    token: token.trim().to_string(),
                    score,
                })
            })
            .collect()
    }
}

#[async_trait]
impl FillMask for LocalFillMask {
    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn fill(&self, prompt: &str, top_k: usize) -> Result<Vec<Prediction>, PredictorError> {
        let inner = Arc::clone(&self.inner);
        let prompt = prompt.to_string();

        tokio::task::spawn_blocking(move || inner.fill(&prompt, top_k))
            .await
            .map_err(|e| PredictorError::Inference(format!("Inference task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vitals::{build_prompt, SensorReading};

    #[tokio::test]
    #[ignore] // Integration test - requires model download
    async fn test_local_fill_returns_ranked_candidates() {
        let model = tokio::task::spawn_blocking(|| LocalFillMask::load("bert-base-uncased"))
            .await
            .unwrap()
            .expect("Failed to load model");

        let reading = SensorReading { heart_rate: 72, spo2: 98.0, temperature: 36.6 };
        let predictions = model.fill(&build_prompt(&reading), 3).await.unwrap();

        assert_eq!(predictions.len(), 3);
        assert!(predictions.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(predictions.iter().all(|p| (0.0..=1.0).contains(&p.score)));
    }

    #[test]
    fn test_detect_architecture() {
        let bert = r#"{"model_type": "bert", "hidden_size": 768}"#;
        let distil = r#"{"model_type": "distilbert", "dim": 768, "n_layers": 6}"#;
        assert_eq!(Architecture::detect(bert).unwrap(), Architecture::Bert);
        assert_eq!(Architecture::detect(distil).unwrap(), Architecture::DistilBert);
    }

    #[test]
    fn test_detect_rejects_other_architectures() {
        match Architecture::detect(r#"{"model_type": "roberta"}"#) {
            Err(PredictorError::Unavailable(msg)) => assert!(msg.contains("roberta")),
            other => panic!("expected Unavailable, got {:?}", other.map(|_| ())),
        }
        assert!(matches!(Architecture::detect("{}"), Err(PredictorError::Unavailable(_))));
        assert!(matches!(Architecture::detect("not json"), Err(PredictorError::Unavailable(_))));
    }

    #[tokio::test]
    #[ignore] // Integration test - requires model download
    async fn test_local_distilbert_checkpoint() {
        let model = tokio::task::spawn_blocking(|| LocalFillMask::load("medicalai/ClinicalBERT"))
            .await
            .unwrap()
            .expect("Failed to load model");

        let reading = SensorReading { heart_rate: 72, spo2: 98.0, temperature: 36.6 };
        let predictions = model.fill(&build_prompt(&reading), 3).await.unwrap();
        assert_eq!(predictions.len(), 3);
    }

    #[test]
    #[ignore] // Integration test - requires network
    fn test_missing_repo_is_unavailable() {
        let result = LocalFillMask::load("medisense/does-not-exist");
        assert!(matches!(result, Err(PredictorError::Unavailable(_))));
    }
}
