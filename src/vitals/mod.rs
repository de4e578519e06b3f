//! Mock IoT vitals sensor and fill-mask health prediction
//!
//! Readings are random, never sourced from a device. The prediction
//! embeds a reading in a fixed sentence with one `[MASK]` slot and asks a
//! clinical masked-language model for the likeliest completions.

pub mod lazy;
pub mod local;
pub mod remote;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::PredictorError;

pub use lazy::LazyPredictor;
pub use local::LocalFillMask;
pub use remote::RemoteFillMask;

/// Mask placeholder understood by BERT-family tokenizers
pub const MASK_TOKEN: &str = "[MASK]";

/// One simulated sensor sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Beats per minute, 60..=100
    pub heart_rate: u32,
    /// Oxygen saturation percent, 95.0..=100.0, one decimal
    pub spo2: f64,
    /// Degrees Celsius, 36.0..=37.5, one decimal
    pub temperature: f64,
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Heart rate: {} BPM | SpO2: {:.1}% | Temperature: {:.1}°C",
            self.heart_rate, self.spo2, self.temperature
        )
    }
}

/// One ranked fill-mask candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Full sentence with the mask filled in
    pub sequence: String,
    /// The token that filled the mask
    pub token: String,
    /// Model confidence in [0, 1]
    pub score: f32,
}

/// A masked-language model able to fill a single `[MASK]` slot
#[async_trait]
pub trait FillMask: Send + Sync {
    /// Identifier of the underlying checkpoint
    fn model_id(&self) -> &str;

    /// Return up to `top_k` candidates for the mask in `prompt`
    async fn fill(&self, prompt: &str, top_k: usize) -> Result<Vec<Prediction>, PredictorError>;
}

/// Sample a reading from the thread-local generator
pub fn generate_reading() -> SensorReading {
    generate_reading_with(&mut rand::thread_rng())
}

/// Sample a reading from a caller-supplied generator
pub fn generate_reading_with<R: Rng + ?Sized>(rng: &mut R) -> SensorReading {
    SensorReading {
        heart_rate: rng.gen_range(60..=100),
        spo2: round1(rng.gen_range(95.0..=100.0)),
        temperature: round1(rng.gen_range(36.0..=37.5)),
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sentence template submitted to the model
pub fn build_prompt(reading: &SensorReading) -> String {
    format!(
        "The patient has a heart rate of {} BPM, SpO2 at {:.1}%, and a temperature of {:.1}°C. Possible condition: {}.",
        reading.heart_rate, reading.spo2, reading.temperature, MASK_TOKEN
    )
}

/// Highest-scoring `top_k` candidates, best first
pub fn top_predictions(mut predictions: Vec<Prediction>, top_k: usize) -> Vec<Prediction> {
    predictions.sort_by(|a, b| b.score.total_cmp(&a.score));
    predictions.truncate(top_k);
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_one_decimal(value: f64) -> bool {
        ((value * 10.0).round() - value * 10.0).abs() < 1e-9
    }

    #[test]
    fn test_readings_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let reading = generate_reading_with(&mut rng);
            assert!((60..=100).contains(&reading.heart_rate));
            assert!((95.0..=100.0).contains(&reading.spo2), "spo2 {}", reading.spo2);
            assert!((36.0..=37.5).contains(&reading.temperature), "temp {}", reading.temperature);
            assert!(is_one_decimal(reading.spo2));
            assert!(is_one_decimal(reading.temperature));
        }
    }

    #[test]
    fn test_thread_rng_reading() {
        let reading = generate_reading();
        assert!((60..=100).contains(&reading.heart_rate));
    }

    #[test]
    fn test_prompt_template() {
        let reading = SensorReading { heart_rate: 72, spo2: 98.0, temperature: 36.6 };
        assert_eq!(
            build_prompt(&reading),
            "The patient has a heart rate of 72 BPM, SpO2 at 98.0%, and a temperature of 36.6°C. Possible condition: [MASK]."
        );
    }

    #[test]
    fn test_top_predictions_sorted_and_truncated() {
        let make = |token: &str, score: f32| Prediction {
            sequence: format!("... {}.", token),
            token: token.to_string(),
            score,
        };
        let ranked = top_predictions(
            vec![make("a", 0.1), make("b", 0.5), make("c", 0.05), make("d", 0.3)],
            3,
        );

        let tokens: Vec<&str> = ranked.iter().map(|p| p.token.as_str()).collect();
        assert_eq!(tokens, vec!["b", "d", "a"]);
    }

    #[test]
    fn test_reading_display() {
        let reading = SensorReading { heart_rate: 88, spo2: 96.4, temperature: 37.1 };
        let text = reading.to_string();
        assert!(text.contains("88 BPM"));
        assert!(text.contains("96.4%"));
        assert!(text.contains("37.1°C"));
    }
}
