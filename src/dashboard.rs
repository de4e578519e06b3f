//! Mode dispatch: one handler per widget
//!
//! Each handler collects its inputs through a `Prompter`, calls exactly
//! one service, and returns a `Panel`. Failures become panel lines; no
//! handler returns an error to the caller.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::bmi::{self, BmiCategory};
use crate::chat::ChatRelay;
use crate::cli::config::Config;
use crate::errors::{ChatError, Result};
use crate::geo::{map, FacilityFinder, LocationSource, Locator};
use crate::mode::Mode;
use crate::panel::Panel;
use crate::symptoms;
use crate::trends;
use crate::vitals::{self, LazyPredictor};

/// Sidebar tips shown under the menu
pub const HEALTH_TIPS: [&str; 5] = [
    "Stay hydrated by drinking at least 8 glasses of water daily.",
    "Eat a balanced diet rich in fruits and vegetables.",
    "Exercise for at least 30 minutes daily.",
    "Ensure 7-9 hours of quality sleep every night.",
    "Manage stress through meditation or relaxation techniques.",
];

/// Question pre-filled in the chatbot form
pub const DEFAULT_CHAT_PROMPT: &str = "What are the common symptoms of flu?";

/// Rows per lane in the trend chart
const CHART_HEIGHT: usize = 8;

/// Source of user answers for widget inputs
pub trait Prompter {
    /// Ask a question. `Ok(None)` means the user backed out (EOF).
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Prompter replaying fixed answers, for one-shot CLI runs and tests
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts seen so far
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

/// All widget services, built once per process
pub struct Dashboard {
    predictor: Arc<LazyPredictor>,
    chat: ChatRelay,
    locator: Locator,
    finder: FacilityFinder,
}

impl Dashboard {
    pub fn new(
        predictor: Arc<LazyPredictor>,
        chat: ChatRelay,
        locator: Locator,
        finder: FacilityFinder,
    ) -> Self {
        Self {
            predictor,
            chat,
            locator,
            finder,
        }
    }

    /// Wire every service from configuration and the environment
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = config.http.build_client()?;

        let predictor = Arc::new(LazyPredictor::new(
            config.predictor.clone(),
            client.clone(),
            config.predictor_token(),
        ));
        let chat = ChatRelay::new(client.clone(), &config.chat, config.chat_api_key());
        let locator = Locator::new(client.clone(), config.location.clone());
        let finder = FacilityFinder::new(client, config.facilities.clone());

        Ok(Self::new(predictor, chat, locator, finder))
    }

    pub fn predictor(&self) -> &LazyPredictor {
        &self.predictor
    }

    pub fn chat(&self) -> &ChatRelay {
        &self.chat
    }

    /// Run the handler for `mode`
    pub async fn render(&self, mode: Mode, prompter: &mut dyn Prompter) -> Panel {
        tracing::debug!(mode = mode.alias(), "rendering widget");
        match mode {
            Mode::SensorPredictions => self.sensor_predictions(prompter).await,
            Mode::SymptomChecker => symptom_checker(prompter),
            Mode::HealthDashboard => health_dashboard(),
            Mode::Chatbot => self.chatbot(prompter).await,
            Mode::BmiCalculator => bmi_calculator(prompter),
            Mode::NearbyHealthcare => self.nearby_healthcare().await,
        }
    }

    async fn sensor_predictions(&self, prompter: &mut dyn Prompter) -> Panel {
        let mut panel = Panel::new("IoT Sensor Data & Health Prediction");
        let reading = vitals::generate_reading();
        panel.text(format!("Live IoT Sensor Readings: {}", reading));

        match prompter.ask("Predict health condition? [Y/n]") {
            Ok(Some(answer)) if is_yes(&answer) => {}
            Ok(_) => return panel,
            Err(e) => {
                panel.error(e.to_string());
                return panel;
            }
        }

        match self.predictor.predict(&reading).await {
            Ok(predictions) if predictions.is_empty() => {
                panel.warning("The model returned no predictions.");
            }
            Ok(predictions) => {
                panel.text("AI Predictions:");
                for p in predictions {
                    panel.bullet(format!("{} (Confidence: {:.2})", p.sequence, p.score));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "prediction failed");
                panel.error(e.to_string());
            }
        }
        panel
    }

    async fn chatbot(&self, prompter: &mut dyn Prompter) -> Panel {
        let mut panel = Panel::new("Chat with MediSenseBot");

        if !self.chat.is_configured() {
            panel.error(
                ChatError::MissingApiKey {
                    env_var: self.chat.api_key_env().to_string(),
                }
                .to_string(),
            );
            return panel;
        }

        let prompt = match prompter.ask(&format!("Ask a health-related question [{}]:", DEFAULT_CHAT_PROMPT)) {
            Ok(Some(q)) if q.trim().is_empty() => DEFAULT_CHAT_PROMPT.to_string(),
            Ok(Some(q)) => q,
            Ok(None) => return panel,
            Err(e) => {
                panel.error(e.to_string());
                return panel;
            }
        };

        match self.chat.ask(&prompt).await {
            Ok(exchange) => {
                panel.text(exchange.reply);
            }
            Err(e) => {
                tracing::warn!(error = %e, "chat request failed");
                panel.error(e.to_string());
            }
        }
        panel
    }

    async fn nearby_healthcare(&self) -> Panel {
        let mut panel = Panel::new("Find Nearby Hospitals & Pharmacies");

        let location = match self.locator.resolve_location().await {
            Ok(location) => location,
            Err(e) => {
                panel.error(e.to_string());
                return panel;
            }
        };
        if let LocationSource::Geocoded(place) = &location.source {
            panel.text(format!("Location from IP unavailable, using {}", place));
        }

        let facilities = match self.finder.fetch_nearby(location.coords).await {
            Ok(facilities) => facilities,
            Err(e) => {
                tracing::warn!(error = %e, "facility lookup failed");
                panel.error(e.to_string());
                return panel;
            }
        };

        if facilities.is_empty() {
            panel.warning("No hospitals or pharmacies found nearby.");
            return panel;
        }

        panel.success(format!("Found {} hospitals/pharmacies near you!", facilities.len()));
        for facility in facilities.iter().take(self.finder.config().list_limit) {
            panel.bullet(format!("{} ({}, {})", facility.name, facility.lat, facility.lon));
        }

        let path = self.finder.config().map_path();
        match map::write_map(&path, location.coords, &facilities) {
            Ok(()) => {
                panel.text(format!("Map saved to {}", path.display()));
            }
            Err(e) => {
                panel.warning(format!("Could not write map: {}", e));
            }
        }
        panel
    }
}

fn symptom_checker(prompter: &mut dyn Prompter) -> Panel {
    let mut panel = Panel::new("Enter Your Symptoms");
    match prompter.ask("Describe your symptoms:") {
        Ok(Some(text)) => {
            panel.success(symptoms::check(&text));
        }
        Ok(None) => {}
        Err(e) => {
            panel.error(e.to_string());
        }
    }
    panel
}

fn health_dashboard() -> Panel {
    let mut panel = Panel::new("Your Health Insights");
    panel.preformatted(trends::render_chart(&trends::series(), CHART_HEIGHT));
    panel
}

fn bmi_calculator(prompter: &mut dyn Prompter) -> Panel {
    let mut panel = Panel::new("BMI Calculator");

    let weight = match ask_number(prompter, "Enter weight (kg):") {
        Ok(Some(v)) => v,
        Ok(None) => return panel,
        Err(msg) => {
            panel.error(msg);
            return panel;
        }
    };
    let height = match ask_number(prompter, "Enter height (cm):") {
        Ok(Some(v)) => v,
        Ok(None) => return panel,
        Err(msg) => {
            panel.error(msg);
            return panel;
        }
    };

    match bmi::calculate(weight, height) {
        Ok(result) => {
            panel.text(format!("Your BMI is: {}", result.formatted()));
            let label = result.category.label();
            match result.category {
                BmiCategory::Normal => panel.success(label),
                BmiCategory::Underweight | BmiCategory::Overweight => panel.warning(label),
                BmiCategory::Obese => panel.alert(label),
            };
        }
        Err(e) => {
            panel.error(e.to_string());
        }
    }
    panel
}

fn ask_number(prompter: &mut dyn Prompter, prompt: &str) -> std::result::Result<Option<f64>, String> {
    match prompter.ask(prompt) {
        Ok(Some(raw)) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| format!("'{}' is not a number", raw.trim())),
        Ok(None) => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "" | "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::config::{ChatConfig, FacilitiesConfig, LocationConfig, PredictorConfig};
    use reqwest::Client;

    fn offline_dashboard() -> Dashboard {
        let client = Client::new();
        Dashboard::new(
            Arc::new(LazyPredictor::new(PredictorConfig::default(), client.clone(), None)),
            ChatRelay::new(client.clone(), &ChatConfig::default(), None),
            Locator::new(client.clone(), LocationConfig::default()),
            FacilityFinder::new(client, FacilitiesConfig::default()),
        )
    }

    #[tokio::test]
    async fn test_bmi_end_to_end() {
        let dashboard = offline_dashboard();
        let mut prompter = ScriptedPrompter::new(["70", "175"]);

        let panel = dashboard.render(Mode::BmiCalculator, &mut prompter).await;
        assert!(panel.contains("Your BMI is: 22.86"));
        assert!(panel.items.contains(&crate::panel::PanelItem::Success("Normal weight".to_string())));
        assert_eq!(prompter.asked().len(), 2);
    }

    #[tokio::test]
    async fn test_bmi_obese_band_is_not_a_failure() {
        let dashboard = offline_dashboard();
        let panel = dashboard
            .render(Mode::BmiCalculator, &mut ScriptedPrompter::new(["120", "170"]))
            .await;

        assert!(panel.contains("Your BMI is: 41.52"));
        assert!(panel.items.contains(&crate::panel::PanelItem::Alert("Obese".to_string())));
        assert!(!panel.has_error());
    }

    #[tokio::test]
    async fn test_bmi_rejects_text_and_floor() {
        let dashboard = offline_dashboard();

        let panel = dashboard
            .render(Mode::BmiCalculator, &mut ScriptedPrompter::new(["heavy"]))
            .await;
        assert!(panel.has_error());

        let panel = dashboard
            .render(Mode::BmiCalculator, &mut ScriptedPrompter::new(["70", "20"]))
            .await;
        assert!(panel.errors()[0].contains("Height"));
    }

    #[tokio::test]
    async fn test_symptoms_stub() {
        let dashboard = offline_dashboard();
        let panel = dashboard
            .render(Mode::SymptomChecker, &mut ScriptedPrompter::new(["sore throat"]))
            .await;
        assert!(panel.contains(symptoms::STUB_DIAGNOSIS));
    }

    #[tokio::test]
    async fn test_trends_chart_needs_no_input() {
        let dashboard = offline_dashboard();
        let mut prompter = ScriptedPrompter::default();
        let panel = dashboard.render(Mode::HealthDashboard, &mut prompter).await;

        assert!(panel.contains(trends::CHART_TITLE));
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_chat_without_key_shows_config_error() {
        let dashboard = offline_dashboard();
        let mut prompter = ScriptedPrompter::new(["hello"]);
        let panel = dashboard.render(Mode::Chatbot, &mut prompter).await;

        assert!(panel.has_error());
        assert!(panel.errors()[0].contains("GEMINI_API"));
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_sensor_skip_prediction() {
        let dashboard = offline_dashboard();
        let panel = dashboard
            .render(Mode::SensorPredictions, &mut ScriptedPrompter::new(["n"]))
            .await;

        assert!(panel.contains("Live IoT Sensor Readings"));
        assert!(!panel.contains("AI Predictions"));
        assert!(!dashboard.predictor().is_loaded());
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes(""));
        assert!(is_yes("Y"));
        assert!(is_yes(" yes "));
        assert!(!is_yes("n"));
        assert!(!is_yes("later"));
    }
}
