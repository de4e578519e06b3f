//! Dashboard mode selector
//!
//! Closed set of widgets; exactly one runs per selection.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    SensorPredictions,
    SymptomChecker,
    HealthDashboard,
    Chatbot,
    BmiCalculator,
    NearbyHealthcare,
}

impl Mode {
    /// Menu order
    pub const ALL: [Mode; 6] = [
        Mode::SensorPredictions,
        Mode::SymptomChecker,
        Mode::HealthDashboard,
        Mode::Chatbot,
        Mode::BmiCalculator,
        Mode::NearbyHealthcare,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::SensorPredictions => "IoT Sensor Predictions",
            Mode::SymptomChecker => "Symptom Checker",
            Mode::HealthDashboard => "Health Dashboard",
            Mode::Chatbot => "Chatbot",
            Mode::BmiCalculator => "BMI Calculator",
            Mode::NearbyHealthcare => "Nearby Healthcare Centers",
        }
    }

    /// Short name accepted at the prompt and used for CLI subcommands
    pub fn alias(&self) -> &'static str {
        match self {
            Mode::SensorPredictions => "sensor",
            Mode::SymptomChecker => "symptoms",
            Mode::HealthDashboard => "trends",
            Mode::Chatbot => "chat",
            Mode::BmiCalculator => "bmi",
            Mode::NearbyHealthcare => "nearby",
        }
    }

    /// Whether the widget asks the user anything before rendering
    pub fn prompts_user(&self) -> bool {
        !matches!(self, Mode::HealthDashboard | Mode::NearbyHealthcare)
    }

    /// 1-based menu position
    pub fn index(&self) -> usize {
        Mode::ALL.iter().position(|m| m == self).map(|i| i + 1).unwrap_or(0)
    }

    /// Parse a menu number, full label or alias (case-insensitive)
    pub fn parse(input: &str) -> Option<Mode> {
        let trimmed = input.trim();
        if let Ok(n) = trimmed.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| Mode::ALL.get(i)).copied();
        }

        let lowered = trimmed.to_lowercase();
        Mode::ALL
            .iter()
            .find(|m| m.label().to_lowercase() == lowered || m.alias() == lowered)
            .copied()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
