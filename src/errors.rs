//! Error types for MediSense
//!
//! Every widget has its own error enum so callers can tell a missing
//! credential apart from a failing upstream service. `DashboardError`
//! wraps them for code that crosses widget boundaries.

use thiserror::Error;

/// Chatbot relay errors
#[derive(Error, Debug)]
pub enum ChatError {
    /// No API key in the environment; the relay never touches the network
    #[error("API key is missing! Please configure your {env_var} environment variable.")]
    MissingApiKey { env_var: String },

    /// Transport or upstream failure
    #[error("API Error: {0}")]
    Api(String),

    /// Upstream answered but produced no usable text
    #[error("Error: No response received.")]
    EmptyResponse,
}

/// Fill-mask predictor errors
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Model could not be downloaded, loaded or reached
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// Model ran but produced something unusable
    #[error("Inference failed: {0}")]
    Inference(String),

    /// Prompt has no [MASK] slot the model recognises
    #[error("Prompt does not contain a mask token")]
    MissingMask,
}

/// Location and facility lookup errors
#[derive(Error, Debug)]
pub enum GeoError {
    /// Neither IP lookup nor place geocoding produced a coordinate
    #[error("Could not fetch location data. Please enter your location manually.")]
    LocationUnavailable,

    /// Transport failure talking to a geodata service
    #[error("Geodata request failed: {0}")]
    Request(String),
}

/// BMI input validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BmiError {
    #[error("Weight must be at least {min} kg (got {value})")]
    WeightTooLow { value: f64, min: f64 },

    #[error("Height must be at least {min} cm (got {value})")]
    HeightTooLow { value: f64, min: f64 },
}

/// Main error type for the dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Predictor(#[from] PredictorError),

    #[error(transparent)]
    Geo(#[from] GeoError),

    #[error(transparent)]
    Bmi(#[from] BmiError),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input could not be read or parsed
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_names_variable() {
        let err = ChatError::MissingApiKey {
            env_var: "GEMINI_API".to_string(),
        };
        assert!(err.to_string().contains("GEMINI_API"));
    }

    #[test]
    fn test_empty_response_message() {
        assert_eq!(
            ChatError::EmptyResponse.to_string(),
            "Error: No response received."
        );
    }

    #[test]
    fn test_bmi_error_display() {
        let err = BmiError::HeightTooLow { value: 20.0, min: 50.0 };
        assert!(err.to_string().contains("50"));
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_wrapping_is_transparent() {
        let err: DashboardError = GeoError::LocationUnavailable.into();
        assert_eq!(err.to_string(), GeoError::LocationUnavailable.to_string());
    }
}
