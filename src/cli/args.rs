//! Command-line argument parsing for MediSense
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::mode::Mode;

/// MediSense - Your personal health assistant in the terminal
#[derive(Parser, Debug)]
#[command(name = "medisense")]
#[command(version)]
#[command(about = "Health dashboard: sensor predictions, BMI, chatbot and nearby care", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand (interactive dashboard when omitted)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the interactive dashboard
    Start,

    /// Simulate one sensor reading and optionally run the predictor
    Vitals {
        /// Run the fill-mask model on the reading
        #[arg(long)]
        predict: bool,
    },

    /// Check symptoms (placeholder diagnosis)
    Symptoms {
        /// Symptom description
        #[arg(value_name = "TEXT", default_value = "")]
        text: String,
    },

    /// Show the health trends chart
    Trends,

    /// Ask the health chatbot a question
    Chat {
        /// Question for the chatbot
        #[arg(value_name = "PROMPT")]
        prompt: Option<String>,
    },

    /// Calculate body mass index
    Bmi {
        /// Weight in kilograms
        #[arg(short, long)]
        weight: f64,

        /// Height in centimeters
        #[arg(long)]
        height: f64,
    },

    /// Find hospitals and pharmacies near you
    Nearby,

    /// Run connectivity and configuration checks
    Doctor,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check flag combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose > 0 {
            return Err("Cannot combine --quiet with --verbose.".to_string());
        }
        Ok(())
    }
}

impl Commands {
    /// Widget backing a one-shot subcommand
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Commands::Vitals { .. } => Some(Mode::SensorPredictions),
            Commands::Symptoms { .. } => Some(Mode::SymptomChecker),
            Commands::Trends => Some(Mode::HealthDashboard),
            Commands::Chat { .. } => Some(Mode::Chatbot),
            Commands::Bmi { .. } => Some(Mode::BmiCalculator),
            Commands::Nearby => Some(Mode::NearbyHealthcare),
            Commands::Start | Commands::Doctor | Commands::Config => None,
        }
    }

    /// Answers fed to the widget's prompts, in the order it asks
    pub fn scripted_answers(&self) -> Vec<String> {
        match self {
            Commands::Vitals { predict } => {
                vec![if *predict { "y" } else { "n" }.to_string()]
            }
            Commands::Symptoms { text } => vec![text.clone()],
            Commands::Chat { prompt } => vec![prompt.clone().unwrap_or_default()],
            Commands::Bmi { weight, height } => vec![weight.to_string(), height.to_string()],
            _ => Vec::new(),
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Default tracing filter for this level
    pub fn log_filter(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "info",
            Verbosity::VeryVerbose => "debug",
        }
    }

    /// Check if should show progress spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool, command: Option<Commands>) -> Args {
        Args {
            config: None,
            verbose,
            quiet,
            command,
        }
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(args(0, true, None).verbosity(), Verbosity::Quiet);
        assert_eq!(args(0, false, None).verbosity(), Verbosity::Normal);
        assert_eq!(args(1, false, None).verbosity(), Verbosity::Verbose);
        assert_eq!(args(3, false, None).verbosity(), Verbosity::VeryVerbose);
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(Verbosity::Quiet.log_filter(), "error");
        assert_eq!(Verbosity::Normal.log_filter(), "warn");
        assert_eq!(Verbosity::Verbose.log_filter(), "info");
        assert_eq!(Verbosity::VeryVerbose.log_filter(), "debug");
    }

    #[test]
    fn test_validate() {
        assert!(args(0, false, None).validate().is_ok());
        assert!(args(1, true, None).validate().is_err());
    }

    #[test]
    fn test_parse_bmi_subcommand() {
        let parsed = Args::try_parse_from(["medisense", "bmi", "--weight", "70", "--height", "175"]).unwrap();
        assert_eq!(
            parsed.command,
            Some(Commands::Bmi { weight: 70.0, height: 175.0 })
        );
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let parsed = Args::try_parse_from(["medisense", "nearby", "-vv"]).unwrap();
        assert_eq!(parsed.verbosity(), Verbosity::VeryVerbose);
        assert_eq!(parsed.command, Some(Commands::Nearby));
    }

    #[test]
    fn test_command_modes() {
        assert_eq!(Commands::Trends.mode(), Some(Mode::HealthDashboard));
        assert_eq!(Commands::Chat { prompt: None }.mode(), Some(Mode::Chatbot));
        assert_eq!(Commands::Doctor.mode(), None);
    }

    #[test]
    fn test_scripted_answers() {
        assert_eq!(Commands::Vitals { predict: true }.scripted_answers(), vec!["y"]);
        assert_eq!(Commands::Vitals { predict: false }.scripted_answers(), vec!["n"]);
        assert_eq!(
            Commands::Bmi { weight: 70.0, height: 175.0 }.scripted_answers(),
            vec!["70", "175"]
        );
        assert_eq!(Commands::Chat { prompt: None }.scripted_answers(), vec![""]);
        assert!(Commands::Nearby.scripted_answers().is_empty());
    }
}
