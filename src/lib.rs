//! MediSense - terminal health dashboard
//!
//! Six independent widgets behind one menu: simulated IoT vitals with a
//! fill-mask predictor, a symptom checker, a trends chart, a chatbot
//! relay, a BMI calculator and a nearby hospital/pharmacy finder.
//!
//! # Architecture
//!
//! - **Widgets**: `vitals`, `symptoms`, `trends`, `chat`, `bmi`, `geo`
//! - **Dispatch**: `mode` selects a widget, `dashboard` renders it into a `panel`
//! - **Interface**: `cli` for one-shot runs, `repl` for the interactive menu

pub mod errors;
pub mod cli;
pub mod logging;

// Widgets
pub mod bmi;
pub mod chat;
pub mod geo;
pub mod symptoms;
pub mod trends;
pub mod vitals;

// Dispatch and presentation
pub mod mode;
pub mod panel;
pub mod dashboard;
pub mod repl;
pub mod doctor;

// Re-export commonly used types
pub use errors::{DashboardError, Result};
pub use mode::Mode;
pub use panel::{Panel, PanelItem};
