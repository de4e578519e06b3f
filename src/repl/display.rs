//! Display manager for the terminal dashboard
//!
//! Draws widget panels, the banner and a spinner while a widget waits on
//! the network or the model.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::panel::{Panel, PanelItem};

/// Display manager for REPL UI
pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    update_interval: Duration,
}

impl DisplayManager {
    /// Update frequency: 10 FPS (100ms interval)
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            update_interval: Duration::from_millis(100), // 10 FPS
        }
    }

    /// Show welcome banner
    pub fn show_banner(&self, version: &str, chat_ready: bool) {
        let width = 64;
        let top = format!("{}", "=".repeat(width).cyan());
        let title = format!("  MediSense {} - Your Personal Health Assistant", version);
        let chat = if chat_ready { "Ready" } else { "No API key" };
        let info = format!("  Widgets: 6 | Chatbot: {} | Mode: REPL", chat);
        let bottom = format!("{}", "=".repeat(width).cyan());

        println!("\n{}", top);
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", bottom);
        println!("Choose a widget (or {} for commands, {} to quit)",
            "/help".green(), "/exit".green());
    }

    /// Spinner shown while a widget is busy
    pub fn start_spinner(&mut self, message: &str) -> ProgressBar {
        self.finish_current();

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb.clone());
        pb
    }

    /// Finish current spinner
    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Whether a spinner is currently running
    pub fn is_spinning(&self) -> bool {
        self.current_bar.is_some()
    }

    /// Draw a widget panel
    pub fn show_panel(&mut self, panel: &Panel) {
        self.finish_current();

        self.show_section(&panel.title);
        for item in &panel.items {
            match item {
                PanelItem::Text(s) => println!("{}", s),
                PanelItem::Success(s) => println!("{} {}", "✓".green(), s.green()),
                PanelItem::Warning(s) => self.show_warning(s),
                PanelItem::Error(s) => self.show_error(s),
                PanelItem::Alert(s) => println!("{} {}", "!".red().bold(), s.red().bold()),
                PanelItem::Bullet(s) => self.show_bullet(s),
                PanelItem::Preformatted(lines) => {
                    for line in lines {
                        println!("{}", line);
                    }
                }
            }
        }
        println!();
    }

    /// Display error message
    pub fn show_error(&self, error: &str) {
        println!("{} {}", "Error:".red().bold(), error.red());
    }

    /// Display warning message
    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    /// Display info message
    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    /// Display debug message (only if verbose)
    pub fn show_debug(&self, debug: &str, verbose: bool) {
        if verbose {
            println!("{} {}", "Debug:".dimmed(), debug.dimmed());
        }
    }

    /// Show section header
    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }

    /// Show bullet point
    pub fn show_bullet(&self, text: &str) {
        println!("  {} {}", "•".cyan(), text);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}
