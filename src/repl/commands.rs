//! Command handler for REPL built-in commands

use anyhow::Result;
use colored::*;
use crossterm::{cursor, execute, terminal};
use std::io;
use crate::dashboard::HEALTH_TIPS;
use crate::mode::Mode;
use crate::repl::session::SessionManager;

/// REPL command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Menu,
    Tips,
    Status,
    Reset,
    Exit,
    Verbose { enable: bool },
    Clear,
    Unknown { input: String },
}

/// Command handler for parsing and executing REPL commands
pub struct CommandHandler {
    verbose: bool,
}

impl CommandHandler {
    /// Create new command handler
    pub fn new() -> Self {
        CommandHandler { verbose: false }
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        // Not a command if doesn't start with /
        if !trimmed.starts_with('/') {
            return Command::Unknown { input: input.to_string() };
        }

        let parts: Vec<&str> = trimmed[1..].split_whitespace().collect();
        if parts.is_empty() {
            return Command::Unknown { input: input.to_string() };
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "menu" | "m" => Command::Menu,
            "tips" => Command::Tips,
            "status" => Command::Status,
            "reset" => Command::Reset,
            "verbose" => {
                let enable = parts.get(1)
                    .map(|s| s.to_lowercase() == "on" || s == &"1" || s == &"true")
                    .unwrap_or(true);
                Command::Verbose { enable }
            }
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown { input: input.to_string() },
        }
    }

    /// Execute a command
    ///
    /// Returns true if REPL should continue, false if should exit
    pub fn execute(&mut self, command: Command, session: &mut SessionManager) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!("{}", "Goodbye!".green());
                Ok(false)
            }
            Command::Menu => {
                show_menu();
                Ok(true)
            }
            Command::Tips => {
                show_tips();
                Ok(true)
            }
            Command::Status => {
                self.show_status(session);
                Ok(true)
            }
            Command::Reset => {
                session.reset();
                println!("{}", "Session counters reset.".yellow());
                Ok(true)
            }
            Command::Verbose { enable } => {
                self.verbose = enable;
                let status = if enable { "enabled" } else { "disabled" };
                println!("{}", format!("Verbose mode {}", status).cyan());
                Ok(true)
            }
            Command::Clear => {
                execute!(io::stdout(), terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    /// Display help information
    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = vec![
            ("/help, /h", "Show this help message"),
            ("/menu, /m", "Show the widget menu"),
            ("/tips", "Show health tips"),
            ("/status", "Show session statistics"),
            ("/reset", "Reset session statistics"),
            ("/verbose [on|off]", "Toggle verbose output"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit MediSense"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<20} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Pick a widget by number, name or alias (e.g. {} or {})", "5".cyan(), "bmi".cyan());
        println!("  - Use {} for input history", "UP/DOWN arrows".cyan());
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    /// Display session status
    fn show_status(&self, session: &SessionManager) {
        println!("\n{}", "Session Status:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let duration = session.session_duration();
        let minutes = duration / 60;
        let seconds = duration % 60;
        let duration_str = if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        };

        println!("  Widgets Rendered: {}", session.render_count().to_string().green());
        println!("  With Errors:      {}", session.failed_renders().to_string().green());
        println!("  Session Duration: {}", duration_str.green());
        println!("  Verbose Mode:     {}", if self.verbose { "On".green() } else { "Off".red() });

        for mode in Mode::ALL {
            let count = session.renders_for(mode);
            if count > 0 {
                println!("    {:<28} {}", mode.label(), count.to_string().dimmed());
            }
        }
        println!();
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.verbose = enable;
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Numbered widget menu
pub fn show_menu() {
    println!("\n{}", "Menu".bold().cyan());
    println!("{}", "-".repeat(60).cyan());
    for mode in Mode::ALL {
        println!("  {}. {:<28} {}", mode.index().to_string().cyan(), mode.label(), mode.alias().dimmed());
    }
    println!();
}

/// Health tips sidebar
pub fn show_tips() {
    println!("{}", "Health Tips".bold().cyan());
    for tip in HEALTH_TIPS {
        println!("  {} {}", "•".cyan(), tip);
    }
    println!();
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_command() {
        assert!(is_command("/help"));
        assert!(is_command(" /help"));
        assert!(!is_command("help"));
        assert!(!is_command("bmi"));
    }

    #[test]
    fn test_parse_help() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/help"), Command::Help);
        assert_eq!(handler.parse("/h"), Command::Help);
    }

    #[test]
    fn test_parse_exit() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/exit"), Command::Exit);
        assert_eq!(handler.parse("/quit"), Command::Exit);
        assert_eq!(handler.parse("/q"), Command::Exit);
    }

    #[test]
    fn test_parse_menu_and_tips() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/menu"), Command::Menu);
        assert_eq!(handler.parse("/m"), Command::Menu);
        assert_eq!(handler.parse("/tips"), Command::Tips);
    }

    #[test]
    fn test_parse_verbose() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/verbose"), Command::Verbose { enable: true });
        assert_eq!(handler.parse("/verbose on"), Command::Verbose { enable: true });
        assert_eq!(handler.parse("/verbose off"), Command::Verbose { enable: false });
    }

    #[test]
    fn test_parse_unknown() {
        let handler = CommandHandler::new();
        match handler.parse("/unknown") {
            Command::Unknown { input } => assert!(input.contains("unknown")),
            _ => panic!("Expected Unknown command"),
        }
    }

    #[test]
    fn test_parse_clear() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/clear"), Command::Clear);
        assert_eq!(handler.parse("/CLS"), Command::Clear);
    }

    #[test]
    fn test_execute_exit() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        assert!(!handler.execute(Command::Exit, &mut session).unwrap());
    }

    #[test]
    fn test_execute_reset() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();
        session.record_render(Mode::Chatbot, false);

        handler.execute(Command::Reset, &mut session).unwrap();
        assert_eq!(session.render_count(), 0);
    }

    #[test]
    fn test_execute_verbose() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::new();

        handler.execute(Command::Verbose { enable: true }, &mut session).unwrap();
        assert!(handler.is_verbose());

        handler.execute(Command::Verbose { enable: false }, &mut session).unwrap();
        assert!(!handler.is_verbose());
    }
}
