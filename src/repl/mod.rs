//! REPL (Read-Eval-Print Loop) module for the interactive dashboard
//!
//! Each line is either a slash command or a widget selection. A selection
//! triggers exactly one widget render; nothing carries over between them.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::dashboard::{Dashboard, Prompter};
use crate::mode::Mode;
use crate::repl::commands::{is_command, show_menu, show_tips, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::InputHandler;
pub use crate::repl::session::SessionManager;

/// What the loop should do after one line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplAction {
    Continue,
    Render(Mode),
    Exit,
}

/// REPL session coordinator
///
/// Manages the interactive loop with:
/// - Input handling (rustyline)
/// - Command processing
/// - Session statistics
/// - Display coordination
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
}

impl ReplSession {
    /// Create new REPL session
    pub fn new() -> Result<Self> {
        Ok(ReplSession {
            input_handler: InputHandler::new()?,
            command_handler: CommandHandler::new(),
            session_manager: SessionManager::new(),
            display_manager: DisplayManager::new(),
        })
    }

    /// Show welcome banner, menu and tips
    pub fn show_welcome(&self, version: &str, chat_ready: bool) {
        self.display_manager.show_banner(version, chat_ready);
        show_menu();
        show_tips();
    }

    /// Read a line of input from user
    pub fn read_input(&mut self) -> Result<Option<String>> {
        self.input_handler.read_line()
    }

    /// Interpret one line of input
    pub fn handle_input(&mut self, input: &str) -> Result<ReplAction> {
        // Skip empty input
        if input.trim().is_empty() {
            return Ok(ReplAction::Continue);
        }

        if is_command(input) {
            let command = self.command_handler.parse(input);
            let keep_going = self.command_handler.execute(command, &mut self.session_manager)?;
            return Ok(if keep_going { ReplAction::Continue } else { ReplAction::Exit });
        }

        match Mode::parse(input) {
            Some(mode) => Ok(ReplAction::Render(mode)),
            None => {
                self.display_manager.show_error(&format!("Unknown selection: {}", input.trim()));
                println!("Pick 1-6, a widget name, or {} to list them", "/menu".cyan());
                Ok(ReplAction::Continue)
            }
        }
    }

    /// Render one widget and record it
    pub async fn render(&mut self, dashboard: &Dashboard, mode: Mode) {
        let busy = format!("Loading {}...", mode.label());
        if !mode.prompts_user() {
            self.display_manager.start_spinner(&busy);
        }

        let started = Instant::now();
        let mut prompter = SpinnerPrompter {
            inner: &mut self.input_handler,
            display: &mut self.display_manager,
            message: &busy,
        };
        let panel = dashboard.render(mode, &mut prompter).await;
        self.session_manager.record_render(mode, panel.has_error());
        self.display_manager.show_panel(&panel);
        self.display_manager.show_debug(
            &format!("{} rendered in {}ms", mode.alias(), started.elapsed().as_millis()),
            self.command_handler.is_verbose(),
        );
    }

    /// Main loop; returns on /exit or EOF
    pub async fn run(&mut self, dashboard: &Dashboard) -> Result<()> {
        loop {
            match self.read_input() {
                Ok(Some(input)) => match self.handle_input(&input) {
                    Ok(ReplAction::Continue) => {}
                    Ok(ReplAction::Render(mode)) => self.render(dashboard, mode).await,
                    Ok(ReplAction::Exit) => break,
                    Err(e) => self.display_manager.show_error(&e.to_string()),
                },
                Ok(None) => {
                    // EOF (Ctrl-D) - exit gracefully
                    self.display_manager.show_info(&format!(
                        "Session ended after {} widget(s)",
                        self.session_manager.render_count()
                    ));
                    break;
                }
                Err(e) => {
                    if e.to_string().contains("Interrupted") {
                        println!("\nUse /exit to quit gracefully");
                        continue;
                    }
                    return Err(e);
                }
            }
        }
        Ok(())
    }

    /// Get session statistics
    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.command_handler.is_verbose()
    }

    /// Set verbose mode
    pub fn set_verbose(&mut self, enable: bool) {
        self.command_handler.set_verbose(enable);
    }
}

/// Prompter that spins while the widget works on an answer
struct SpinnerPrompter<'a, P: Prompter> {
    inner: &'a mut P,
    display: &'a mut DisplayManager,
    message: &'a str,
}

impl<P: Prompter> Prompter for SpinnerPrompter<'_, P> {
    fn ask(&mut self, prompt: &str) -> crate::errors::Result<Option<String>> {
        self.display.finish_current();
        let answer = self.inner.ask(prompt)?;
        if answer.is_some() {
            self.display.start_spinner(self.message);
        }
        Ok(answer)
    }
}
