//! Input handler for REPL using rustyline
//!
//! Line editing with in-memory history; also answers widget prompts.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;

use crate::dashboard::Prompter;
use crate::errors::DashboardError;

/// Default menu prompt
pub const MENU_PROMPT: &str = ">medisense: ";

/// Input handler managing the readline interface
pub struct InputHandler {
    editor: DefaultEditor,
    prompt: String,
}

impl InputHandler {
    /// Create new input handler
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()?;

        Ok(InputHandler {
            editor,
            prompt: MENU_PROMPT.to_string(),
        })
    }

    /// Set custom prompt
    pub fn set_prompt(&mut self, prompt: String) {
        self.prompt = prompt;
    }

    /// Read a line at the menu prompt
    ///
    /// Returns:
    /// - Ok(Some(input)) for normal input
    /// - Ok(None) for EOF (Ctrl-D)
    /// - Err on interrupt (Ctrl-C) or other errors
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let prompt = self.prompt.clone();
        self.read_with_prompt(&prompt)
    }

    fn read_with_prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                // Skip empty lines
                if trimmed.is_empty() {
                    return Ok(Some(String::new()));
                }

                let _ = self.editor.add_history_entry(trimmed);
                Ok(Some(trimmed.to_string()))
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C pressed
                Err(anyhow::anyhow!("Interrupted"))
            }
            Err(ReadlineError::Eof) => {
                // Ctrl-D pressed
                Ok(None)
            }
            Err(err) => {
                Err(anyhow::anyhow!("Readline error: {}", err))
            }
        }
    }

    /// Clear input history
    pub fn clear_history(&mut self) {
        let _ = self.editor.history_mut().clear();
    }

    /// Get history size
    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}

impl Prompter for InputHandler {
    fn ask(&mut self, prompt: &str) -> crate::errors::Result<Option<String>> {
        self.read_with_prompt(&format!("{} ", prompt))
            .map_err(|e| DashboardError::InvalidInput(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_handler_creation() {
        let handler = InputHandler::new();
        assert!(handler.is_ok());
    }

    #[test]
    fn test_custom_prompt() {
        let mut handler = InputHandler::new().unwrap();
        handler.set_prompt("test> ".to_string());
        assert_eq!(handler.prompt, "test> ");
    }

    #[test]
    fn test_default_prompt() {
        let handler = InputHandler::new().unwrap();
        assert_eq!(handler.prompt, MENU_PROMPT);
    }

    #[test]
    fn test_clear_history() {
        let mut handler = InputHandler::new().unwrap();
        let _ = handler.editor.add_history_entry("bmi");
        assert_eq!(handler.history_len(), 1);

        handler.clear_history();
        assert_eq!(handler.history_len(), 0);
    }
}
