//! In-memory session statistics
//!
//! Counts renders per mode for `/status`. Nothing here is persisted and
//! no widget reads it; each render stays independent.

use std::collections::HashMap;
use std::time::Instant;

use crate::mode::Mode;

/// Per-session render counters
pub struct SessionManager {
    /// Renders per mode
    renders: HashMap<Mode, usize>,

    /// Renders whose panel carried an error line
    failed_renders: usize,

    /// Session start time
    session_start: Instant,
}

impl SessionManager {
    pub fn new() -> Self {
        SessionManager {
            renders: HashMap::new(),
            failed_renders: 0,
            session_start: Instant::now(),
        }
    }

    /// Record one completed render
    pub fn record_render(&mut self, mode: Mode, had_error: bool) {
        *self.renders.entry(mode).or_insert(0) += 1;
        if had_error {
            self.failed_renders += 1;
        }
    }

    pub fn render_count(&self) -> usize {
        self.renders.values().sum()
    }

    pub fn renders_for(&self, mode: Mode) -> usize {
        self.renders.get(&mode).copied().unwrap_or(0)
    }

    pub fn failed_renders(&self) -> usize {
        self.failed_renders
    }

    /// Session duration in seconds
    pub fn session_duration(&self) -> u64 {
        self.session_start.elapsed().as_secs()
    }

    /// Clear counters
    pub fn reset(&mut self) {
        self.renders.clear();
        self.failed_renders = 0;
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
