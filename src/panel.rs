//! Render output of one widget
//!
//! Widgets never print; they return a `Panel` that the display manager
//! draws. That keeps handlers testable without capturing stdout.

/// Severity/shape of a single panel line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelItem {
    Text(String),
    Success(String),
    Warning(String),
    Error(String),
    /// Red result line that is not a failure (e.g. an obese BMI band)
    Alert(String),
    Bullet(String),
    /// Pre-formatted block (charts), printed verbatim
    Preformatted(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub title: String,
    pub items: Vec<PanelItem>,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn text(&mut self, s: impl Into<String>) -> &mut Self {
        self.items.push(PanelItem::Text(s.into()));
        self
    }

    pub fn success(&mut self, s: impl Into<String>) -> &mut Self {
        self.items.push(PanelItem::Success(s.into()));
        self
    }

    pub fn warning(&mut self, s: impl Into<String>) -> &mut Self {
        self.items.push(PanelItem::Warning(s.into()));
        self
    }

    pub fn error(&mut self, s: impl Into<String>) -> &mut Self {
        self.items.push(PanelItem::Error(s.into()));
        self
    }

    pub fn alert(&mut self, s: impl Into<String>) -> &mut Self {
        self.items.push(PanelItem::Alert(s.into()));
        self
    }

    pub fn bullet(&mut self, s: impl Into<String>) -> &mut Self {
        self.items.push(PanelItem::Bullet(s.into()));
        self
    }

    pub fn preformatted(&mut self, lines: Vec<String>) -> &mut Self {
        self.items.push(PanelItem::Preformatted(lines));
        self
    }

    /// Whether the widget failed; alerts do not count
    pub fn has_error(&self) -> bool {
        self.items.iter().any(|i| matches!(i, PanelItem::Error(_)))
    }

    /// All error lines, in order
    pub fn errors(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter_map(|i| match i {
                PanelItem::Error(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// True if any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|item| match item {
            PanelItem::Text(s)
            | PanelItem::Success(s)
            | PanelItem::Warning(s)
            | PanelItem::Error(s)
            | PanelItem::Alert(s)
            | PanelItem::Bullet(s) => s.contains(needle),
            PanelItem::Preformatted(lines) => lines.iter().any(|l| l.contains(needle)),
        })
    }
}
