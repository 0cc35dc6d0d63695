//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips styles when stdout is not a
//! terminal.

use owo_colors::{OwoColorize, Style, Styled};
use std::fmt::Display;

/// Check mark glyph
pub const CHECK: &str = "✓";

/// Cross glyph
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize: Display + Sized {
    /// De-emphasized secondary text
    fn muted(&self) -> Styled<&Self> {
        self.style(Style::new().dimmed())
    }

    /// Headings and labels
    fn emphasis(&self) -> Styled<&Self> {
        self.style(Style::new().bold())
    }

    /// Names and counts
    fn accent(&self) -> Styled<&Self> {
        self.style(Style::new().cyan())
    }

    /// Positive outcome
    fn success(&self) -> Styled<&Self> {
        self.style(Style::new().green())
    }

    /// Negative outcome
    fn error(&self) -> Styled<&Self> {
        self.style(Style::new().red().bold())
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success().to_string()
}

/// Red cross
pub fn cross() -> String {
    CROSS.error().to_string()
}
