// src/sanitizer/mod.rs

//! Empty-anchor removal and script-content sanitization.
//!
//! Both strategies share one capability interface, [`Sanitizer`]. They differ
//! only in how empty anchors are found; script blocks are always handled by
//! [`script::sanitize_script_content`].

pub mod pattern;
pub mod patterns;
pub mod script;
pub mod structural;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

pub use pattern::PatternSanitizer;
pub use structural::StructuralSanitizer;

/// Output of a full cleaning pass over one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    /// Number of empty anchor elements removed.
    pub removed: usize,
}

pub trait Sanitizer {
    /// Removes every empty anchor with a recognized id/href shape.
    ///
    /// Runs until no further anchor can be removed, so an anchor emptied by
    /// an inner removal goes in the same call.
    fn remove_empty_anchors(&self, text: &str) -> (String, usize);

    /// Neutralizes the text content of a single script block.
    fn sanitize_script_content(&self, content: &str) -> String {
        script::sanitize_script_content(content)
    }

    /// Removes empty anchors, then sanitizes the content of every script block.
    fn clean(&self, text: &str) -> Cleaned {
        let (without_anchors, removed) = self.remove_empty_anchors(text);
        let text = script::map_script_blocks(&without_anchors, |content| {
            self.sanitize_script_content(content)
        });
        Cleaned { text, removed }
    }
}

/// Selects the anchor-removal implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Tag scanner that reads attributes and content structurally.
    #[default]
    Structural,
    /// Static regular-expression table.
    Pattern,
}

impl Strategy {
    pub fn sanitizer(self) -> &'static dyn Sanitizer {
        match self {
            Self::Structural => &StructuralSanitizer,
            Self::Pattern => &PatternSanitizer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structural" | "parser" => Ok(Self::Structural),
            "pattern" | "regex" => Ok(Self::Pattern),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Cleans `text` with the default strategy.
pub fn clean(text: &str) -> Cleaned {
    Strategy::default().sanitizer().clean(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_parses_aliases() {
        assert_eq!("Parser".parse::<Strategy>(), Ok(Strategy::Structural));
        assert_eq!(" regex ".parse::<Strategy>(), Ok(Strategy::Pattern));
        assert!("soup".parse::<Strategy>().is_err());
    }

    #[test]
    fn clean_touches_only_script_content() {
        let input = "<p>a & b</p><script type=\"text/javascript\">if (a < b) {}</script>";
        let cleaned = clean(input);
        assert_eq!(
            cleaned.text,
            "<p>a & b</p><script type=\"text/javascript\">if (a &lt; b) {}</script>"
        );
        assert_eq!(cleaned.removed, 0);
    }
}
