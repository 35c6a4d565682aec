use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ScrubError;
use crate::sanitizer::Strategy;

/// Result of cleaning one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub path: PathBuf,
    /// Empty anchors removed (or that would be removed in a dry run).
    pub removed: usize,
    /// Script elements whose content went through the sanitizer.
    pub scripts: usize,
    /// Whether the cleaned text differs from what was read.
    pub modified: bool,
}

/// Totals for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub strategy: Strategy,
    pub dry_run: bool,
    pub total_files: usize,
    pub modified_files: usize,
    pub removed_anchors: usize,
    pub errors: usize,
    pub files: Vec<FileOutcome>,
}

impl Summary {
    pub fn new(strategy: Strategy, dry_run: bool) -> Self {
        Self {
            strategy,
            dry_run,
            total_files: 0,
            modified_files: 0,
            removed_anchors: 0,
            errors: 0,
            files: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: FileOutcome) {
        self.total_files += 1;
        if outcome.modified {
            self.modified_files += 1;
        }
        self.removed_anchors += outcome.removed;
        self.files.push(outcome);
    }

    /// Counts a file that could not be processed.
    pub fn record_error(&mut self) {
        self.total_files += 1;
        self.errors += 1;
    }

    /// Counts a directory entry that could not be read during the walk.
    pub fn record_walk_error(&mut self) {
        self.errors += 1;
    }

    pub fn to_json(&self) -> Result<String, ScrubError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modified_label = if self.dry_run {
            "Files that would be modified"
        } else {
            "Files modified"
        };

        writeln!(f, "Processing Summary ({} strategy):", self.strategy)?;
        writeln!(f, "Total files processed: {}", self.total_files)?;
        writeln!(f, "{modified_label}: {}", self.modified_files)?;
        writeln!(f, "Total empty anchor tags removed: {}", self.removed_anchors)?;
        writeln!(f, "Errors encountered: {}", self.errors)?;

        if self.modified_files > 0 {
            if self.dry_run {
                write!(f, "\nDry run: no files were written.")
            } else {
                write!(f, "\nEmpty anchor tags successfully removed from HTML files.")
            }
        } else {
            write!(f, "\nNo empty anchor tags found or all files were already clean.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(name: &str, removed: usize, modified: bool) -> FileOutcome {
        FileOutcome {
            path: PathBuf::from(name),
            removed,
            scripts: 0,
            modified,
        }
    }

    #[test]
    fn record_accumulates_totals() {
        let mut summary = Summary::new(Strategy::Pattern, false);
        summary.record(outcome("a.html", 3, true));
        summary.record(outcome("b.html", 0, false));
        summary.record_error();

        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.modified_files, 1);
        assert_eq!(summary.removed_anchors, 3);
        assert_eq!(summary.errors, 1);
    }

    #[test]
    fn display_reports_dry_run() {
        let mut summary = Summary::new(Strategy::Structural, true);
        summary.record(outcome("a.html", 1, true));

        let text = summary.to_string();
        assert!(text.contains("Files that would be modified: 1"));
        assert!(text.contains("Dry run: no files were written."));
    }

    #[test]
    fn json_uses_lowercase_strategy() {
        let summary = Summary::new(Strategy::Pattern, false);
        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["strategy"], "pattern");
        assert_eq!(json["total_files"], 0);
    }
}
