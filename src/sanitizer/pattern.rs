// src/sanitizer/pattern.rs

use super::Sanitizer;
use super::patterns::EMPTY_ANCHOR_PATTERNS;

/// Regex-only anchor removal over the static pattern table.
///
/// Needs no tag scanning at all; the count is the number of matches replaced
/// across every pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternSanitizer;

impl Sanitizer for PatternSanitizer {
    fn remove_empty_anchors(&self, text: &str) -> (String, usize) {
        let mut current = text.to_string();
        let mut total = 0;

        loop {
            let mut removed = 0;
            for pattern in EMPTY_ANCHOR_PATTERNS.iter() {
                let matches = pattern.find_iter(&current).count();
                if matches > 0 {
                    current = pattern.replace_all(&current, "").into_owned();
                    removed += matches;
                }
            }
            if removed == 0 {
                return (current, total);
            }
            tracing::trace!(removed, "pattern pass removed anchors");
            total += removed;
        }
    }
}
