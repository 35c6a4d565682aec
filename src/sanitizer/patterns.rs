// src/sanitizer/patterns.rs

//! Process-wide pattern tables, compiled once on first use.

use std::sync::LazyLock;

use regex::Regex;

/// Empty anchor shapes, applied in order.
///
/// Attribute values may be quoted with `"`, `'`, or not at all. `\s` covers
/// newlines, so anchors split across lines match too.
pub static EMPTY_ANCHOR_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // id then href="#"
        r#"(?i)<a\s+id=['"]?[^\s>]*['"]?\s+href=['"]?#['"]?\s*>\s*</a\s*>"#,
        // href="#" then id
        r#"(?i)<a\s+href=['"]?#['"]?\s+id=['"]?[^\s>]*['"]?\s*>\s*</a\s*>"#,
        // id only
        r#"(?i)<a\s+id=['"]?[^\s>]*['"]?\s*>\s*</a\s*>"#,
        // href="#" only
        r#"(?i)<a\s+href=['"]?#['"]?\s*>\s*</a\s*>"#,
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Tag fragments inside script content that could end or open an element.
pub static TAG_NEUTRALIZERS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)<\s*/\s*script", "&lt;/script"),
        (r"(?i)<\s*script", "&lt;script"),
        (r"(?i)<\s*/\s*iframe", "&lt;/iframe"),
        (r"(?i)<\s*iframe", "&lt;iframe"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("valid regex"), replacement))
    .collect()
});

/// Inline event handler with a quoted value, e.g. `onclick="..."`.
pub static EVENT_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bon\w+\s*=\s*["'][^"']*["']"#).expect("valid regex")
});

pub static JAVASCRIPT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript\s*:").expect("valid regex"));

pub const DISABLED_PREFIX: &str = "disabled-";
pub const DISABLED_JAVASCRIPT: &str = "disabled-javascript:";
