// src/sanitizer/script.rs

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str, text};
use regex::Captures;
use tracing::warn;

use super::patterns::{
    DISABLED_JAVASCRIPT, DISABLED_PREFIX, EVENT_HANDLER, JAVASCRIPT_URL, TAG_NEUTRALIZERS,
};
use crate::utils::html::{escape_text, unescape_entities};

/// Sanitize the text content of one script block.
///
/// Steps, in order:
/// 1. Escape the `<` of `<script`, `</script`, `<iframe`, `</iframe`.
/// 2. Drop quoted `on*=` handlers and rewrite `javascript:` to
///    `disabled-javascript:`.
/// 3. Decode existing entities once, repeat step 2 on the decoded text.
/// 4. Escape `&`, `<`, `>` once.
///
/// Step 1 must see raw text: its patterns do not match entity-encoded tags.
/// Step 3 is what prevents `&amp;` from becoming `&amp;amp;` on a second run.
pub fn sanitize_script_content(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut text = content.to_string();
    for (pattern, replacement) in TAG_NEUTRALIZERS.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    let text = scrub_active_content(&text);

    let decoded = unescape_entities(&text);
    // Decoding can expose handlers that were hidden behind `&quot;`.
    let decoded = scrub_active_content(&decoded);

    escape_text(&decoded).into_owned()
}

/// Removes event handlers and disables `javascript:` URLs until neither
/// pattern matches anymore.
fn scrub_active_content(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let without_handlers = EVENT_HANDLER.replace_all(&current, "");
        let next = disable_javascript_urls(&without_handlers);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Rewrites each `javascript:` scheme to `disabled-javascript:`, leaving
/// occurrences that already carry the prefix alone.
fn disable_javascript_urls(text: &str) -> String {
    JAVASCRIPT_URL
        .replace_all(text, |caps: &Captures<'_>| {
            let start = caps.get(0).map_or(0, |m| m.start());
            if is_disabled_at(text, start) {
                caps[0].to_string()
            } else {
                DISABLED_JAVASCRIPT.to_string()
            }
        })
        .into_owned()
}

fn is_disabled_at(text: &str, start: usize) -> bool {
    let Some(prefix_start) = start.checked_sub(DISABLED_PREFIX.len()) else {
        return false;
    };
    text.get(prefix_start..start)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(DISABLED_PREFIX))
}

/// Rebuilds `text` with `f` applied to the content of every script element.
///
/// Script elements are found by an HTML tokenizer, so a `<script` inside a
/// comment, an attribute value or another raw-text element is not an
/// element. Tags and everything outside script elements are copied through
/// byte for byte. If the rewriter fails, `text` is returned unchanged.
pub fn map_script_blocks<F>(text: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    // Script text may arrive in several chunks; only the last one is kept
    // and replaced with the mapped content.
    let mut content = String::new();

    let rewritten = rewrite_str(
        text,
        RewriteStrSettings {
            element_content_handlers: vec![text!("script", |chunk| {
                content.push_str(chunk.as_str());
                if chunk.last_in_text_node() {
                    let mapped = f(&content);
                    chunk.replace(&mapped, ContentType::Html);
                    content.clear();
                } else {
                    chunk.remove();
                }
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );

    match rewritten {
        Ok(rewritten) => rewritten,
        Err(e) => {
            warn!("Leaving script blocks untouched: {}", e);
            text.to_string()
        }
    }
}

/// Number of script elements in `text`, as the tokenizer sees them.
pub fn count_script_blocks(text: &str) -> usize {
    let mut count = 0;

    let counted = rewrite_str(
        text,
        RewriteStrSettings {
            element_content_handlers: vec![element!("script", |_el| {
                count += 1;
                Ok(())
            })],
            ..RewriteStrSettings::new()
        },
    );
    if let Err(e) = counted {
        warn!("Script count may be incomplete: {}", e);
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_prefix_is_detected() {
        let text = "x disabled-javascript:y";
        let start = text.find("javascript").unwrap();
        assert!(is_disabled_at(text, start));
        assert!(!is_disabled_at("javascript:", 0));
    }

    #[test]
    fn handler_hidden_behind_entities_is_removed() {
        let out = sanitize_script_content("<b onclick=&quot;go()&quot;>");
        assert!(!out.contains("onclick"));
        assert_eq!(out, "&lt;b &gt;");
    }

    #[test]
    fn nested_handler_removal_converges() {
        // Dropping the inner handler leaves `onfoo ="b"` behind.
        let out = sanitize_script_content(r#"onfoo onclick="a"="b" x"#);
        assert!(!out.contains("onfoo"));
        assert_eq!(out, " x");
    }

    #[test]
    fn script_blocks_are_counted() {
        assert_eq!(count_script_blocks("<script></script><SCRIPT src=x></SCRIPT >"), 2);
    }

    #[test]
    fn script_openers_outside_elements_are_not_counted() {
        let text = r#"<!-- <script> --><p title="<script>">x</p><script>y()</script>"#;
        assert_eq!(count_script_blocks(text), 1);
    }

    #[test]
    fn mapping_sees_whole_script_content() {
        let mut seen = Vec::new();
        let out = map_script_blocks("a<script>one</script>b<script>two</script>c", |content| {
            seen.push(content.to_string());
            content.to_uppercase()
        });

        assert_eq!(seen, vec!["one", "two"]);
        assert_eq!(out, "a<script>ONE</script>b<script>TWO</script>c");
    }

    #[test]
    fn script_end_is_the_first_closing_tag() {
        let out = map_script_blocks("<script>a<script>b</script>c</script>", |content| {
            format!("[{content}]")
        });

        assert_eq!(out, "<script>[a<script>b]</script>c</script>");
    }
}
