// src/sanitizer/structural.rs

//! Anchor removal driven by a small tag scanner.
//!
//! The scanner reads each `<a ...>` start tag attribute by attribute, so it
//! accepts spacing the regex table does not (`id = "x"`, quoted values with
//! spaces) and reports an exact count. Everything it does not recognize is
//! copied through byte for byte.
//!
//! The scanner works on raw text and has no notion of comments, attribute
//! values or raw-text elements. An empty anchor inside `<!-- ... -->`, inside
//! a quoted attribute value or inside a script string is removed like any
//! other. Anchors embedded in script strings are exactly what generated pages
//! leave behind, so a tokenizer that skips raw text would miss them.

use super::Sanitizer;

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSanitizer;

impl Sanitizer for StructuralSanitizer {
    fn remove_empty_anchors(&self, text: &str) -> (String, usize) {
        let mut current = text.to_string();
        let mut total = 0;

        loop {
            let (next, removed) = remove_pass(&current);
            if removed == 0 {
                return (current, total);
            }
            tracing::trace!(removed, "structural pass removed anchors");
            total += removed;
            current = next;
        }
    }
}

/// One left-to-right scan. Anchors emptied by this pass are picked up by the
/// next one.
fn remove_pass(text: &str) -> (String, usize) {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    let mut removed = 0;

    while let Some(offset) = text[pos..].find('<') {
        let start = pos + offset;
        match empty_anchor_end(bytes, start) {
            Some(end) => {
                out.push_str(&text[copied..start]);
                copied = end;
                pos = end;
                removed += 1;
            }
            None => pos = start + 1,
        }
    }
    out.push_str(&text[copied..]);

    (out, removed)
}

/// Attributes seen on one anchor start tag.
#[derive(Debug, Default)]
struct AnchorAttrs {
    id: bool,
    href: bool,
}

impl AnchorAttrs {
    /// Returns `None` once the tag stops matching a recognized shape.
    fn record(&mut self, name: &[u8], value: Option<&[u8]>) -> Option<()> {
        if name.eq_ignore_ascii_case(b"id") && !self.id {
            self.id = true;
            Some(())
        } else if name.eq_ignore_ascii_case(b"href")
            && !self.href
            && value == Some(b"#".as_slice())
        {
            self.href = true;
            Some(())
        } else {
            None
        }
    }

    fn is_recognized(&self) -> bool {
        self.id || self.href
    }
}

/// If an empty anchor with a recognized shape starts at `start`, returns the
/// byte offset just past its closing tag.
fn empty_anchor_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if !bytes.get(i)?.eq_ignore_ascii_case(&b'a') {
        return None;
    }
    i += 1;

    let after_name = skip_ws(bytes, i);
    if after_name == i {
        return None;
    }
    i = after_name;

    let mut attrs = AnchorAttrs::default();
    loop {
        i = skip_ws(bytes, i);
        if *bytes.get(i)? == b'>' {
            i += 1;
            break;
        }
        let (name, value, next) = parse_attribute(bytes, i)?;
        attrs.record(name, value)?;
        i = next;
    }
    if !attrs.is_recognized() {
        return None;
    }

    i = skip_ws(bytes, i);
    if !bytes.get(i..i + 3)?.eq_ignore_ascii_case(b"</a") {
        return None;
    }
    i = skip_ws(bytes, i + 3);
    (*bytes.get(i)? == b'>').then_some(i + 1)
}

/// Parses `name`, `name=value`, `name="value"` or `name='value'` at `i`.
fn parse_attribute(bytes: &[u8], i: usize) -> Option<(&[u8], Option<&[u8]>, usize)> {
    let name_end = i + bytes[i..].iter().take_while(|&&b| is_name_byte(b)).count();
    if name_end == i {
        return None;
    }
    let name = &bytes[i..name_end];

    let eq = skip_ws(bytes, name_end);
    if bytes.get(eq) != Some(&b'=') {
        return Some((name, None, name_end));
    }

    let value_start = skip_ws(bytes, eq + 1);
    match *bytes.get(value_start)? {
        quote @ (b'"' | b'\'') => {
            let len = bytes[value_start + 1..].iter().position(|&b| b == quote)?;
            let value = &bytes[value_start + 1..value_start + 1 + len];
            Some((name, Some(value), value_start + len + 2))
        }
        _ => {
            let len = bytes[value_start..]
                .iter()
                .take_while(|&&b| !b.is_ascii_whitespace() && b != b'>')
                .count();
            if len == 0 {
                return None;
            }
            let value_end = value_start + len;
            Some((name, Some(&bytes[value_start..value_end]), value_end))
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'=' | b'>' | b'/' | b'<' | b'"' | b'\'')
}

fn skip_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes.get(i).is_some_and(u8::is_ascii_whitespace) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn end_of(html: &str) -> Option<usize> {
        empty_anchor_end(html.as_bytes(), 0)
    }

    #[test]
    fn recognizes_each_shape() {
        for html in [
            r##"<a id="x" href="#"></a>"##,
            r##"<a href='#' id='x'></a>"##,
            r#"<a id=x></a>"#,
            r##"<a href=#></a>"##,
            "<A ID=\"\"\n   HREF=\"#\" >\n  \n</A >",
        ] {
            assert_eq!(end_of(html), Some(html.len()), "{html}");
        }
    }

    #[test]
    fn rejects_other_anchors() {
        for html in [
            r##"<a href="#">text</a>"##,
            r##"<a href="#top"></a>"##,
            r##"<a class="x" href="#"></a>"##,
            r#"<a id="x" id="y"></a>"#,
            r#"<a></a>"#,
            r#"<abbr id="x"></abbr>"#,
            r#"<a id="x"/>"#,
            r#"<a id="x"></a"#,
        ] {
            assert_eq!(end_of(html), None, "{html}");
        }
    }

    #[test]
    fn spaced_attributes_are_parsed() {
        let html = r##"<a id = "two words" href = "#"></a>"##;
        assert_eq!(end_of(html), Some(html.len()));
    }

    #[test]
    fn pass_keeps_surrounding_text() {
        let (out, removed) = remove_pass("α<a id=x></a>β<b>γ</b>");
        assert_eq!(out, "αβ<b>γ</b>");
        assert_eq!(removed, 1);
    }

    #[test]
    fn anchors_in_comments_and_attributes_are_removed() {
        let (out, removed) =
            remove_pass(r#"<!-- <a id=x></a> --><p data-tpl="<a id=y></a>">k</p>"#);
        assert_eq!(out, r#"<!--  --><p data-tpl="">k</p>"#);
        assert_eq!(removed, 2);
    }
}
