use std::borrow::Cow;

/// Decode every HTML character reference (named, decimal, hex) exactly once,
/// following the HTML5 rules for text content.
///
/// `&amp;lt;` decodes to `&lt;`, not `<`. Legacy references without a
/// trailing semicolon (`&amp`, `&lt`, `&#60`) decode too.
pub fn unescape_entities(input: &str) -> Cow<'_, str> {
    htmlize::unescape(input)
}

/// Escape `&`, `<` and `>`. Quotes are left alone.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    html_escape::encode_text(input)
}
