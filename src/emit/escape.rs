//! Escaping rules for interpolated descriptor text, one function per
//! target syntax.
//!
//! CSS string escaping and script string escaping are deliberately
//! separate functions: the two syntaxes disagree on which quote style is
//! canonical, and collapsing them into one shared rewrite is exactly how
//! the corruption the repair pass cleans up was produced in the first
//! place.

/// Escape text for interpolation into HTML element content or a
/// double-quoted attribute value.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for embedding inside a single-quoted JavaScript string
/// literal (`'...'`).
pub fn escape_js_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for embedding inside a JavaScript template literal
/// (`` `...` ``), which must not terminate the literal or open an
/// interpolation.
pub fn escape_js_template(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for embedding inside a single-quoted CSS string
/// (`content: '...'`).
pub fn escape_css_single_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for embedding inside a double-quoted Python string
/// literal (`"..."`).
pub fn escape_py_double_quoted(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"A <b> & "c" > d"#),
            "A &lt;b&gt; &amp; &quot;c&quot; &gt; d"
        );
    }

    #[test]
    fn html_leaves_plain_text_alone() {
        assert_eq!(escape_html("Care Gap Closure Agent"), "Care Gap Closure Agent");
    }

    #[test]
    fn js_single_quoted_escapes_apostrophe_and_backslash() {
        assert_eq!(escape_js_single_quoted(r"it's a \ test"), r"it\'s a \\ test");
    }

    #[test]
    fn js_single_quoted_escapes_newlines() {
        assert_eq!(escape_js_single_quoted("a\nb"), r"a\nb");
    }

    #[test]
    fn js_template_escapes_backtick_and_interpolation() {
        assert_eq!(escape_js_template("a `b` ${c}"), r"a \`b\` \${c}");
    }

    #[test]
    fn js_template_leaves_bare_dollar_alone() {
        assert_eq!(escape_js_template("$5 off"), "$5 off");
    }

    #[test]
    fn css_single_quoted_escapes_quote() {
        assert_eq!(escape_css_single_quoted("it's"), r"it\'s");
    }

    #[test]
    fn css_and_js_rules_are_independent() {
        // The CSS rule must not touch backticks and the template rule must
        // not touch apostrophes; one shared rewrite would conflate them.
        assert_eq!(escape_css_single_quoted("a`b"), "a`b");
        assert_eq!(escape_js_template("it's"), "it's");
    }

    #[test]
    fn py_double_quoted_escapes_quote() {
        assert_eq!(
            escape_py_double_quoted(r#"the "best" agent"#),
            r#"the \"best\" agent"#
        );
    }
}
