//! Go syntax helpers: identifiers, string literals, struct tags and comments.

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Check that `s` is a Go identifier and not a keyword.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let starts_well = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    starts_well && chars.all(|c| c.is_alphanumeric() || c == '_') && !KEYWORDS.contains(&s)
}

/// Render `s` as an interpreted Go string literal.
pub fn string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escape a value placed between the quotes of a `key:"value"` tag pair.
pub fn tag_value(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a struct tag literal.
///
/// Tags are raw strings unless the content holds a backtick, which a raw
/// string cannot contain.
pub fn tag_literal(tag: &str) -> String {
    if tag.contains('`') || tag.contains('\n') || tag.contains('\r') {
        string_literal(tag)
    } else {
        format!("`{}`", tag)
    }
}

/// Flatten free text so it fits on a single `//` comment line.
pub fn comment_text(s: &str) -> String {
    s.split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("models"));
        assert!(is_identifier("dao_v2"));
        assert!(is_identifier("_internal"));
        assert!(!is_identifier("my-pkg"));
        assert!(!is_identifier("2models"));
        assert!(!is_identifier("type"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("t_order"), "\"t_order\"");
        assert_eq!(string_literal("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(string_literal("a\nb"), "\"a\\nb\"");
    }

    #[test]
    fn test_tag_value() {
        assert_eq!(tag_value("enum('a','b')"), "enum('a','b')");
        assert_eq!(tag_value("say \"hi\""), "say \\\"hi\\\"");
    }

    #[test]
    fn test_tag_literal() {
        assert_eq!(tag_literal("json:\"id\""), "`json:\"id\"`");
        assert_eq!(tag_literal("json:\"a`b\""), "\"json:\\\"a`b\\\"\"");
    }

    #[test]
    fn test_comment_text() {
        assert_eq!(comment_text("line one\r\n  line two\n"), "line one line two");
        assert_eq!(comment_text(""), "");
    }
}
