//! JSON with comments
//!
//! Hand-edited settings files often carry `//` and `/* */` comments.
//! Comments are blanked out before the text reaches `serde_json`.

use std::borrow::Cow;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    Str,
    StrEscape,
    LineComment,
    BlockComment,
}

/// Remove comments outside of string literals
pub fn strip_comments(text: &str) -> Cow<'_, str> {
    if !text.contains('/') {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut scan = Scan::Code;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        scan = match (scan, c) {
            (Scan::Code, '"') => {
                out.push(c);
                Scan::Str
            }
            (Scan::Code, '/') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::LineComment
            }
            (Scan::Code, '/') if chars.peek() == Some(&'*') => {
                chars.next();
                Scan::BlockComment
            }
            (Scan::Str, '\\') => {
                out.push(c);
                Scan::StrEscape
            }
            (Scan::Str, '"') => {
                out.push(c);
                Scan::Code
            }
            (Scan::StrEscape, _) => {
                out.push(c);
                Scan::Str
            }
            (Scan::LineComment, '\n') => {
                out.push(c);
                Scan::Code
            }
            (Scan::LineComment, _) => Scan::LineComment,
            (Scan::BlockComment, '*') if chars.peek() == Some(&'/') => {
                chars.next();
                Scan::Code
            }
            (Scan::BlockComment, _) => Scan::BlockComment,
            (state, _) => {
                out.push(c);
                state
            }
        };
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_strip_comments() {
        let text = r#"{
            // which tools may run
            "permissions": { "allow": ["Bash(npm run test:*)"] }, /* trailing */
            "verbose": true
        }"#;

        let value: Value = serde_json::from_str(&strip_comments(text)).unwrap();
        assert_eq!(value["permissions"]["allow"][0], "Bash(npm run test:*)");
        assert_eq!(value["verbose"], true);
    }

    #[test]
    fn test_slashes_inside_strings_survive() {
        let text = r#"{"apiKeyHelper": "/bin/get-key // not a comment", "q": "say \"/*hi*/\""}"#;
        let value: Value = serde_json::from_str(&strip_comments(text)).unwrap();
        assert_eq!(value["apiKeyHelper"], "/bin/get-key // not a comment");
        assert_eq!(value["q"], "say \"/*hi*/\"");
    }

    #[test]
    fn test_plain_json_borrowed() {
        assert!(matches!(strip_comments("{\"a\": 1}"), Cow::Borrowed(_)));
    }
}
