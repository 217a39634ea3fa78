// src/util/string.rs
//! Text cleanup for strings that reach the terminal.

/// Columns a tab expands to.
const TAB_WIDTH: usize = 4;

pub struct StringUtils {}

impl StringUtils {
    /// Drops control characters so untrusted text cannot drive the terminal
    /// (escape sequences, bells, carriage returns). Newlines are kept and
    /// tabs become spaces.
    pub fn strip_control_chars(text: &str) -> String {
        let mut clean = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '\n' => clean.push('\n'),
                '\t' => clean.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
                ch if ch.is_control() => {}
                ch => clean.push(ch),
            }
        }
        clean
    }

    pub fn has_control_chars(text: &str) -> bool {
        text.chars().any(char::is_control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_sequences_are_removed() {
        let clean = StringUtils::strip_control_chars("safe \x1b]0;pwned\x07 \x1b[2J text");
        assert_eq!(clean, "safe ]0;pwned [2J text");
        assert!(!StringUtils::has_control_chars(&clean));
    }

    #[test]
    fn test_newlines_kept_and_tabs_expanded() {
        assert_eq!(StringUtils::strip_control_chars("a\tb\r\nc\u{9b}"), "a    b\nc");
    }

    #[test]
    fn test_plain_text_unchanged() {
        let text = "Hello, سلام, 你好 🙂";
        assert_eq!(StringUtils::strip_control_chars(text), text);
    }
}
