//! Record metadata keys and the rules the editor applies to them.
//!
//! The editor panel binds two fields to every record: the hook name (free
//! text, sanitized like any other text field) and the priority (an integer
//! that falls back to [`DEFAULT_PRIORITY`]).

/// Metadata key holding the target hook name.
pub const HOOK_META_KEY: &str = "_hookblocks_hook";

/// Metadata key holding the hook priority.
pub const PRIORITY_META_KEY: &str = "_hookblocks_priority";

/// Priority used when none is given.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Longest hook name accepted by the registrar.
pub const MAX_HOOK_NAME_LEN: usize = 191;

/// Sanitize a hook name the way plain text fields are sanitized.
///
/// Tags and percent-encoded octets are removed, line breaks and tabs become
/// spaces, runs of whitespace collapse to one space, and the result is
/// trimmed.
pub fn sanitize_hook_name(input: &str) -> String {
    let mut stripped = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '<' => {
                // A lone '<' followed by whitespace or end of input is text.
                match chars.peek() {
                    Some(next) if !next.is_whitespace() => {
                        for inner in chars.by_ref() {
                            if inner == '>' {
                                break;
                            }
                        }
                    }
                    _ => stripped.push('<'),
                }
            }
            '%' => {
                let mut lookahead = chars.clone();
                let hex = matches!(
                    (lookahead.next(), lookahead.next()),
                    (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit()
                );
                if hex {
                    chars.next();
                    chars.next();
                } else {
                    stripped.push('%');
                }
            }
            '\r' | '\n' | '\t' => stripped.push(' '),
            c if c.is_control() => {}
            c => stripped.push(c),
        }
    }

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a priority as typed into the editor.
///
/// Unparsable, empty, and zero input all yield [`DEFAULT_PRIORITY`].
/// Leading digits are honoured (`"15px"` is 15), like an integer parse of
/// user text would.
pub fn parse_priority(input: &str) -> i32 {
    let trimmed = input.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();

    match leading.parse::<i32>() {
        Ok(0) | Err(_) => DEFAULT_PRIORITY,
        Ok(value) => sign * value,
    }
}

/// Whether a sanitized hook name can be registered.
pub fn is_valid_hook_name(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= MAX_HOOK_NAME_LEN
        && !name.chars().any(|c| c.is_whitespace() || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_tags_and_whitespace() {
        assert_eq!(sanitize_hook_name("  wp_footer \n"), "wp_footer");
        assert_eq!(sanitize_hook_name("<b>wp_head</b>"), "wp_head");
        assert_eq!(sanitize_hook_name("a\tb   c"), "a b c");
        assert_eq!(sanitize_hook_name("wp%20footer"), "wpfooter");
        assert_eq!(sanitize_hook_name("a < b"), "a < b");
        assert_eq!(sanitize_hook_name(""), "");
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!(parse_priority("20"), 20);
        assert_eq!(parse_priority(" 5 "), 5);
        assert_eq!(parse_priority("-3"), -3);
        assert_eq!(parse_priority("15px"), 15);
        assert_eq!(parse_priority(""), DEFAULT_PRIORITY);
        assert_eq!(parse_priority("abc"), DEFAULT_PRIORITY);
        assert_eq!(parse_priority("0"), DEFAULT_PRIORITY);
    }

    #[test]
    fn test_valid_hook_names() {
        assert!(is_valid_hook_name("wp_footer"));
        assert!(is_valid_hook_name("woocommerce/after-cart"));
        assert!(!is_valid_hook_name(""));
        assert!(!is_valid_hook_name("two words"));
        assert!(!is_valid_hook_name(&"x".repeat(MAX_HOOK_NAME_LEN + 1)));
    }

    #[test]
    fn test_hook_name_limit_counts_characters() {
        let accented = "é".repeat(MAX_HOOK_NAME_LEN);
        assert!(accented.len() > MAX_HOOK_NAME_LEN);
        assert!(is_valid_hook_name(&accented));
        assert!(!is_valid_hook_name(&"é".repeat(MAX_HOOK_NAME_LEN + 1)));
    }
}
