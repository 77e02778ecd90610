//! String helpers for log lines and error excerpts.

/// Truncate a string to at most `max_len` bytes, appending `...` when cut.
///
/// The cut always lands on a UTF-8 character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Single-line excerpt: whitespace runs collapse to one space, then truncate.
///
/// Used for provider error bodies and answer previews in logs.
pub fn excerpt(s: &str, max_len: usize) -> String {
    let collapsed = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate(&collapsed, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate("4", 10), "4");
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // "é" is two bytes; target 4 would split the second one
        assert_eq!(truncate("éééé", 7), "éé...");
    }

    #[test]
    fn test_excerpt_collapses_whitespace() {
        let body = "{\n  \"error\":   \"bad key\"\n}";
        assert_eq!(excerpt(body, 100), "{ \"error\": \"bad key\" }");
    }
}
