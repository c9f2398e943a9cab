//! Common display helpers

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// `--` for blank values
pub fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "--".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Tari Saman", 20), "Tari Saman");
        assert_eq!(truncate_string("Sejarah Wayang Kulit", 10), "Sejarah...");
        // multi-byte characters are not split
        assert_eq!(truncate_string("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(""), "--");
        assert_eq!(or_dash("  "), "--");
        assert_eq!(or_dash("BCA"), "BCA");
    }
}
