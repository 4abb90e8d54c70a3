// Formatting utilities

/// Format a number with thousands separators (e.g., "1,234,567")
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format a percentage with two decimals (e.g., "1.00%")
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Format whole dollars with separators (e.g., "$1,500")
pub fn format_dollars(amount: u64) -> String {
    format!("${}", format_number(amount))
}

/// Format an amount with cents (e.g., "$2.50")
pub fn format_dollars_cents(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Truncate string to max characters with ellipsis
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// First `max_lines` non-blank lines of a block of text
pub fn excerpt_lines(s: &str, max_lines: usize) -> Vec<&str> {
    s.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(max_lines)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1000000), "1,000,000");
        assert_eq!(format_number(12345678), "12,345,678");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1.0), "1.00%");
        assert_eq!(format_percent(2.345), "2.35%");
    }

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(1500), "$1,500");
        assert_eq!(format_dollars_cents(2.5), "$2.50");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("日本語のテキスト", 5), "日本...");
    }

    #[test]
    fn test_excerpt_lines() {
        assert_eq!(excerpt_lines("a\n\n b \nc\nd", 2), vec!["a", "b"]);
    }
}
