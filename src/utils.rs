/// Round to two decimal places for display values (densities, percentages)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `part / whole * 100`, or 0 when `whole` is zero
pub fn percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    part / whole * 100.0
}

/// Capitalize the first character of every space-separated word
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shorten `text` to at most `max_chars` characters for use in messages
pub fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(0.005), 0.01);
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1.0, 4.0), 25.0);
        assert_eq!(percent(3.0, 0.0), 0.0);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("my blog post"), "My Blog Post");
        assert_eq!(title_case("  über  cool "), "Über Cool");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("a longer heading text", 8), "a longer...");
    }
}
