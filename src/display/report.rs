//! Layout helpers shared by the report formatters

/// Format a fraction (0.0 to 1.0) as a percentage
pub fn format_percentage(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if pct < 0.1 && pct > 0.0 {
        format!("{:.2}%", pct)
    } else if pct < 10.0 {
        format!("{:.1}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Horizontal bar for a fraction of `width` cells
pub fn format_bar(fraction: f64, width: usize) -> String {
    if fraction <= 0.0 {
        return "░".repeat(width);
    }

    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn double_separator(width: usize) -> String {
    "═".repeat(width)
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.0005), "0.05%");
        assert_eq!(format_percentage(0.055), "5.5%");
        assert_eq!(format_percentage(0.5), "50%");
        assert_eq!(format_percentage(0.0), "0.0%");
    }

    #[test]
    fn test_format_bar() {
        assert_eq!(format_bar(0.5, 4), "██░░");
        assert_eq!(format_bar(0.0, 3), "░░░");
        assert_eq!(format_bar(1.5, 2), "██");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Crêpes à Paris", 9), "Crêpes...");
        assert_eq!(truncate("Hello", 2), "..");
    }
}
