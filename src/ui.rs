use colored::Colorize;

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

/// Print a step indicator
pub fn step(num: usize, total: usize, msg: &str) {
    println!("{} {}", format!("[{num}/{total}]").blue().bold(), msg);
}

// ============================================================================
// Size Formatting
// ============================================================================

const KB: u64 = 1024;

/// Binary units, largest first
const UNITS: [(&str, u64); 4] = [
    ("TB", KB * KB * KB * KB),
    ("GB", KB * KB * KB),
    ("MB", KB * KB),
    ("KB", KB),
];

/// Format bytes as human-readable size
pub fn format_size(bytes: u64) -> String {
    for (suffix, unit) in UNITS {
        if bytes >= unit {
            let value = bytes as f64 / unit as f64;
            // Terabyte volumes get one more digit; budgets are often set there
            return if suffix == "TB" {
                format!("{value:.2} {suffix}")
            } else {
                format!("{value:.1} {suffix}")
            };
        }
    }
    format!("{bytes} B")
}

/// Format bytes as human-readable size followed by the exact byte count
pub fn format_size_exact(bytes: u64) -> String {
    if bytes < KB {
        format_size(bytes)
    } else {
        format!("{} ({} bytes)", format_size(bytes), bytes)
    }
}

/// Parse a size such as "500", "100MB" or "1.5 GB" (case-insensitive, binary units)
pub fn parse_size(size_str: &str) -> Result<u64, String> {
    let upper = size_str.trim().to_uppercase();
    if upper.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, unit)| upper.strip_suffix(suffix).map(|n| (n, *unit)))
        .or_else(|| upper.strip_suffix('B').map(|n| (n, 1)))
        .unwrap_or((upper.as_str(), 1));

    let number = number.trim();
    let value: f64 = number
        .parse()
        .map_err(|_| format!("Invalid number in size: '{number}'"))?;
    if value < 0.0 {
        return Err(format!("Size cannot be negative: {value}"));
    }

    Ok((value * multiplier as f64) as u64)
}

/// Truncate a path string for display, keeping the end
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        path.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let tail: String = path.chars().skip(len - (max_len - 3)).collect();
        format!("...{tail}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(100 * 1024 * 1024), "100.0 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024 / 2), "2.5 GB");
        assert_eq!(format_size(2 * 1024u64.pow(4)), "2.00 TB");
    }

    #[test]
    fn test_format_size_exact() {
        assert_eq!(format_size_exact(512), "512 B");
        assert_eq!(format_size_exact(2048), "2.0 KB (2048 bytes)");
    }

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("100").unwrap(), 100);
        assert_eq!(parse_size("100b").unwrap(), 100);
        assert_eq!(parse_size("10KB").unwrap(), 10 * 1024);
        assert_eq!(parse_size("1.5MB").unwrap(), 1024 * 1024 * 3 / 2);
        assert_eq!(parse_size(" 1 GB").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("1tb").unwrap(), 1024u64.pow(4));
    }

    #[test]
    fn test_parse_size_errors() {
        assert!(parse_size("").is_err());
        assert!(parse_size("abc").is_err());
        assert!(parse_size("MB").is_err());
        assert!(parse_size("-100MB").is_err());
    }

    #[test]
    fn test_truncate_path() {
        assert_eq!(truncate_path("short.txt", 20), "short.txt");
        assert_eq!(
            truncate_path("/very/long/path/to/file.txt", 15),
            ".../to/file.txt"
        );
        assert_eq!(truncate_path("test", 3), "...");
        assert_eq!(truncate_path("", 10), "");
    }
}
