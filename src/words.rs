//! Word list used for directory names

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load one word per line, trimmed, skipping blank lines.
///
/// An empty list is allowed; directories are then named by depth and index only.
pub fn load_words(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read word list {}", path.display()))?;
    Ok(parse_words(&content))
}

pub fn parse_words(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_words() {
        let words = parse_words("  amber \n\nbasalt\r\n\t\ncobalt\n");
        assert_eq!(words, vec!["amber", "basalt", "cobalt"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_words("").is_empty());
        assert!(parse_words("\n   \n").is_empty());
    }

    #[test]
    fn test_load_words() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("words.txt");
        std::fs::write(&path, "one\ntwo\n").unwrap();

        assert_eq!(load_words(&path).unwrap(), vec!["one", "two"]);
        assert!(load_words(&tmp.path().join("missing.txt")).is_err());
    }
}
