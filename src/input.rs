//! URL list input handling.

use anyhow::{Context, Result};
use std::path::Path;

/// Read the URL list file, one URL per line.
///
/// Blank lines and lines starting with `#` are ignored.
pub fn read_url_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list: {:?}", path))?;

    Ok(parse_url_lines(&content))
}

fn parse_url_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let content = "\
# header comment
https://example.com/a

  # indented comment
https://example.com/b
   https://example.com/c
";
        let urls = parse_url_lines(content);
        assert_eq!(
            urls,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
            ]
        );
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_url_lines("").is_empty());
        assert!(parse_url_lines("\n# only a comment\n\n").is_empty());
    }

    #[test]
    fn test_read_url_list_missing_file() {
        assert!(read_url_list(Path::new("/nonexistent/urls.txt")).is_err());
    }
}
