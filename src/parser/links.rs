//! Links file parser — one URL per line.

use crate::error::{ErrorKind, ParseError};
use regex::Regex;
use std::sync::LazyLock;

static RE_URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://\S+$").unwrap());

/// Parse a newline-delimited links file. Blank lines are skipped.
///
/// # Errors
///
/// `MalformedLinksFile` on the first line that does not look like a URL.
pub fn parse(input: &str) -> Result<Vec<String>, ParseError> {
    let mut links = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !RE_URL.is_match(line) {
            return Err(ParseError::at_line(
                ErrorKind::MalformedLinksFile(line.to_string()),
                idx + 1,
            ));
        }
        links.push(line.to_string());
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_urls_in_order() {
        let links = parse("https://github.com/jxnl/instructor\n\nhttp://example.com/a?b=1\n").unwrap();
        assert_eq!(
            links,
            vec!["https://github.com/jxnl/instructor", "http://example.com/a?b=1"]
        );
    }

    #[test]
    fn rejects_non_url() {
        let err = parse("https://ok.example\nsee the docs\n").unwrap_err();
        assert_eq!(err.line, Some(2));
        assert_eq!(
            err.kind,
            ErrorKind::MalformedLinksFile("see the docs".to_string())
        );
    }
}
