//! Parser module — comment syntax detection and the shared segment builder.

pub mod annotated;
pub mod links;
pub mod segment;
pub mod shell;

use std::path::Path;

/// Line-comment marker of a source language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSyntax {
    pub marker: &'static str,
}

impl CommentSyntax {
    pub const HASH: CommentSyntax = CommentSyntax { marker: "#" };
    pub const SLASHES: CommentSyntax = CommentSyntax { marker: "//" };
    pub const DASHES: CommentSyntax = CommentSyntax { marker: "--" };

    /// Pick the comment marker from a file extension. Unknown extensions use `#`.
    pub fn for_extension(ext: &str) -> Self {
        match ext {
            "rs" | "go" | "js" | "ts" | "c" | "h" | "cpp" | "java" | "kt" | "swift" => {
                Self::SLASHES
            }
            "sql" | "lua" | "hs" => Self::DASHES,
            _ => Self::HASH,
        }
    }

    pub fn for_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::for_extension)
            .unwrap_or(Self::HASH)
    }

    /// Comment text of a full-line comment: marker and one following space
    /// removed, trailing whitespace trimmed. `None` for any other line,
    /// including code lines with a trailing comment.
    pub fn comment_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        let rest = line.trim_start().strip_prefix(self.marker)?;
        let rest = rest.strip_prefix(' ').unwrap_or(rest);
        Some(rest.trim_end())
    }
}

/// Classification of a single input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    Comment(&'a str),
    Code(&'a str),
}

impl<'a> LineKind<'a> {
    pub fn classify(line: &'a str, syntax: CommentSyntax) -> Self {
        if line.trim().is_empty() {
            return LineKind::Blank;
        }
        match syntax.comment_text(line) {
            Some(text) => LineKind::Comment(text),
            None => LineKind::Code(line),
        }
    }
}
