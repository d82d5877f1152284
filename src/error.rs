//! Typed parse errors.
//!
//! A `ParseError` is produced by the parsers without a path; the aggregator
//! attaches the offending file with [`ParseError::at`] before reporting.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// What went wrong while reading an example.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("file is empty")]
    EmptyFile,

    #[error("first comment line must be the title")]
    MissingTitle,

    #[error("required file is missing")]
    MissingRequiredFile,

    #[error("directory name must look like NNN-slug: {0}")]
    BadOrdinal(String),

    #[error("not a URL: {0}")]
    MalformedLinksFile(String),

    #[error("cannot read file: {0}")]
    Unreadable(String),
}

/// A parse failure with its location, rendered as `path:line: message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}{kind}", location(.path, .line))]
pub struct ParseError {
    pub kind: ErrorKind,
    pub path: Option<PathBuf>,
    /// 1-based line number, when the error points at a line.
    pub line: Option<usize>,
}

impl ParseError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            path: None,
            line: None,
        }
    }

    pub fn at_line(kind: ErrorKind, line: usize) -> Self {
        Self {
            kind,
            path: None,
            line: Some(line),
        }
    }

    /// Attach the file the error came from.
    pub fn at(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }
}

fn location(path: &Option<PathBuf>, line: &Option<usize>) -> String {
    match (path, line) {
        (Some(p), Some(l)) => format!("{}:{}: ", p.display(), l),
        (Some(p), None) => format!("{}: ", p.display()),
        (None, Some(l)) => format!("line {}: ", l),
        (None, None) => String::new(),
    }
}
