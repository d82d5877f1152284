//! Annotated source parser — line-by-line state machine.
//!
//! The first comment block of a file holds the title (its first line) and the
//! description (the remaining lines, up to the first blank or code line).
//! Everything after it is split into annotation/code segments.

use super::segment::SegmentBuilder;
use super::{CommentSyntax, LineKind};
use crate::error::{ErrorKind, ParseError};
use crate::model::SourceDoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeTitle,
    InDescription,
    Scanning,
}

/// Parse an annotated source file into its title, description and segments.
///
/// # Errors
///
/// `EmptyFile` when the input has no non-blank line, `MissingTitle` when the
/// first non-blank line is not a comment with text.
pub fn parse(input: &str, syntax: CommentSyntax) -> Result<SourceDoc, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::new(ErrorKind::EmptyFile));
    }

    let mut state = State::BeforeTitle;
    let mut title = String::new();
    let mut description: Vec<&str> = Vec::new();
    let mut builder = SegmentBuilder::default();

    for (idx, line) in input.lines().enumerate() {
        let kind = LineKind::classify(line, syntax);

        match state {
            State::BeforeTitle => match kind {
                LineKind::Blank => {}
                LineKind::Comment(text) if !text.is_empty() => {
                    title = text.to_string();
                    state = State::InDescription;
                }
                _ => return Err(ParseError::at_line(ErrorKind::MissingTitle, idx + 1)),
            },
            State::InDescription => match kind {
                LineKind::Comment(text) => {
                    if !text.is_empty() {
                        description.push(text);
                    }
                }
                LineKind::Blank => state = State::Scanning,
                LineKind::Code(code) => {
                    state = State::Scanning;
                    builder.code(code);
                }
            },
            State::Scanning => feed(&mut builder, kind),
        }
    }

    Ok(SourceDoc {
        title,
        description: description.join(" "),
        segments: builder.finish(),
    })
}

fn feed(builder: &mut SegmentBuilder, kind: LineKind<'_>) {
    match kind {
        LineKind::Blank => builder.blank(),
        LineKind::Comment(text) => builder.comment(text),
        LineKind::Code(code) => builder.code(code),
    }
}
