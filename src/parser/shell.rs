//! Shell transcript parser.
//!
//! Comments explain the commands and output that follow them. Command lines
//! may carry a `$` prompt, which is stripped from the stored text.

use super::segment::SegmentBuilder;
use super::{CommentSyntax, LineKind};
use crate::model::Segment;
use regex::Regex;
use std::sync::LazyLock;

static RE_PROMPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*\$(?:[[:blank:]]|$)").unwrap());

/// Parse a shell transcript into segments. Never fails; an empty file has no
/// segments.
pub fn parse(input: &str) -> Vec<Segment> {
    let mut builder = SegmentBuilder::default();

    for (idx, line) in input.lines().enumerate() {
        if idx == 0 && line.starts_with("#!") {
            continue;
        }
        match LineKind::classify(line, CommentSyntax::HASH) {
            LineKind::Blank => builder.blank(),
            LineKind::Comment(text) => builder.comment(text),
            LineKind::Code(code) => builder.code(strip_prompt(code)),
        }
    }

    builder.finish()
}

/// Remove a leading `$ ` prompt, if any.
fn strip_prompt(line: &str) -> &str {
    match RE_PROMPT.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_comments_with_commands() {
        let input = "# Install the dependencies\n\
                     $ pip install instructor pydantic\n\
                     \n\
                     # Run the script\n\
                     $ python getting-started.py\n\
                     Customer(name='John Doe')\n";
        let segs = parse(input);
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].annotation, "Install the dependencies");
        assert_eq!(segs[0].code, vec!["pip install instructor pydantic"]);
        assert_eq!(segs[1].annotation, "Run the script");
        assert_eq!(
            segs[1].code,
            vec!["python getting-started.py", "Customer(name='John Doe')"]
        );
    }

    #[test]
    fn prompt_does_not_change_boundaries() {
        let with = parse("# run\n$ a\n$ b\n# again\n$ c\n");
        let without = parse("# run\na\nb\n# again\nc\n");
        assert_eq!(with, without);
        assert_eq!(with[0].code, vec!["a", "b"]);
    }

    #[test]
    fn bare_prompt_and_dollar_variables() {
        assert_eq!(strip_prompt("$"), "");
        assert_eq!(strip_prompt("  $ ls"), "ls");
        assert_eq!(strip_prompt("$HOME/bin/tool"), "$HOME/bin/tool");
        assert_eq!(strip_prompt("echo $PATH"), "echo $PATH");
    }

    #[test]
    fn shebang_skipped() {
        let segs = parse("#!/usr/bin/env bash\n# Build\n$ make\n");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].annotation, "Build");
    }

    #[test]
    fn empty_transcript() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n").is_empty());
    }
}
