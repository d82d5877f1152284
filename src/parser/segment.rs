//! Accumulates (annotation, code) pairs line by line.
//!
//! Both the annotated-source parser and the shell-transcript parser feed
//! classified lines into a [`SegmentBuilder`]; only their line predicates
//! differ.

use crate::model::Segment;

#[derive(Debug, Default)]
pub struct SegmentBuilder {
    segments: Vec<Segment>,
    annotation: Vec<String>,
    code: Vec<String>,
    /// A blank line was seen after annotation text and before any code.
    group_break: bool,
    /// Blank lines seen after code; kept only if more code follows.
    held_blanks: usize,
}

impl SegmentBuilder {
    /// A full-line comment. Closes the open segment if it already has code.
    pub fn comment(&mut self, text: &str) {
        if !self.code.is_empty() {
            self.close();
        }
        if self.group_break && !self.annotation.is_empty() {
            self.annotation.push(String::new());
        }
        self.group_break = false;
        self.annotation.push(text.to_string());
    }

    /// A blank line. Separates annotation groups or sits inside a code block,
    /// never starts a segment on its own.
    pub fn blank(&mut self) {
        if self.code.is_empty() {
            self.group_break = !self.annotation.is_empty();
        } else {
            self.held_blanks += 1;
        }
    }

    /// A code line, stored verbatim.
    pub fn code(&mut self, line: &str) {
        if !self.code.is_empty() {
            for _ in 0..self.held_blanks {
                self.code.push(String::new());
            }
        }
        self.held_blanks = 0;
        self.group_break = false;
        self.code.push(line.to_string());
    }

    /// Flush the open segment and return all segments in input order.
    ///
    /// Trailing annotation text without code still becomes a segment so the
    /// prose is not dropped.
    pub fn finish(mut self) -> Vec<Segment> {
        if !self.code.is_empty() || has_text(&self.annotation) {
            self.close();
        }
        self.segments
    }

    fn close(&mut self) {
        let annotation = self.annotation.join("\n").trim_matches('\n').to_string();
        self.segments.push(Segment {
            annotation,
            code: std::mem::take(&mut self.code),
        });
        self.annotation.clear();
        self.group_break = false;
        self.held_blanks = 0;
    }
}

fn has_text(lines: &[String]) -> bool {
    lines.iter().any(|l| !l.is_empty())
}
