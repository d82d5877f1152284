//! JSON renderer — one document per example plus an ordered index.
//!
//! Serializes the model directly; the records can be read back with serde.

use crate::model::{Example, IndexEntry};
use crate::render::{Neighbors, Renderer};
use anyhow::Result;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render_example(&self, example: &Example, _nav: Neighbors<'_>) -> Result<String> {
        let mut out = serde_json::to_string_pretty(example)?;
        out.push('\n');
        Ok(out)
    }

    fn render_index(&self, examples: &[Example]) -> Result<String> {
        let entries: Vec<IndexEntry> = examples.iter().map(IndexEntry::from).collect();
        let mut out = serde_json::to_string_pretty(&entries)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn example_round_trips_through_json() {
        let ex = fixtures::example(14, "query-planning");
        let out = JsonRenderer.render_example(&ex, Neighbors::default()).unwrap();
        let back: Example = serde_json::from_str(&out).unwrap();
        assert_eq!(back, ex);
        assert!(out.contains("\"shell_segments\""));
    }

    #[test]
    fn index_keeps_order() {
        let examples = vec![fixtures::example(1, "a"), fixtures::example(2, "b")];
        let out = JsonRenderer.render_index(&examples).unwrap();
        let entries: Vec<IndexEntry> = serde_json::from_str(&out).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "001-a");
        assert_eq!(entries[1].slug, "b");
    }
}
