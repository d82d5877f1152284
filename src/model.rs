//! Data model for parsed examples — format-agnostic.

use serde::{Deserialize, Serialize};

/// One annotation paired with the code it explains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Comment text with markers stripped; empty when the code stands alone.
    pub annotation: String,
    pub code: Vec<String>,
}

/// Result of parsing one annotated source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceDoc {
    pub title: String,
    pub description: String,
    pub segments: Vec<Segment>,
}

/// Complete record for one example directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Directory name, e.g. `014-query-planning`
    pub id: String,
    pub ordinal: u32,
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub shell_segments: Vec<Segment>,
    #[serde(default)]
    pub links: Vec<String>,
}

/// Entry of the ordered index written next to the per-example records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: String,
    pub ordinal: u32,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl From<&Example> for IndexEntry {
    fn from(ex: &Example) -> Self {
        Self {
            id: ex.id.clone(),
            ordinal: ex.ordinal,
            slug: ex.slug.clone(),
            title: ex.title.clone(),
            section: ex.section.clone(),
        }
    }
}

/// Optional manifest assigning examples to sections.
#[derive(Debug, Default, Deserialize)]
pub struct SectionsManifest {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Example ids (directory names) belonging to this section
    #[serde(default)]
    pub examples: Vec<String>,
}

impl SectionsManifest {
    /// Section an example id belongs to, first match wins.
    pub fn section_for(&self, example_id: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.examples.iter().any(|e| e == example_id))
    }
}
