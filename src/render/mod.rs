//! Renderer module — trait-based format dispatch.

pub mod html;
pub mod json;

use crate::model::Example;
use anyhow::{anyhow, Result};

/// Examples adjacent to the one being rendered, in site order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Neighbors<'a> {
    pub prev: Option<&'a Example>,
    pub next: Option<&'a Example>,
}

impl<'a> Neighbors<'a> {
    pub fn of(examples: &'a [Example], idx: usize) -> Self {
        Self {
            prev: idx.checked_sub(1).and_then(|i| examples.get(i)),
            next: examples.get(idx + 1),
        }
    }
}

/// Trait for rendering examples into a specific output format.
pub trait Renderer {
    fn render_example(&self, example: &Example, nav: Neighbors<'_>) -> Result<String>;
    fn render_index(&self, examples: &[Example]) -> Result<String>;
    fn file_extension(&self) -> &str;
}

/// File name of an example's page. Pages are keyed by the directory id, so
/// two examples sharing a slug never overwrite each other.
pub fn page_file(example: &Example, ext: &str) -> String {
    format!("{}.{}", example.id, ext)
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "html" => Ok(Box::new(html::HtmlRenderer)),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use html or json", format)),
    }
}
