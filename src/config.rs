//! Build configuration, scoped to a single build invocation.

use crate::model::SectionsManifest;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default debounce window for watch mode.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(2);

/// Pipeline configuration for [`crate::build::build`].
#[derive(Debug)]
pub struct BuildConfig {
    /// Directory holding the `NNN-slug/` example directories
    pub examples_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Output format name, resolved by [`crate::render::create_renderer`]
    pub format: String,
    /// Extension of the primary annotated source in each example
    pub source_ext: String,
    pub sections: SectionsManifest,
    /// Where `sections` was loaded from, if anywhere
    pub sections_file: Option<PathBuf>,
    /// Only examples whose directory name matches are built
    pub only: Option<glob::Pattern>,
}

impl BuildConfig {
    pub fn new(examples_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            examples_dir: examples_dir.into(),
            output_dir: output_dir.into(),
            format: "html".to_string(),
            source_ext: "py".to_string(),
            sections: SectionsManifest::default(),
            sections_file: None,
            only: None,
        }
    }

    /// Load a sections manifest from a JSON file.
    pub fn with_sections_file(mut self, path: &Path) -> Result<Self> {
        self.sections = read_sections(path)?;
        self.sections_file = Some(path.to_path_buf());
        Ok(self)
    }

    /// Re-read the sections manifest from disk. On error the previous
    /// manifest is kept.
    pub fn reload_sections(&mut self) -> Result<()> {
        if let Some(path) = &self.sections_file {
            self.sections = read_sections(path)?;
        }
        Ok(())
    }

    /// Restrict the build to directory names matching a glob pattern.
    pub fn with_only(mut self, pattern: &str) -> Result<Self> {
        let pattern = glob::Pattern::new(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?;
        self.only = Some(pattern);
        Ok(self)
    }

    pub fn includes(&self, dir_name: &str) -> bool {
        self.only.as_ref().map_or(true, |p| p.matches(dir_name))
    }
}

fn read_sections(path: &Path) -> Result<SectionsManifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read sections file: {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid sections file: {}", path.display()))
}
