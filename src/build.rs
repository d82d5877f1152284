//! Build entry point: collect examples, render, write.
//!
//! A build is idempotent. Output depends only on the input files, and files
//! whose content is unchanged are not rewritten. Each pass owns the output
//! files of its format: pages left over from examples that no longer build
//! are removed.

use crate::aggregate::{self, Collected};
use crate::config::BuildConfig;
use crate::error::ParseError;
use crate::model::Example;
use crate::render::{self, Neighbors};
use anyhow::{Context, Result};
use std::fs;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Outcome of one build pass.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Examples rendered
    pub built: usize,
    /// Files actually written (changed or new)
    pub written: usize,
    /// Stale output files deleted
    pub removed: usize,
    pub failures: Vec<ParseError>,
}

/// Run one full build with the given configuration.
pub fn build(config: &BuildConfig) -> Result<BuildReport> {
    let renderer = render::create_renderer(&config.format)?;
    let Collected { examples, failures } = aggregate::collect(config)?;

    let out_dir = &config.output_dir;
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output directory: {}", out_dir.display()))?;

    let ext = renderer.file_extension();
    let mut written = 0;
    let mut produced = HashSet::new();

    for (idx, example) in examples.iter().enumerate() {
        let page = renderer.render_example(example, Neighbors::of(&examples, idx))?;
        let name = render::page_file(example, ext);
        if write_if_changed(&out_dir.join(&name), &page)? {
            written += 1;
        }
        produced.insert(name);
    }

    let index_name = format!("index.{}", ext);
    let index = renderer.render_index(&examples)?;
    if write_if_changed(&out_dir.join(&index_name), &index)? {
        written += 1;
    }
    produced.insert(index_name);

    let removed = remove_stale(out_dir, ext, &produced)?;

    info!(
        built = examples.len(),
        written,
        removed,
        failed = failures.len(),
        "build finished in {}",
        out_dir.display()
    );

    Ok(BuildReport {
        built: examples.len(),
        written,
        removed,
        failures,
    })
}

/// Parse every example without writing anything.
pub fn check(config: &BuildConfig) -> Result<Collected> {
    aggregate::collect(config)
}

/// Source files of examples that have a title but no description. These
/// still build; `--check` reports them as warnings.
pub fn missing_descriptions(config: &BuildConfig, examples: &[Example]) -> Vec<PathBuf> {
    examples
        .iter()
        .filter(|ex| ex.description.trim().is_empty())
        .map(|ex| {
            config
                .examples_dir
                .join(&ex.id)
                .join(format!("{}.{}", ex.slug, config.source_ext))
        })
        .collect()
}

/// Delete every `*.{ext}` file in `out_dir` that this pass did not produce.
/// Files of other extensions (stylesheets, the other format) are left alone.
fn remove_stale(out_dir: &Path, ext: &str, produced: &HashSet<String>) -> Result<usize> {
    let entries = fs::read_dir(out_dir)
        .with_context(|| format!("failed to read output directory: {}", out_dir.display()))?;

    let mut removed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if produced.contains(name) {
            continue;
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("removed stale {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("failed to remove stale {}: {}", path.display(), e),
        }
    }
    Ok(removed)
}

/// Write `content` unless the file already holds exactly that. Returns
/// whether the file was written.
fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if let Ok(existing) = fs::read_to_string(path) {
        if existing == content {
            debug!("unchanged {}", path.display());
            return Ok(false);
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    debug!("wrote {}", path.display());
    Ok(true)
}
