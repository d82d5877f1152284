//! Watch mode: rebuild when example files or the sections manifest change.
//!
//! Change events are debounced. A rebuild runs once no relevant event has
//! arrived for the configured cooldown, so a burst of saves triggers a
//! single build.

use crate::build;
use crate::config::BuildConfig;
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Trailing-edge debounce over change events.
#[derive(Debug)]
pub struct Debouncer {
    cooldown: Duration,
    last_event: Option<Instant>,
}

impl Debouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_event: None,
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.last_event = Some(at);
    }

    /// True once an event is pending and the cooldown has passed since the
    /// latest one.
    pub fn ready(&self, now: Instant) -> bool {
        self.last_event
            .is_some_and(|t| now.saturating_duration_since(t) >= self.cooldown)
    }

    pub fn reset(&mut self) {
        self.last_event = None;
    }
}

/// Paths whose changes trigger a rebuild.
#[derive(Debug, Default)]
struct WatchSet {
    /// Trees where any change counts
    roots: Vec<PathBuf>,
    /// Single files watched through their parent directory
    files: Vec<PathBuf>,
    /// Subtrees never counted, even inside a root
    ignored: Vec<PathBuf>,
}

impl WatchSet {
    fn for_config(config: &BuildConfig) -> Self {
        Self {
            roots: with_canonical(&config.examples_dir),
            files: config
                .sections_file
                .as_deref()
                .map(with_canonical)
                .unwrap_or_default(),
            // Output written inside the watched tree must not retrigger builds
            ignored: with_canonical(&config.output_dir),
        }
    }

    fn is_relevant(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if name.starts_with('.') || name.ends_with('~') || name.ends_with(".swp") {
            return false;
        }
        if self.ignored.iter().any(|dir| path.starts_with(dir)) {
            return false;
        }
        self.files.iter().any(|f| path == f.as_path())
            || self.roots.iter().any(|r| path.starts_with(r))
    }

    /// Whether `dir` is already covered by a recursive root watch.
    fn covers(&self, dir: &Path) -> bool {
        self.roots.iter().any(|r| dir.starts_with(r))
    }
}

/// The path as given plus its canonical form, since watcher backends report
/// either one.
fn with_canonical(path: &Path) -> Vec<PathBuf> {
    let mut paths = vec![path.to_path_buf()];
    if let Ok(abs) = fs::canonicalize(path) {
        if abs.as_path() != path {
            paths.push(abs);
        }
    }
    paths
}

/// Directory to watch for a single file. Editors often replace a file on
/// save, which a watch on the file itself would miss.
fn parent_dir(file: &Path) -> PathBuf {
    let file = fs::canonicalize(file).unwrap_or_else(|_| file.to_path_buf());
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Build once, then rebuild on every debounced change until the watcher
/// channel closes. The sections manifest is re-read before each rebuild.
pub fn watch(mut config: BuildConfig, cooldown: Duration) -> Result<()> {
    rebuild(&config);

    let set = WatchSet::for_config(&config);

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("failed to create file watcher")?;
    watcher
        .watch(&config.examples_dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", config.examples_dir.display()))?;
    if let Some(file) = &config.sections_file {
        let dir = parent_dir(file);
        if !set.covers(&dir) {
            watcher
                .watch(&dir, RecursiveMode::NonRecursive)
                .with_context(|| format!("failed to watch {}", dir.display()))?;
        }
        debug!("watching sections manifest {}", file.display());
    }
    info!(
        "watching {} for changes (cooldown {:?}), press Ctrl+C to stop",
        config.examples_dir.display(),
        cooldown
    );

    let mut debouncer = Debouncer::new(cooldown);
    loop {
        match rx.recv_timeout(POLL_INTERVAL) {
            Ok(Ok(event)) => {
                let is_change = matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                );
                if let Some(path) = event.paths.iter().find(|p| set.is_relevant(p)) {
                    if is_change {
                        debug!("change detected in {}", path.display());
                        debouncer.record(Instant::now());
                    }
                }
            }
            Ok(Err(e)) => warn!("watch error: {}", e),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.ready(Instant::now()) {
            debouncer.reset();
            if let Err(e) = config.reload_sections() {
                warn!("keeping previous sections: {:#}", e);
            }
            info!("rebuilding site");
            rebuild(&config);
        }
    }

    Ok(())
}

fn rebuild(config: &BuildConfig) {
    match build::build(config) {
        Ok(report) if report.failures.is_empty() => info!("site rebuilt"),
        Ok(report) => warn!("site rebuilt, {} example(s) skipped", report.failures.len()),
        Err(e) => error!("rebuild failed: {:#}", e),
    }
}
