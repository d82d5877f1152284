//! Example aggregation: one `NNN-slug/` directory → one [`Example`].
//!
//! Each directory is a unit of failure. [`collect`] reports a broken example
//! and keeps going with the rest.

use crate::config::BuildConfig;
use crate::error::{ErrorKind, ParseError};
use crate::model::{Example, Segment, SourceDoc};
use crate::parser::{self, CommentSyntax};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, warn};

static RE_EXAMPLE_DIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)-(.+)$").unwrap());

/// Examples that parsed, plus the errors of those that did not.
#[derive(Debug, Default)]
pub struct Collected {
    pub examples: Vec<Example>,
    pub failures: Vec<ParseError>,
}

/// Split `014-query-planning` into `(14, "query-planning")`.
pub fn parse_dir_name(name: &str) -> Result<(u32, String), ParseError> {
    let bad = || ParseError::new(ErrorKind::BadOrdinal(name.to_string()));
    let caps = RE_EXAMPLE_DIR.captures(name).ok_or_else(bad)?;
    let ordinal = caps[1].parse::<u32>().map_err(|_| bad())?;
    Ok((ordinal, caps[2].to_string()))
}

/// Combine already-parsed pieces of an example into its record.
pub fn assemble(
    dir_name: &str,
    source: SourceDoc,
    shell_segments: Option<Vec<Segment>>,
    links: Option<Vec<String>>,
) -> Result<Example, ParseError> {
    let (ordinal, slug) = parse_dir_name(dir_name)?;
    Ok(Example {
        id: dir_name.to_string(),
        ordinal,
        slug,
        title: source.title,
        description: source.description,
        section: None,
        segments: source.segments,
        shell_segments: shell_segments.unwrap_or_default(),
        links: links.unwrap_or_default(),
    })
}

/// Read and parse every file of one example directory.
pub fn load_example(dir: &Path, config: &BuildConfig) -> Result<Example, ParseError> {
    let dir_name = dir
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let (_, slug) = parse_dir_name(&dir_name).map_err(|e| e.at(dir))?;

    let source_path = dir.join(format!("{}.{}", slug, config.source_ext));
    let source_text = read_optional(&source_path)?
        .ok_or_else(|| ParseError::new(ErrorKind::MissingRequiredFile).at(&source_path))?;
    let syntax = CommentSyntax::for_path(&source_path);
    let source = parser::annotated::parse(&source_text, syntax).map_err(|e| e.at(&source_path))?;

    let shell_path = dir.join(format!("{}.sh", slug));
    let shell_segments = if shell_path == source_path {
        None
    } else {
        read_optional(&shell_path)?.map(|text| parser::shell::parse(&text))
    };

    let links_path = dir.join(format!("{}_links.txt", slug));
    let links = match read_optional(&links_path)? {
        Some(text) => Some(parser::links::parse(&text).map_err(|e| e.at(&links_path))?),
        None => None,
    };

    let mut example = assemble(&dir_name, source, shell_segments, links)?;
    if let Some(section) = config.sections.section_for(&dir_name) {
        debug!(id = %dir_name, section = %section.id, "assigned section");
        example.section = Some(section.title.clone());
    }
    debug!(
        id = %example.id,
        segments = example.segments.len(),
        shell_segments = example.shell_segments.len(),
        links = example.links.len(),
        "parsed example"
    );
    Ok(example)
}

/// Parse every example directory under `config.examples_dir`.
///
/// Broken examples are logged and returned in [`Collected::failures`]; they
/// never abort the build. Examples come back sorted by ordinal, then id.
pub fn collect(config: &BuildConfig) -> Result<Collected> {
    let mut collected = Collected::default();

    for dir in example_dirs(config)? {
        match load_example(&dir, config) {
            Ok(example) => collected.examples.push(example),
            Err(e) => {
                warn!("skipping {}: {}", dir.display(), e);
                collected.failures.push(e);
            }
        }
    }

    collected
        .examples
        .sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then_with(|| a.id.cmp(&b.id)));
    warn_duplicate_ordinals(&collected.examples);
    Ok(collected)
}

/// Candidate example directories, sorted for deterministic processing.
fn example_dirs(config: &BuildConfig) -> Result<Vec<PathBuf>> {
    let root = &config.examples_dir;
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to read examples directory: {}", root.display()))?;

    let mut dirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() || path == config.output_dir {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') || !config.includes(name) {
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();
    Ok(dirs)
}

fn warn_duplicate_ordinals(examples: &[Example]) {
    let mut seen: HashMap<u32, &str> = HashMap::new();
    for ex in examples {
        if let Some(first) = seen.insert(ex.ordinal, &ex.id) {
            warn!("ordinal {} used by both {} and {}", ex.ordinal, first, ex.id);
        }
    }
}

/// Read a file that may legitimately be absent.
fn read_optional(path: &Path) -> Result<Option<String>, ParseError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ParseError::new(ErrorKind::Unreadable(e.to_string())).at(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_example(root: &Path, id: &str, files: &[(&str, &str)]) {
        let dir = root.join(id);
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    #[test]
    fn ordinal_from_dir_name() {
        assert_eq!(
            parse_dir_name("014-query-planning").unwrap(),
            (14, "query-planning".to_string())
        );
        assert_eq!(parse_dir_name("001-a").unwrap().0, 1);
    }

    #[test]
    fn bad_ordinals() {
        for name in ["abc-query-planning", "014", "014-", "-slug", "99999999999-big"] {
            let err = parse_dir_name(name).unwrap_err();
            assert_eq!(err.kind, ErrorKind::BadOrdinal(name.to_string()), "{name}");
        }
    }

    #[test]
    fn assemble_defaults_optional_parts() {
        let source = SourceDoc {
            title: "T".to_string(),
            description: "D".to_string(),
            segments: vec![],
        };
        let ex = assemble("003-first-extraction", source, None, None).unwrap();
        assert_eq!(ex.ordinal, 3);
        assert_eq!(ex.slug, "first-extraction");
        assert!(ex.shell_segments.is_empty());
        assert!(ex.links.is_empty());
    }

    #[test]
    fn load_full_example() {
        let root = TempDir::new().unwrap();
        write_example(
            root.path(),
            "001-getting-started",
            &[
                ("getting-started.py", "# Getting Started\n# Learn.\nimport os\n"),
                ("getting-started.sh", "# Run it\n$ python getting-started.py\n"),
                ("getting-started_links.txt", "https://example.com/docs\n"),
            ],
        );
        let cfg = BuildConfig::new(root.path(), root.path().join("out"));
        let ex = load_example(&root.path().join("001-getting-started"), &cfg).unwrap();
        assert_eq!(ex.title, "Getting Started");
        assert_eq!(ex.shell_segments[0].code, vec!["python getting-started.py"]);
        assert_eq!(ex.links, vec!["https://example.com/docs"]);
    }

    #[test]
    fn missing_primary_file() {
        let root = TempDir::new().unwrap();
        write_example(root.path(), "002-installation", &[("installation.sh", "$ pip install x\n")]);
        let cfg = BuildConfig::new(root.path(), root.path().join("out"));
        let err = load_example(&root.path().join("002-installation"), &cfg).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MissingRequiredFile);
        assert!(err.path.unwrap().ends_with("installation.py"));
    }

    #[test]
    fn malformed_links_reported_with_path() {
        let root = TempDir::new().unwrap();
        write_example(
            root.path(),
            "005-links",
            &[("links.py", "# Links\nx\n"), ("links_links.txt", "not a url\n")],
        );
        let cfg = BuildConfig::new(root.path(), root.path().join("out"));
        let err = load_example(&root.path().join("005-links"), &cfg).unwrap_err();
        assert_eq!(err.line, Some(1));
        assert!(err.to_string().contains("links_links.txt:1:"));
    }

    #[test]
    fn collect_skips_broken_examples() {
        let root = TempDir::new().unwrap();
        write_example(root.path(), "010-second", &[("second.py", "# Second\nb()\n")]);
        write_example(root.path(), "002-first", &[("first.py", "# First\na()\n")]);
        write_example(root.path(), "abc-broken", &[("broken.py", "# Broken\n")]);
        write_example(root.path(), "003-untitled", &[("untitled.py", "code()\n")]);
        fs::create_dir_all(root.path().join(".hidden")).unwrap();
        fs::create_dir_all(root.path().join("out")).unwrap();
        fs::write(root.path().join("README.md"), "not an example").unwrap();

        let cfg = BuildConfig::new(root.path(), root.path().join("out"));
        let collected = collect(&cfg).unwrap();
        let ids: Vec<&str> = collected.examples.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["002-first", "010-second"]);
        assert_eq!(collected.failures.len(), 2);
        assert!(collected
            .failures
            .iter()
            .any(|f| matches!(f.kind, ErrorKind::BadOrdinal(_))));
        assert!(collected
            .failures
            .iter()
            .any(|f| f.kind == ErrorKind::MissingTitle));
    }

    #[test]
    fn collect_assigns_sections_and_filters() {
        let root = TempDir::new().unwrap();
        write_example(root.path(), "001-a", &[("a.py", "# A\na()\n")]);
        write_example(root.path(), "002-b", &[("b.py", "# B\nb()\n")]);
        let mut cfg = BuildConfig::new(root.path(), root.path().join("out"))
            .with_only("001-*")
            .unwrap();
        cfg.sections = serde_json::from_str(
            r#"{"sections":[{"id":"basics","title":"Basics","examples":["001-a"]}]}"#,
        )
        .unwrap();
        let collected = collect(&cfg).unwrap();
        assert_eq!(collected.examples.len(), 1);
        assert_eq!(collected.examples[0].section.as_deref(), Some("Basics"));
    }

    #[test]
    fn collect_missing_root_fails() {
        let root = TempDir::new().unwrap();
        let cfg = BuildConfig::new(root.path().join("nope"), root.path().join("out"));
        assert!(collect(&cfg).is_err());
    }
}
