//! byexample — build a static "by example" site from annotated sources.
//!
//! Each example lives in its own `NNN-slug/` directory holding `slug.py`
//! (comments are the prose, everything else is code), an optional `slug.sh`
//! transcript and an optional `slug_links.txt`.
//!
//! - **build**: `byexample examples -o site`
//! - **check**: `byexample examples --check`
//! - **watch**: `byexample examples -o site --watch`

mod aggregate;
mod build;
mod config;
mod error;
mod model;
mod parser;
mod render;
mod watch;

use anyhow::{bail, Result};
use clap::Parser;
use config::BuildConfig;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "byexample",
    about = "Build a static site from annotated example source files"
)]
struct Cli {
    /// Directory containing the NNN-slug example directories
    #[arg(default_value = "examples")]
    examples: PathBuf,

    /// Output directory
    #[arg(short = 'o', long, default_value = "site")]
    output: PathBuf,

    /// Output format: html (default), json
    #[arg(short = 'f', long, default_value = "html")]
    format: String,

    /// Extension of the annotated source file in each example
    #[arg(long, default_value = "py")]
    ext: String,

    /// JSON manifest assigning examples to sections
    #[arg(long)]
    sections: Option<PathBuf>,

    /// Only build example directories matching this glob, e.g. '00*'
    #[arg(long)]
    only: Option<String>,

    /// Parse every example and report authoring errors without writing output
    #[arg(long, conflicts_with = "watch")]
    check: bool,

    /// Rebuild whenever an example changes
    #[arg(long)]
    watch: bool,

    /// Seconds without changes before a watch rebuild starts
    #[arg(long, default_value_t = config::DEFAULT_COOLDOWN.as_secs_f64())]
    cooldown: f64,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;

    if cli.check {
        return check_mode(&config);
    }
    if cli.watch {
        let cooldown = Duration::try_from_secs_f64(cli.cooldown)
            .map_err(|_| anyhow::anyhow!("invalid --cooldown: {}", cli.cooldown))?;
        return watch::watch(config, cooldown);
    }

    let report = build::build(&config)?;
    if report.built == 0 && !report.failures.is_empty() {
        bail!("no example could be built");
    }
    Ok(())
}

/// Sets up tracing on stderr; `RUST_LOG` overrides the default `info` level.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();
}

fn build_config(cli: &Cli) -> Result<BuildConfig> {
    let mut config = BuildConfig::new(&cli.examples, &cli.output);
    config.format = cli.format.clone();
    config.source_ext = cli.ext.trim_start_matches('.').to_string();
    if let Some(ref path) = cli.sections {
        config = config.with_sections_file(path)?;
    }
    if let Some(ref pattern) = cli.only {
        config = config.with_only(pattern)?;
    }
    Ok(config)
}

/// check mode: report every broken example on stdout, fail if there is one.
/// Examples without a description are reported as warnings only.
fn check_mode(config: &BuildConfig) -> Result<()> {
    let collected = build::check(config)?;
    for failure in &collected.failures {
        println!("{}", failure);
    }
    let undescribed = build::missing_descriptions(config, &collected.examples);
    for path in &undescribed {
        println!("warning: {}: missing description", path.display());
    }
    if !collected.failures.is_empty() {
        bail!(
            "{} of {} example(s) have errors",
            collected.failures.len(),
            collected.failures.len() + collected.examples.len()
        );
    }
    if undescribed.is_empty() {
        println!("{} example(s) OK", collected.examples.len());
    } else {
        println!(
            "{} example(s) OK, {} without description",
            collected.examples.len(),
            undescribed.len()
        );
    }
    Ok(())
}
