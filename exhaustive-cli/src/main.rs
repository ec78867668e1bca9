//! exhaustive-enum CLI - reports switch statements over `//exhaustive-enum`
//! types that do not handle every constant.
//!
//! Features:
//! - Loads program graph snapshots (`*.pgraph.json`) from files or directories
//! - Optional `exhaustive.toml` in the base directory
//! - Rayon-powered parallel per-file analysis
//! - Plain or JSON report to stderr or a file

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use exhaustive_core::{
    init_structured_logging, load_config, load_program, CheckReport, Checker, ExhaustiveConfig,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Exhaustiveness checker for enum-like constant sets")]
pub struct Cli {
    /// Snapshot files or directories containing *.pgraph.json snapshots
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// File path patterns to skip (`prefix*`, `*suffix`, or substring)
    #[arg(long, num_args = 1..)]
    ignore: Vec<String>,

    /// Analyze files one at a time instead of on the rayon pool
    #[arg(long)]
    sequential: bool,

    /// Cache annotation lookups per type
    #[arg(long)]
    memoize: bool,

    /// Write the report to a file (relative path) instead of stderr
    #[arg(long, value_name = "FILE")]
    output: Option<String>,

    /// Directory holding exhaustive.toml; report paths are shown relative to it
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
}

/// Effective run settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Settings {
    json: bool,
    parallel: bool,
    memoize: bool,
    ignore: Vec<String>,
}

impl Settings {
    /// Command-line flags win; config values fill in what the flags leave
    /// at their defaults. Ignore patterns from both sources are combined.
    fn resolve(cli: &Cli, config: Option<&ExhaustiveConfig>) -> Self {
        let mut settings = Settings {
            json: cli.json,
            parallel: !cli.sequential,
            memoize: cli.memoize,
            ignore: cli.ignore.clone(),
        };

        if let Some(cfg) = config {
            settings.json |= cfg.wants_json();
            if !cli.sequential {
                settings.parallel = cfg.parallel.unwrap_or(true);
            }
            settings.memoize |= cfg.memoize.unwrap_or(false);
            if let Some(list) = &cfg.ignore {
                settings.ignore.extend(list.iter().cloned());
            }
        }
        settings
    }
}

/// Security: Validates output file paths to prevent path traversal attacks.
///
/// Rejects:
/// - Absolute paths (must be relative to current directory)
/// - Paths containing `..` (parent directory traversal)
/// - Paths with null bytes (injection attacks)
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(anyhow!(
            "Path traversal (..) not allowed in output paths: {}",
            path
        ));
    }

    // Backslash separators are not components on Unix
    let normalized = path.replace('\\', "/");
    if normalized.contains("/../") || normalized.starts_with("../") || normalized.ends_with("/..") {
        return Err(anyhow!("Path traversal attempt detected: {}", path));
    }

    Ok(p)
}

fn render(report: &CheckReport, json: bool, base: &Path, out: &mut impl Write) -> io::Result<()> {
    if json {
        report.write_json(out, base)
    } else {
        report.write_plain(out, base)
    }
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] exhaustive-enum internal error: {}", info);
        eprintln!("[PANIC] No report was produced.");
    }));

    // Initialize structured logging (JSON to stderr, respects RUST_LOG)
    init_structured_logging();

    let cli = Cli::parse();

    // 1. Base directory for config lookup and relative report paths
    let base = match &cli.base_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    // 2. Load config (safe - a broken config is reported and skipped)
    let config = match load_config(&base) {
        Ok(cfg) => cfg,
        Err(e) if e.is_recoverable() => {
            eprintln!("[WARN] config load failed: {}", e);
            None
        }
        Err(e) => return Err(e.into()),
    };
    let settings = Settings::resolve(&cli, config.as_ref());

    // 3. Validate the output path before doing any work
    let output = cli
        .output
        .as_deref()
        .map(validate_output_path)
        .transpose()
        .context("Invalid output path")?;

    // 4. Load and merge snapshots
    let program = load_program(&cli.paths).context("Failed to load program graph")?;

    // 5. Analyze
    let report = Checker::new(&program)
        .parallel(settings.parallel)
        .memoize(settings.memoize)
        .ignore_patterns(settings.ignore.iter().cloned())
        .run();

    // 6. Report (findings are not an error; the exit code stays 0)
    match output {
        Some(path) => {
            let mut buf = Vec::new();
            render(&report, settings.json, &base, &mut buf)?;
            fs::write(&path, buf)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
        }
        None => {
            let stderr = io::stderr();
            render(&report, settings.json, &base, &mut stderr.lock())?;
        }
    }

    Ok(())
}
