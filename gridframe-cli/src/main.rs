//! # Gridframe CLI
//!
//! File-layer front end for the layout schema engine. Reads schema
//! documents from disk, runs the normalize/validate pipeline, and prints
//! machine-readable reports for scripting. Diagnostics go to stdout as
//! JSON; logs go to stderr.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gridframe_core::{
    compute_groups, normalize, validate, validate_links, ComponentLink, LinkReport, Schema,
};

#[derive(Parser)]
#[command(name = "gridframe", version, about = "Layout schema engine tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a schema document and print the report.
    ///
    /// Exits non-zero when the schema has errors; warnings are reported
    /// but do not fail the run.
    Validate {
        /// Path to the schema JSON document.
        schema: PathBuf,
        /// Validate the document as-is instead of normalizing first.
        #[arg(long)]
        raw: bool,
    },
    /// Print the canonical (normalized) form of a schema document.
    Normalize {
        /// Path to the schema JSON document.
        schema: PathBuf,
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print grid positions and complexity for one breakpoint.
    Grid {
        /// Path to the schema JSON document.
        schema: PathBuf,
        /// Breakpoint name to convert.
        #[arg(short, long)]
        breakpoint: String,
    },
    /// Validate cross-breakpoint links and print their groups.
    Links {
        /// Path to the schema JSON document.
        schema: PathBuf,
        /// Path to the link list JSON (array of {source, target}).
        #[arg(short, long)]
        links: PathBuf,
    },
}

/// Initialize structured tracing.
///
/// Set `RUST_LOG` to control log levels (default: info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema from {}", path.display()))?;
    Schema::from_json(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn load_links(path: &Path) -> anyhow::Result<Vec<ComponentLink>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read links from {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Combined output of the `links` subcommand.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinksOutput {
    report: LinkReport,
    groups: Vec<Vec<String>>,
}

/// Execute a subcommand; returns whether the run was clean (exit 0).
fn run(command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Validate { schema, raw } => {
            let mut document = load_schema(&schema)?;
            if !raw {
                document = normalize(&document);
            }
            let report = validate(&document);
            print_json(&report)?;
            if report.valid {
                tracing::info!(warnings = report.warnings.len(), "schema is valid");
            } else {
                tracing::error!(errors = report.errors.len(), "schema is invalid");
            }
            Ok(report.valid)
        }
        Command::Normalize { schema, output } => {
            let normalized = normalize(&load_schema(&schema)?);
            let json = normalized.to_json_pretty()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    tracing::info!("wrote canonical schema to {}", path.display());
                }
                None => println!("{json}"),
            }
            Ok(true)
        }
        Command::Grid { schema, breakpoint } => {
            let document = normalize(&load_schema(&schema)?);
            let conversion = document.grid_positions_for(&breakpoint)?;
            let complexity = document.complexity_for(&breakpoint)?;
            print_json(&serde_json::json!({
                "grid": conversion,
                "complexity": complexity,
            }))?;
            Ok(true)
        }
        Command::Links { schema, links } => {
            let document = load_schema(&schema)?;
            let edges = load_links(&links)?;
            let ids: HashSet<&str> = document.component_ids().collect();
            let report = validate_links(&edges, &ids);
            let clean = report.valid;
            print_json(&LinksOutput {
                report,
                groups: compute_groups(&edges),
            })?;
            Ok(clean)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    Ok(if run(cli.command)? {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
