use super::{read_document, resolve_path, write_output};
use crate::config::{Config, RegistryKind};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use formbuilder_editor::EditSession;
use formbuilder_renderer::IssueLevel;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Document JSON file
    pub document: PathBuf,

    /// JSON array of mutations to apply, in order
    #[arg(short, long)]
    pub script: PathBuf,

    /// Write the result back to the document file
    #[arg(long, conflicts_with = "out")]
    pub in_place: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Component set (overrides config)
    #[arg(long, value_enum)]
    pub registry: Option<RegistryKind>,
}

pub fn edit(args: EditArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = args.registry.unwrap_or(config.registry).build()?;

    let document_path = resolve_path(cwd, &args.document);
    let document = read_document(&document_path)?;

    let script_path = resolve_path(cwd, &args.script);
    let script = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;

    let mut session = EditSession::new(document, Arc::new(registry));
    let applied = session
        .apply_script(&script)
        .with_context(|| format!("Script {} was not applied", args.script.display()))?;
    debug!(applied, nodes = session.document().len(), "Applied mutation script");

    let output = session.serialize().to_json_pretty()?;

    let target = match (&args.out, args.in_place) {
        (_, true) => Some(document_path),
        (Some(out), false) => Some(resolve_path(cwd, out)),
        (None, false) => None,
    };

    match target {
        Some(path) => {
            write_output(&path, &output)?;
            println!(
                "{} Applied {} mutations → {}",
                "✓".green(),
                applied,
                path.display()
            );
        }
        None => println!("{}", output),
    }

    let errors = session
        .validate()
        .into_iter()
        .filter(|issue| issue.issue.level == IssueLevel::Error)
        .count();
    if errors > 0 {
        eprintln!(
            "{} Edited document has {} error-level issues, run `formbuilder validate` for details",
            "⚠️".yellow(),
            errors
        );
    }

    Ok(())
}
