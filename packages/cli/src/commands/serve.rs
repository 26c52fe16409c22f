use crate::config::{Config, RegistryKind};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use formbuilder_server::AppState;
use formbuilder_storage::{FileStore, MemoryStore};
use tracing::info;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Document storage directory (overrides config)
    #[arg(long)]
    pub storage_dir: Option<String>,

    /// Keep documents in memory only
    #[arg(long, conflicts_with = "storage_dir")]
    pub memory: bool,

    /// Component set (overrides config)
    #[arg(long, value_enum)]
    pub registry: Option<RegistryKind>,

    /// Submissions kept per form (overrides config)
    #[arg(long)]
    pub submission_limit: Option<usize>,
}

/// Config file values with command-line overrides applied
fn effective_config(args: &ServeArgs, cwd: &str) -> Result<Config> {
    let mut config = Config::load(cwd)?;
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(storage_dir) = &args.storage_dir {
        config.storage_dir = storage_dir.clone();
    }
    if let Some(registry) = args.registry {
        config.registry = registry;
    }
    if let Some(limit) = args.submission_limit {
        config.submission_limit = limit;
    }
    Ok(config)
}

pub fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let config = effective_config(&args, cwd)?;
    let addr = config.socket_addr()?;
    let registry = config.registry.build()?;
    let limit = config.submission_limit;
    info!(
        components = registry.len(),
        submission_limit = limit,
        "Prepared server state"
    );

    let state = if args.memory {
        println!("{} Documents are kept in memory", "⚠️".yellow());
        AppState::with_submission_limit(registry, MemoryStore::new(), limit)
    } else {
        let storage_dir = config.get_storage_dir(cwd);
        println!("📁 Storage: {}", storage_dir.display());
        AppState::with_submission_limit(registry, FileStore::new(storage_dir), limit)
    };

    println!(
        "{} http://{}",
        "🚀 Formbuilder server on".bright_blue().bold(),
        addr
    );

    let runtime = tokio::runtime::Runtime::new().context("Cannot start async runtime")?;
    runtime
        .block_on(formbuilder_server::serve(state, addr))
        .with_context(|| format!("Server on {} stopped", addr))
}
