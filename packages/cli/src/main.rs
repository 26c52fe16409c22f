mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    edit, init, render, serve, validate, EditArgs, InitArgs, RenderArgs, ServeArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Formbuilder CLI - render, edit and serve page and form documents
#[derive(Parser, Debug)]
#[command(name = "formbuilder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Formbuilder project
    Init(InitArgs),

    /// Render a document to HTML
    Render(RenderArgs),

    /// Report advisory prop issues in a document
    Validate(ValidateArgs),

    /// Apply a mutation script to a document
    Edit(EditArgs),

    /// Start the HTTP server
    Serve(ServeArgs),
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()
        .context("Cannot get current directory")?
        .display()
        .to_string();

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Edit(args) => edit(args, &cwd),
        Command::Serve(args) => serve(args, &cwd),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
