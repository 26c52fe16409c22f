use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use formbuilder_document::Document;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Storage directory
    #[arg(short, long, default_value = "data")]
    pub storage_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Formbuilder project...".bright_blue().bold());

    let config = Config {
        storage_dir: args.storage_dir,
        ..Config::default()
    };

    let storage_dir = config.get_storage_dir(cwd);
    if !storage_dir.exists() {
        fs::create_dir_all(&storage_dir)?;
        println!("  {} Created {}/", "✓".green(), config.storage_dir);
    }

    // Starter page a document editor can open right away
    let example_file = storage_dir.join("example.json");
    if !example_file.exists() {
        fs::write(&example_file, Document::new_page().to_json_pretty()?)?;
        println!("  {} Created {}/example.json", "✓".green(), config.storage_dir);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!("Run {} to start the server", "formbuilder serve".bright_white());

    Ok(())
}
