use super::{read_document, resolve_path};
use crate::config::{Config, RegistryKind};
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use formbuilder_renderer::{validate_document, DocumentIssue, IssueLevel};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document JSON file
    pub document: PathBuf,

    /// Exit with an error when any error-level issue is found
    #[arg(long)]
    pub strict: bool,

    /// Component set (overrides config)
    #[arg(long, value_enum)]
    pub registry: Option<RegistryKind>,
}

pub fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = args.registry.unwrap_or(config.registry).build()?;
    let document = read_document(&resolve_path(cwd, &args.document))?;

    let issues = validate_document(&registry, &document);
    if issues.is_empty() {
        println!(
            "{} {} ({} nodes) has no issues",
            "✓".green(),
            args.document.display(),
            document.len()
        );
        return Ok(());
    }

    for issue in &issues {
        println!("  {}", format_issue(issue));
    }

    let errors = error_count(&issues);
    println!();
    println!(
        "{} {} issues ({} errors, {} warnings)",
        "⚠️".yellow(),
        issues.len(),
        errors,
        issues.len() - errors
    );

    if args.strict && errors > 0 {
        bail!("{} has {} error-level issues", args.document.display(), errors);
    }

    Ok(())
}

fn error_count(issues: &[DocumentIssue]) -> usize {
    issues
        .iter()
        .filter(|issue| issue.issue.level == IssueLevel::Error)
        .count()
}

fn format_issue(issue: &DocumentIssue) -> String {
    let level = match issue.issue.level {
        IssueLevel::Error => "error".red().bold(),
        IssueLevel::Warning => "warning".yellow(),
    };
    format!(
        "{} #{} {} ({}) {}: {}",
        level,
        issue.index,
        issue.node_id,
        issue.component_type,
        issue.issue.path,
        issue.issue.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn run(source: &str, strict: bool) -> Result<()> {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.json"), source).unwrap();
        validate(
            ValidateArgs {
                document: PathBuf::from("page.json"),
                strict,
                registry: None,
            },
            dir.path().to_str().unwrap(),
        )
    }

    const BROKEN: &str = r#"{
        "root": { "props": {} },
        "content": [ { "type": "Mystery", "id": "m", "props": {} } ]
    }"#;

    #[test]
    fn test_issues_are_advisory_by_default() {
        assert!(run(BROKEN, false).is_ok());
    }

    #[test]
    fn test_strict_fails_on_errors() {
        let err = run(BROKEN, true).unwrap_err();
        assert!(err.to_string().contains("1 error-level issues"));
    }

    #[test]
    fn test_clean_document() {
        let clean = r#"{ "root": { "props": { "title": "Ok" } }, "content": [
            { "type": "Text", "id": "t", "props": { "text": "hello" } }
        ] }"#;
        assert!(run(clean, true).is_ok());
    }
}
