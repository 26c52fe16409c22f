pub mod edit;
pub mod init;
pub mod render;
pub mod serve;
pub mod validate;

pub use edit::{edit, EditArgs};
pub use init::{init, InitArgs};
pub use render::{render, RenderArgs};
pub use serve::{serve, ServeArgs};
pub use validate::{validate, ValidateArgs};

use anyhow::{Context, Result};
use formbuilder_document::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// Resolve `path` against the working directory
fn resolve_path(cwd: &str, path: &Path) -> PathBuf {
    Path::new(cwd).join(path)
}

fn read_document(path: &Path) -> Result<Document> {
    let source =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Document::from_json(&source).with_context(|| format!("Invalid document {}", path.display()))
}

fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents).with_context(|| format!("Cannot write {}", path.display()))
}
