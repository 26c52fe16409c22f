use super::{read_document, resolve_path, write_output};
use crate::config::{Config, RegistryKind};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use formbuilder_document::Document;
use formbuilder_renderer::{
    html::{to_html, HtmlOptions},
    Registry, Renderer,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Document JSON file
    pub document: PathBuf,

    /// Annotate nodes for the editor canvas instead of the public page
    #[arg(long)]
    pub canvas: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Where form pages post to
    #[arg(long)]
    pub form_action: Option<String>,

    /// Component set (overrides config)
    #[arg(long, value_enum)]
    pub registry: Option<RegistryKind>,
}

pub fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = args.registry.unwrap_or(config.registry).build()?;
    let document = read_document(&resolve_path(cwd, &args.document))?;

    let html = render_html(&document, &registry, &args);

    match &args.out {
        Some(out) => {
            let out = resolve_path(cwd, out);
            write_output(&out, &html)?;
            println!(
                "{} {} → {}",
                "✓".green(),
                args.document.display(),
                out.display()
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}

fn render_html(document: &Document, registry: &Registry, args: &RenderArgs) -> String {
    let page = Renderer::new(registry).render(document);

    let skipped = page.placeholder_count() + page.error_count();
    debug!(nodes = page.len(), skipped, canvas = args.canvas, "Rendered document");
    if skipped > 0 {
        eprintln!(
            "{} {} of {} nodes could not be rendered",
            "⚠️".yellow(),
            skipped,
            page.len()
        );
    }

    let mut options = if args.canvas {
        HtmlOptions::canvas()
    } else {
        HtmlOptions::public()
    };
    if let Some(action) = &args.form_action {
        options = options.with_form_action(action.clone());
    }

    to_html(&page, &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONTACT: &str = r#"{
        "root": { "props": { "title": "Contact" } },
        "content": [
            { "type": "Heading", "id": "h", "props": { "text": "Say hi" } },
            { "type": "EmailInput", "id": "e", "props": {} }
        ]
    }"#;

    fn args(out: &str) -> RenderArgs {
        RenderArgs {
            document: PathBuf::from("contact.json"),
            canvas: false,
            out: Some(PathBuf::from(out)),
            form_action: Some("/f/contact".to_string()),
            registry: None,
        }
    }

    #[test]
    fn test_render_public_page() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("contact.json"), CONTACT).unwrap();

        render(args("dist/contact.html"), cwd).unwrap();

        let html = fs::read_to_string(dir.path().join("dist/contact.html")).unwrap();
        assert!(html.contains("Say hi"));
        assert!(html.contains(r#"<form method="post" action="/f/contact">"#));
    }

    #[test]
    fn test_render_canvas_with_layout_registry() {
        let dir = tempfile::tempdir().unwrap();
        let cwd = dir.path().to_str().unwrap();
        fs::write(dir.path().join("contact.json"), CONTACT).unwrap();

        render(
            RenderArgs {
                canvas: true,
                registry: Some(RegistryKind::Layout),
                ..args("canvas.html")
            },
            cwd,
        )
        .unwrap();

        let html = fs::read_to_string(dir.path().join("canvas.html")).unwrap();
        assert!(html.contains(r#"data-node-id="h""#));
        // EmailInput is unknown to the layout registry and shows as a placeholder
        assert!(html.contains(r#"data-component="EmailInput""#));
        assert!(!html.contains("type=\"email\""));
    }

    #[test]
    fn test_render_missing_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = render(args("out.html"), dir.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Cannot read"));
    }
}
