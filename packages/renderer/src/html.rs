//! HTML serialization of rendered pages.
//!
//! Two modes share the same VNode output:
//!
//! - **Public**: form pages are wrapped in a `<form>`; placeholders and render errors
//!   become HTML comments so a broken node never shows up on a published page.
//! - **Canvas**: every top-level node is wrapped in a `data-node-id` container for
//!   selection in the editor; placeholders and errors are shown inline.

use crate::renderer::RenderedPage;
use crate::vdom::VNode;

const VOID_TAGS: &[&str] = &["area", "br", "col", "hr", "img", "input", "meta", "link", "source", "wbr"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlMode {
    Public,
    Canvas,
}

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub mode: HtmlMode,
    /// Emit `<!DOCTYPE html>` with head and body
    pub full_document: bool,
    /// Where the wrapping `<form>` posts to (public mode, form pages only)
    pub form_action: Option<String>,
    pub pretty: bool,
    pub indent: String,
}

impl HtmlOptions {
    pub fn public() -> Self {
        Self {
            mode: HtmlMode::Public,
            ..Self::default()
        }
    }

    pub fn canvas() -> Self {
        Self {
            mode: HtmlMode::Canvas,
            ..Self::default()
        }
    }

    pub fn with_form_action(mut self, action: impl Into<String>) -> Self {
        self.form_action = Some(action.into());
        self
    }

    pub fn fragment(mut self) -> Self {
        self.full_document = false;
        self
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            mode: HtmlMode::Public,
            full_document: true,
            form_action: None,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'o> {
    options: &'o HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'o> Context<'o> {
    fn new(options: &'o HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&self.options.indent);
            }
        }
        self.buffer.push_str(text);
        if self.options.pretty {
            self.buffer.push('\n');
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize `page` to HTML
pub fn to_html(page: &RenderedPage, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    let title = page.title.as_deref().unwrap_or("");

    if options.full_document {
        ctx.add_line("<!DOCTYPE html>");
        ctx.add_line("<html>");
        ctx.indent();
        ctx.add_line("<head>");
        ctx.indent();
        ctx.add_line("<meta charset=\"utf-8\">");
        ctx.add_line(&format!("<title>{}</title>", escape_text(title)));
        ctx.dedent();
        ctx.add_line("</head>");
        ctx.add_line("<body>");
        ctx.indent();
    }

    let wrap_in_form = options.mode == HtmlMode::Public && page.has_form;
    if wrap_in_form {
        let action = options.form_action.as_deref().unwrap_or("");
        ctx.add_line(&format!(
            "<form method=\"post\" action=\"{}\">",
            escape_attr(action)
        ));
        ctx.indent();
    }

    for node in &page.nodes {
        match options.mode {
            HtmlMode::Canvas => {
                ctx.add_line(&format!(
                    "<div data-node-id=\"{}\" data-component=\"{}\">",
                    escape_attr(&node.id),
                    escape_attr(&node.component_type)
                ));
                ctx.indent();
                write_node(&node.vnode, &mut ctx);
                ctx.dedent();
                ctx.add_line("</div>");
            }
            HtmlMode::Public => write_node(&node.vnode, &mut ctx),
        }
    }

    if wrap_in_form {
        ctx.dedent();
        ctx.add_line("</form>");
    }

    if options.full_document {
        ctx.dedent();
        ctx.add_line("</body>");
        ctx.dedent();
        ctx.add_line("</html>");
    }

    ctx.get_output()
}

/// Serialize a single VNode (public-mode semantics for placeholders and errors)
pub fn vnode_to_html(node: &VNode, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    write_node(node, &mut ctx);
    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context<'_>) {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
        } => {
            let mut open = format!("<{}", tag);
            for (key, value) in attributes {
                if value.is_empty() {
                    open.push_str(&format!(" {}", key));
                } else {
                    open.push_str(&format!(" {}=\"{}\"", key, escape_attr(value)));
                }
            }
            if !styles.is_empty() {
                let style = styles
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v))
                    .collect::<Vec<_>>()
                    .join("; ");
                open.push_str(&format!(" style=\"{}\"", escape_attr(&style)));
            }
            open.push('>');

            if VOID_TAGS.contains(&tag.as_str()) {
                ctx.add_line(&open);
                return;
            }

            // Text-only elements stay on one line
            if children.iter().all(|child| matches!(child, VNode::Text { .. })) {
                let text: String = children
                    .iter()
                    .map(|child| escape_text(&child.text_content()))
                    .collect();
                ctx.add_line(&format!("{}{}</{}>", open, text, tag));
                return;
            }

            ctx.add_line(&open);
            ctx.indent();
            for child in children {
                write_node(child, ctx);
            }
            ctx.dedent();
            ctx.add_line(&format!("</{}>", tag));
        }

        VNode::Text { content } => ctx.add_line(&escape_text(content)),

        VNode::Placeholder { component_type } => match ctx.options.mode {
            HtmlMode::Public => ctx.add_line(&format!(
                "<!-- unknown component: {} -->",
                escape_comment(component_type)
            )),
            HtmlMode::Canvas => ctx.add_line(&format!(
                "<div class=\"fb-placeholder\">Unknown component: {}</div>",
                escape_text(component_type)
            )),
        },

        VNode::Error {
            component_type,
            message,
        } => match ctx.options.mode {
            HtmlMode::Public => ctx.add_line(&format!(
                "<!-- {} failed to render -->",
                escape_comment(component_type)
            )),
            HtmlMode::Canvas => ctx.add_line(&format!(
                "<div class=\"fb-render-error\" role=\"alert\">{}: {}</div>",
                escape_text(component_type),
                escape_text(message)
            )),
        },
    }
}

pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;").replace('\'', "&#39;")
}

fn escape_comment(text: &str) -> String {
    text.replace("--", "- -").replace('>', "&gt;")
}
