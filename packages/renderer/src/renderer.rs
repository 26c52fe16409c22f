//! # Content Tree Renderer
//!
//! Walks a [`Document`] in content order, resolves each node against the [`Registry`] and
//! invokes the component's render function with its props merged over the defaults.
//!
//! ## Failure isolation
//!
//! Rendering a document never fails as a whole:
//!
//! - Unknown component type → `VNode::Placeholder` in the node's position, logged at `warn`
//! - Render function returns `Err` or panics → `VNode::Error` in the node's position,
//!   logged at `error`
//!
//! ## Determinism
//!
//! Output order equals `content` order: no reordering, no deduplication. Rendering the
//! same document twice yields identical output.

use std::panic::{self, AssertUnwindSafe};

use formbuilder_document::{ContentNode, Document};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::definition::Category;
use crate::registry::Registry;
use crate::vdom::VNode;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Component '{component}' failed to render: {message}")]
    RenderFailure { component: String, message: String },
}

impl RenderError {
    pub fn failure(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RenderFailure {
            component: component.into(),
            message: message.into(),
        }
    }
}

/// Output for one content node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNode {
    /// Id of the source node (may be empty for legacy documents)
    pub id: String,
    pub component_type: String,
    pub vnode: VNode,
}

/// Output for a whole document, in content order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPage {
    /// Root title carried through for page chrome
    pub title: Option<String>,
    pub nodes: Vec<RenderedNode>,
    /// Whether any resolved node is a form component
    pub has_form: bool,
}

impl RenderedPage {
    pub fn vnodes(&self) -> impl Iterator<Item = &VNode> {
        self.nodes.iter().map(|node| &node.vnode)
    }

    pub fn placeholder_count(&self) -> usize {
        self.vnodes().filter(|vnode| vnode.is_placeholder()).count()
    }

    pub fn error_count(&self) -> usize {
        self.vnodes().filter(|vnode| vnode.is_error()).count()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub struct Renderer<'r> {
    registry: &'r Registry,
}

impl<'r> Renderer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    #[instrument(skip_all, fields(nodes = document.content.len()))]
    pub fn render(&self, document: &Document) -> RenderedPage {
        let mut has_form = false;

        let nodes = document
            .content
            .iter()
            .map(|node| {
                if let Some(def) = self.registry.get(&node.component_type) {
                    has_form |= def.category() == Category::Form;
                }
                RenderedNode {
                    id: node.id.clone(),
                    component_type: node.component_type.clone(),
                    vnode: self.render_node(node),
                }
            })
            .collect();

        RenderedPage {
            title: document.title().map(String::from),
            nodes,
            has_form,
        }
    }

    /// Render one node, substituting a placeholder or error node on failure
    pub fn render_node(&self, node: &ContentNode) -> VNode {
        let definition = match self.registry.resolve(&node.component_type) {
            Ok(definition) => definition,
            Err(e) => {
                warn!(node_id = %node.id, "{}", e);
                return VNode::placeholder(&node.component_type);
            }
        };

        let merged = definition.merge_props(&node.props);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| definition.render_merged(&merged)));

        match outcome {
            Ok(Ok(vnode)) => vnode,
            Ok(Err(e)) => {
                error!(node_id = %node.id, "{}", e);
                VNode::error(&node.component_type, e.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(
                    node_id = %node.id,
                    component = %node.component_type,
                    "Render function panicked: {}",
                    message
                );
                VNode::error(&node.component_type, message)
            }
        }
    }
}

/// Render `document` against `registry`
pub fn render(document: &Document, registry: &Registry) -> RenderedPage {
    Renderer::new(registry).render(document)
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "render function panicked".to_string()
    }
}
