//! # Formbuilder Renderer
//!
//! Component registry and content tree renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ document: persisted Content Tree            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: Registry lookup + defaults merge  │
//! │  - resolve node type                        │
//! │  - shallow-merge props over defaults        │
//! │  - invoke render fn, isolate failures       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ VNode sequence → HTML (canvas or public)    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The same [`Registry`] is consulted by the editor (field schema, defaults) and by
//! both render call sites, so the edit canvas and the public page agree.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use formbuilder_renderer::{render, html, Registry};
//!
//! let registry: Registry = formbuilder_components::full_registry();
//! let page = render(&document, &registry);
//! let markup = html::to_html(&page, &html::HtmlOptions::public());
//! ```

pub mod definition;
pub mod field;
pub mod html;
pub mod props;
pub mod registry;
pub mod renderer;
pub mod validator;
pub mod vdom;

pub use definition::{
    Category, ComponentDefinition, DefinitionBuilder, DefinitionError, InputKind, RenderFn,
};
pub use field::{FieldKind, FieldOption, FieldSpec, Fields};
pub use props::{merge_props, PropsView};
pub use registry::{Registry, RegistryError};
pub use renderer::{render, RenderError, RenderedNode, RenderedPage, Renderer};
pub use validator::{validate_document, validate_props, DocumentIssue, FieldIssue, IssueLevel};
pub use vdom::VNode;
