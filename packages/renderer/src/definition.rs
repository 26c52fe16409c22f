//! # Component Definitions
//!
//! A definition describes one placeable block: its editable fields, default props and a
//! pure render function. Definitions are supplied by application code and registered once
//! at startup.
//!
//! ```rust,ignore
//! let heading = ComponentDefinition::builder("Heading")
//!     .field("text", FieldSpec::text())
//!     .field("align", FieldSpec::radio(options(&[("Left", "left"), ("Center", "center")])))
//!     .defaults(json!({ "text": "Heading", "align": "left" }))
//!     .render(|props| Ok(VNode::element("h2").with_child(VNode::text(props.string("text")))))
//!     .build()?;
//! ```

use std::fmt;
use std::sync::Arc;

use formbuilder_document::Props;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::field::{FieldSpec, Fields};
use crate::props::{merge_props, PropsView};
use crate::renderer::RenderError;
use crate::vdom::VNode;

/// Pure render function from merged props to output
pub type RenderFn = Arc<dyn Fn(&PropsView<'_>) -> Result<VNode, RenderError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Layout,
    Form,
}

/// What a form component collects on submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Text,
    Email,
    /// One value out of the `options` prop
    Choice,
    /// Any number of values out of the `options` prop
    MultiChoice,
    File,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DefinitionError {
    #[error("Component '{component}' has a default for undeclared field '{prop}'")]
    UndeclaredDefault { component: String, prop: String },

    #[error("Component '{component}' has no default for required field '{field}'")]
    MissingRequiredDefault { component: String, field: String },

    #[error("Component '{0}' has no render function")]
    MissingRender(String),

    #[error("Component '{0}' defaults must be a JSON object")]
    InvalidDefaults(String),
}

#[derive(Clone)]
pub struct ComponentDefinition {
    type_name: String,
    label: Option<String>,
    category: Category,
    input: Option<InputKind>,
    fields: Fields,
    default_props: Props,
    render: RenderFn,
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("type_name", &self.type_name)
            .field("category", &self.category)
            .field("input", &self.input)
            .field("fields", &self.fields.names())
            .field("default_props", &self.default_props)
            .finish_non_exhaustive()
    }
}

impl ComponentDefinition {
    pub fn builder(type_name: impl Into<String>) -> DefinitionBuilder {
        DefinitionBuilder::new(type_name)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Display label, defaulting to the type name
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.type_name)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn input(&self) -> Option<InputKind> {
        self.input
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn default_props(&self) -> &Props {
        &self.default_props
    }

    /// Node props shallow-merged over this definition's defaults
    pub fn merge_props(&self, props: &Props) -> Props {
        merge_props(&self.default_props, props)
    }

    /// Invoke the render function on already-merged props
    pub fn render_merged(&self, merged: &Props) -> Result<VNode, RenderError> {
        let view = PropsView::new(merged, &self.default_props);
        (self.render)(&view)
    }

    /// Merge `props` over the defaults and render
    pub fn render(&self, props: &Props) -> Result<VNode, RenderError> {
        let merged = self.merge_props(props);
        self.render_merged(&merged)
    }

    /// JSON description for editor clients
    pub fn schema(&self) -> Value {
        json!({
            "type": self.type_name,
            "label": self.label(),
            "category": self.category,
            "input": self.input,
            "fields": self.fields,
            "defaultProps": self.default_props,
        })
    }
}

pub struct DefinitionBuilder {
    type_name: String,
    label: Option<String>,
    category: Category,
    input: Option<InputKind>,
    fields: Fields,
    defaults: Result<Props, ()>,
    render: Option<RenderFn>,
}

impl DefinitionBuilder {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            label: None,
            category: Category::Layout,
            input: None,
            fields: Fields::new(),
            defaults: Ok(Props::new()),
            render: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Mark as a form component collecting `input` on submission
    pub fn input(mut self, input: InputKind) -> Self {
        self.category = Category::Form;
        self.input = Some(input);
        self
    }

    pub fn field(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.fields.insert(name, spec);
        self
    }

    pub fn fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    pub fn default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Ok(defaults) = &mut self.defaults {
            defaults.insert(name.into(), value.into());
        }
        self
    }

    /// Set all defaults from a JSON object
    pub fn defaults(mut self, defaults: Value) -> Self {
        self.defaults = match defaults {
            Value::Object(map) => Ok(map),
            _ => Err(()),
        };
        self
    }

    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&PropsView<'_>) -> Result<VNode, RenderError> + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn build(self) -> Result<ComponentDefinition, DefinitionError> {
        let default_props = self
            .defaults
            .map_err(|_| DefinitionError::InvalidDefaults(self.type_name.clone()))?;

        if let Some(prop) = default_props.keys().find(|key| !self.fields.contains(key)) {
            return Err(DefinitionError::UndeclaredDefault {
                component: self.type_name,
                prop: prop.clone(),
            });
        }

        if let Some((field, _)) = self
            .fields
            .iter()
            .find(|(name, spec)| spec.required && is_empty_value(default_props.get(*name)))
        {
            return Err(DefinitionError::MissingRequiredDefault {
                component: self.type_name.clone(),
                field: field.to_string(),
            });
        }

        let render = self
            .render
            .ok_or_else(|| DefinitionError::MissingRender(self.type_name.clone()))?;

        Ok(ComponentDefinition {
            type_name: self.type_name,
            label: self.label,
            category: self.category,
            input: self.input,
            fields: self.fields,
            default_props,
            render,
        })
    }
}

/// Missing, `null` or blank string
pub(crate) fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}
