//! # Component Registry
//!
//! Ordered mapping from component type name to definition. Built once at startup and
//! shared read-only (typically behind an `Arc`) by the editor and both render call sites.
//! Registering an existing name replaces the definition in place.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::definition::{Category, ComponentDefinition};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    order: Vec<String>,
    components: HashMap<String, ComponentDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with `definitions`, in order
    pub fn with_definitions(definitions: impl IntoIterator<Item = ComponentDefinition>) -> Self {
        let mut registry = Self::new();
        registry.register_all(definitions);
        registry
    }

    /// Add or replace a definition. Returns the definition it replaced, if any.
    pub fn register(&mut self, definition: ComponentDefinition) -> Option<ComponentDefinition> {
        let name = definition.type_name().to_string();
        let previous = self.components.insert(name.clone(), definition);

        if previous.is_some() {
            debug!(component = %name, "Replaced component definition");
        } else {
            self.order.push(name);
        }

        previous
    }

    pub fn register_all(&mut self, definitions: impl IntoIterator<Item = ComponentDefinition>) {
        for definition in definitions {
            self.register(definition);
        }
    }

    pub fn resolve(&self, type_name: &str) -> Result<&ComponentDefinition, RegistryError> {
        self.components
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownComponentType(type_name.to_string()))
    }

    pub fn get(&self, type_name: &str) -> Option<&ComponentDefinition> {
        self.components.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.components.contains_key(type_name)
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.order
            .iter()
            .filter_map(move |name| self.components.get(name))
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &ComponentDefinition> {
        self.iter().filter(move |def| def.category() == category)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Editor-facing description of every component, in registration order
    pub fn schema(&self) -> Value {
        Value::Array(self.iter().map(ComponentDefinition::schema).collect())
    }
}
