//! # Content Tree
//!
//! `Document` is exclusively owned by whatever persists it (a page path or a form record).
//! It is created empty, mutated wholesale during an edit session and replaced as a whole
//! on save. Props are a dynamic value bag; nothing here checks them against a component's
//! field spec.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{DocumentError, DocumentResult, IdGenerator};

/// Dynamically typed props bag
pub type Props = Map<String, Value>;

/// Title given to documents created for keys with nothing stored
pub const DEFAULT_PAGE_TITLE: &str = "New Page";

/// One placed component instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireNode")]
pub struct ContentNode {
    #[serde(rename = "type")]
    pub component_type: String,

    /// Stable identity; empty until assigned by `Document::backfill_ids`
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,

    pub props: Props,
}

/// Node as it may arrive over the wire: the id can be top-level, inside props, or absent.
#[derive(Deserialize)]
struct WireNode {
    #[serde(rename = "type")]
    component_type: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    props: Props,
}

impl From<WireNode> for ContentNode {
    fn from(wire: WireNode) -> Self {
        let mut props = wire.props;

        // A string `props.id` is only an id when there is no top-level one
        let id = match wire.id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => match props.remove("id") {
                Some(Value::String(id)) => id,
                Some(other) => {
                    props.insert("id".to_string(), other);
                    String::new()
                }
                None => String::new(),
            },
        };

        Self {
            component_type: wire.component_type,
            id,
            props,
        }
    }
}

impl ContentNode {
    pub fn new(component_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            id: id.into(),
            props: Props::new(),
        }
    }

    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// Root-level props (page chrome such as the title)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Root {
    #[serde(default)]
    pub props: Props,
}

/// Persisted content tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub root: Root,

    #[serde(default)]
    pub content: Vec<ContentNode>,
}

impl Document {
    /// Empty document whose root carries `title`
    pub fn empty(title: impl Into<String>) -> Self {
        let mut props = Props::new();
        props.insert("title".to_string(), Value::String(title.into()));

        Self {
            root: Root { props },
            content: Vec::new(),
        }
    }

    /// Document substituted when nothing is stored for a key
    pub fn new_page() -> Self {
        Self::empty(DEFAULT_PAGE_TITLE)
    }

    /// Parse the wire format. Nodes without ids are left with empty ids;
    /// call [`Document::backfill_ids`] before editing.
    pub fn from_json(source: &str) -> DocumentResult<Self> {
        let value: Value = serde_json::from_str(source)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> DocumentResult<Self> {
        if !value.is_object() {
            return Err(DocumentError::invalid_shape("document must be a JSON object"));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> DocumentResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Root title, if it is a string
    pub fn title(&self) -> Option<&str> {
        self.root.props.get("title").and_then(Value::as_str)
    }

    pub fn find_node(&self, id: &str) -> Option<&ContentNode> {
        if id.is_empty() {
            return None;
        }
        self.content.iter().find(|node| node.id == id)
    }

    pub fn find_node_mut(&mut self, id: &str) -> Option<&mut ContentNode> {
        if id.is_empty() {
            return None;
        }
        self.content.iter_mut().find(|node| node.id == id)
    }

    /// Index of the node with `id` in content order
    pub fn position(&self, id: &str) -> Option<usize> {
        if id.is_empty() {
            return None;
        }
        self.content.iter().position(|node| node.id == id)
    }

    pub fn node_ids(&self) -> Vec<&str> {
        self.content.iter().map(|node| node.id.as_str()).collect()
    }

    /// Assign ids to nodes that have none, and re-assign duplicates after the first.
    ///
    /// Returns the number of nodes that received a new id. Nodes with a unique id are
    /// never touched.
    pub fn backfill_ids(&mut self, ids: &mut IdGenerator) -> usize {
        let mut seen = std::collections::HashSet::new();
        let mut needs_id = Vec::new();

        for (index, node) in self.content.iter().enumerate() {
            if node.id.is_empty() || !seen.insert(node.id.clone()) {
                needs_id.push(index);
            }
        }

        for &index in &needs_id {
            let component_type = self.content[index].component_type.clone();
            let id = ids.fresh_id(&component_type, self);
            self.content[index].id = id;
        }

        needs_id.len()
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
