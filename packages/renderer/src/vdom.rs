use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rendered output of one component
///
/// Attribute and style maps are ordered so the same props always serialize to the same
/// markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },

    /// Stand-in for a node whose component type is not registered
    Placeholder { component_type: String },

    /// Stand-in for a node whose render function failed
    Error {
        component_type: String,
        message: String,
    },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn placeholder(component_type: impl Into<String>) -> Self {
        VNode::Placeholder {
            component_type: component_type.into(),
        }
    }

    pub fn error(component_type: impl Into<String>, message: impl Into<String>) -> Self {
        VNode::Error {
            component_type: component_type.into(),
            message: message.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    /// Boolean attribute, present only when `on`
    pub fn with_flag(self, key: impl Into<String>, on: bool) -> Self {
        if on {
            self.with_attr(key, "")
        } else {
            self
        }
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        let class = class.into();
        let class = class.split_whitespace().collect::<Vec<_>>().join(" ");
        if class.is_empty() {
            return self;
        }
        self.with_attr("class", class)
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    /// Add a child only when `child` is `Some`
    pub fn with_optional_child(self, child: Option<VNode>) -> Self {
        match child {
            Some(child) => self.with_child(child),
            None => self,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(key).map(String::as_str),
            _ => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, VNode::Placeholder { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, VNode::Error { .. })
    }

    /// Concatenated text content of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Depth-first search for the first element with `tag`
    pub fn find_tag(&self, tag: &str) -> Option<&VNode> {
        if self.tag() == Some(tag) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find_tag(tag))
    }

    /// All descendant elements (including self) with `tag`, in document order
    pub fn find_all_tags<'a>(&'a self, tag: &str) -> Vec<&'a VNode> {
        let mut found = Vec::new();
        collect_tags(self, tag, &mut found);
        found
    }
}

fn collect_text(node: &VNode, out: &mut String) {
    match node {
        VNode::Text { content } => out.push_str(content),
        VNode::Element { children, .. } => {
            for child in children {
                collect_text(child, out);
            }
        }
        VNode::Placeholder { .. } | VNode::Error { .. } => {}
    }
}

fn collect_tags<'a>(node: &'a VNode, tag: &str, found: &mut Vec<&'a VNode>) {
    if node.tag() == Some(tag) {
        found.push(node);
    }
    for child in node.children() {
        collect_tags(child, tag, found);
    }
}
