//! # Content Tree Mutations
//!
//! Concrete operations on a [`Document`]. These are registry-free: an
//! [`EditSession`](crate::EditSession) resolves user intent (component type checks,
//! default props, fresh ids) into mutations before they are applied and recorded.
//!
//! ## Mutation Semantics
//!
//! ### InsertNode
//! - Inserts the node exactly as given at `index`, clamped to `[0, len]`
//!
//! ### UpdateNodeProps
//! - Shallow merge per top-level key; unspecified props are left alone
//!
//! ### MoveNode
//! - Removes and reinserts at `index` (clamped against the list without the node)
//! - Identity and props are untouched
//!
//! ### DeleteNode
//! - Idempotent: deleting an absent node is a no-op

use formbuilder_document::{ContentNode, Document, Props};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Edit operations on a content tree, serialized as `{"type": "moveNode", ...}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a node at index
    InsertNode { index: usize, node: ContentNode },

    /// Merge props into a node's existing props
    UpdateNodeProps { node_id: String, props: Props },

    /// Replace all of a node's props
    ReplaceNodeProps { node_id: String, props: Props },

    /// Move a node to a new index
    MoveNode { node_id: String, index: usize },

    /// Remove a node from the tree
    DeleteNode { node_id: String },

    /// Merge props into the root props
    UpdateRootProps { props: Props },

    /// Replace all root props
    ReplaceRootProps { props: Props },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),
}

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::InsertNode { index, node } => {
                let index = (*index).min(doc.content.len());
                doc.content.insert(index, node.clone());
            }

            Mutation::UpdateNodeProps { node_id, props } => {
                let node = find_mut(doc, node_id)?;
                for (key, value) in props {
                    node.props.insert(key.clone(), value.clone());
                }
            }

            Mutation::ReplaceNodeProps { node_id, props } => {
                find_mut(doc, node_id)?.props = props.clone();
            }

            Mutation::MoveNode { node_id, index } => {
                let from = position(doc, node_id)?;
                let node = doc.content.remove(from);
                let index = (*index).min(doc.content.len());
                doc.content.insert(index, node);
            }

            Mutation::DeleteNode { node_id } => {
                if let Some(index) = doc.position(node_id) {
                    doc.content.remove(index);
                }
            }

            Mutation::UpdateRootProps { props } => {
                for (key, value) in props {
                    doc.root.props.insert(key.clone(), value.clone());
                }
            }

            Mutation::ReplaceRootProps { props } => {
                doc.root.props = props.clone();
            }
        }

        Ok(())
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateNodeProps { node_id, .. }
            | Mutation::ReplaceNodeProps { node_id, .. }
            | Mutation::MoveNode { node_id, .. } => position(doc, node_id).map(|_| ()),

            Mutation::InsertNode { .. }
            | Mutation::DeleteNode { .. }
            | Mutation::UpdateRootProps { .. }
            | Mutation::ReplaceRootProps { .. } => Ok(()),
        }
    }

    /// Mutation that undoes `self` when applied right after it.
    ///
    /// Must be computed before `self` is applied. Returns `None` for mutations that would
    /// not change `doc` (deleting an absent node).
    pub fn to_inverse(&self, doc: &Document) -> Result<Option<Mutation>, MutationError> {
        self.validate(doc)?;

        let inverse = match self {
            Mutation::InsertNode { node, .. } => Some(Mutation::DeleteNode {
                node_id: node.id.clone(),
            }),

            Mutation::UpdateNodeProps { node_id, .. }
            | Mutation::ReplaceNodeProps { node_id, .. } => {
                let node = find(doc, node_id)?;
                Some(Mutation::ReplaceNodeProps {
                    node_id: node_id.clone(),
                    props: node.props.clone(),
                })
            }

            Mutation::MoveNode { node_id, .. } => Some(Mutation::MoveNode {
                node_id: node_id.clone(),
                index: position(doc, node_id)?,
            }),

            Mutation::DeleteNode { node_id } => doc.position(node_id).map(|index| {
                Mutation::InsertNode {
                    index,
                    node: doc.content[index].clone(),
                }
            }),

            Mutation::UpdateRootProps { .. } | Mutation::ReplaceRootProps { .. } => {
                Some(Mutation::ReplaceRootProps {
                    props: doc.root.props.clone(),
                })
            }
        };

        Ok(inverse)
    }

    /// Id of the node this mutation targets, if any
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Mutation::InsertNode { node, .. } => Some(&node.id),
            Mutation::UpdateNodeProps { node_id, .. }
            | Mutation::ReplaceNodeProps { node_id, .. }
            | Mutation::MoveNode { node_id, .. }
            | Mutation::DeleteNode { node_id } => Some(node_id),
            Mutation::UpdateRootProps { .. } | Mutation::ReplaceRootProps { .. } => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::InsertNode { .. } => "insertNode",
            Mutation::UpdateNodeProps { .. } => "updateNodeProps",
            Mutation::ReplaceNodeProps { .. } => "replaceNodeProps",
            Mutation::MoveNode { .. } => "moveNode",
            Mutation::DeleteNode { .. } => "deleteNode",
            Mutation::UpdateRootProps { .. } => "updateRootProps",
            Mutation::ReplaceRootProps { .. } => "replaceRootProps",
        }
    }
}

fn position(doc: &Document, node_id: &str) -> Result<usize, MutationError> {
    doc.position(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
}

fn find<'d>(doc: &'d Document, node_id: &str) -> Result<&'d ContentNode, MutationError> {
    doc.find_node(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
}

fn find_mut<'d>(doc: &'d mut Document, node_id: &str) -> Result<&'d mut ContentNode, MutationError> {
    doc.find_node_mut(node_id)
        .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc() -> Document {
        let mut doc = Document::new_page();
        doc.content.push(ContentNode::new("Heading", "h").with_prop("text", "Hi"));
        doc.content.push(ContentNode::new("Text", "t"));
        doc
    }

    fn props(value: serde_json::Value) -> Props {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::MoveNode {
            node_id: "h".to_string(),
            index: 1,
        };

        let json = serde_json::to_value(&mutation).unwrap();
        assert_eq!(json, json!({ "type": "moveNode", "nodeId": "h", "index": 1 }));

        let deserialized: Mutation = serde_json::from_value(json).unwrap();
        assert_eq!(mutation, deserialized);
    }

    #[test]
    fn test_insert_node_reads_wire_node() {
        let mutation: Mutation = serde_json::from_value(json!({
            "type": "insertNode",
            "index": 0,
            "node": { "type": "Heading", "props": { "text": "New" } }
        }))
        .unwrap();

        match mutation {
            Mutation::InsertNode { index, node } => {
                assert_eq!(index, 0);
                assert_eq!(node.component_type, "Heading");
                assert!(node.id.is_empty());
            }
            other => panic!("Expected InsertNode, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_missing_nodes() {
        let doc = doc();
        let mutation = Mutation::UpdateNodeProps {
            node_id: "".to_string(),
            props: Props::new(),
        };

        assert_eq!(
            mutation.validate(&doc),
            Err(MutationError::NodeNotFound("".to_string()))
        );
    }

    #[test]
    fn test_update_is_shallow_merge() {
        let mut doc = doc();
        Mutation::UpdateNodeProps {
            node_id: "h".to_string(),
            props: props(json!({ "size": "xl" })),
        }
        .apply(&mut doc)
        .unwrap();

        let node = doc.find_node("h").unwrap();
        assert_eq!(node.props, props(json!({ "text": "Hi", "size": "xl" })));
    }

    #[test]
    fn test_inverses_restore_document() {
        let mutations = vec![
            Mutation::UpdateNodeProps {
                node_id: "h".to_string(),
                props: props(json!({ "text": "Changed", "align": "center" })),
            },
            Mutation::MoveNode {
                node_id: "h".to_string(),
                index: 5,
            },
            Mutation::DeleteNode {
                node_id: "t".to_string(),
            },
            Mutation::InsertNode {
                index: 0,
                node: ContentNode::new("Card", "c"),
            },
            Mutation::UpdateRootProps {
                props: props(json!({ "title": "Renamed" })),
            },
        ];

        for mutation in mutations {
            let mut doc = doc();
            let before = doc.clone();

            let inverse = mutation.to_inverse(&doc).unwrap().unwrap();
            mutation.apply(&mut doc).unwrap();
            assert_ne!(doc, before, "{} should change the document", mutation.kind());

            inverse.apply(&mut doc).unwrap();
            assert_eq!(doc, before, "{} inverse should restore it", mutation.kind());
        }
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let mut doc = doc();
        let mutation = Mutation::DeleteNode {
            node_id: "missing".to_string(),
        };

        assert_eq!(mutation.to_inverse(&doc).unwrap(), None);
        mutation.apply(&mut doc).unwrap();
        assert_eq!(doc.len(), 2);
    }
}
