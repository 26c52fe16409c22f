//! # Edit Session
//!
//! One editor's mutable view of a document, bound to the registry it validates against.
//!
//! Every operation is resolved into a concrete [`Mutation`] (type checked, defaults
//! filled, id assigned) before it touches the document, so the undo history only ever
//! holds mutations that can be replayed without the registry.

use std::sync::Arc;

use formbuilder_document::{ContentNode, Document, IdGenerator, Props};
use formbuilder_renderer::{validate_document, DocumentIssue, Registry};
use serde_json::Value;
use tracing::debug;

use crate::{EditorError, Mutation, MutationError, UndoStack};

pub struct EditSession {
    document: Document,
    registry: Arc<Registry>,
    ids: IdGenerator,
    history: UndoStack,
    /// Bumped by every change, undo and redo
    version: u64,
    saved_version: u64,
}

impl EditSession {
    /// Open `document` for editing. Nodes without an id (or sharing one) get fresh ids.
    pub fn new(document: Document, registry: Arc<Registry>) -> Self {
        let ids = IdGenerator::new(document.title().unwrap_or_default());
        Self::with_ids(document, registry, ids)
    }

    /// Like [`EditSession::new`] with a fixed id seed, for reproducible ids
    pub fn with_id_seed(document: Document, registry: Arc<Registry>, seed: &str) -> Self {
        Self::with_ids(document, registry, IdGenerator::from_seed(seed))
    }

    fn with_ids(mut document: Document, registry: Arc<Registry>, mut ids: IdGenerator) -> Self {
        let assigned = document.backfill_ids(&mut ids);
        if assigned > 0 {
            debug!(assigned, "Assigned ids to nodes");
        }

        Self {
            document,
            registry,
            ids,
            history: UndoStack::new(),
            version: 0,
            saved_version: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Snapshot of the current tree for persistence. Later edits never affect it.
    pub fn serialize(&self) -> Document {
        self.document.clone()
    }

    /// Insert a component of `component_type` at `index` (clamped to `[0, len]`).
    ///
    /// Omitted props are filled from the component defaults. Returns the new node's id.
    pub fn insert_node(
        &mut self,
        component_type: &str,
        index: usize,
        initial_props: Props,
    ) -> Result<String, MutationError> {
        let node = ContentNode::new(component_type, String::new()).with_props(initial_props);
        let mutation = self.resolve(Mutation::InsertNode { index, node })?;
        let id = mutation.node_id().unwrap_or_default().to_string();
        self.commit(mutation)?;
        Ok(id)
    }

    /// Shallow-merge `partial_props` into the node's props
    pub fn update_node_props(&mut self, id: &str, partial_props: Props) -> Result<(), MutationError> {
        self.commit(Mutation::UpdateNodeProps {
            node_id: id.to_string(),
            props: partial_props,
        })
    }

    /// Set a single prop on a node
    pub fn set_prop(
        &mut self,
        id: &str,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), MutationError> {
        let mut props = Props::new();
        props.insert(key.into(), value.into());
        self.update_node_props(id, props)
    }

    pub fn move_node(&mut self, id: &str, to_index: usize) -> Result<(), MutationError> {
        self.commit(Mutation::MoveNode {
            node_id: id.to_string(),
            index: to_index,
        })
    }

    /// Remove a node. Returns whether anything was removed; absent ids are not an error.
    pub fn delete_node(&mut self, id: &str) -> bool {
        let mutation = Mutation::DeleteNode {
            node_id: id.to_string(),
        };
        match self.history.record(&mutation, &mut self.document) {
            Ok(true) => {
                self.changed(&mutation);
                true
            }
            _ => false,
        }
    }

    /// Insert a copy of a node (same type and props, fresh id) right after it
    pub fn duplicate_node(&mut self, id: &str) -> Result<String, MutationError> {
        let index = self
            .document
            .position(id)
            .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))?;

        let source = &self.document.content[index];
        let new_id = self.ids.fresh_id(&source.component_type, &self.document);
        let node = ContentNode::new(source.component_type.clone(), new_id.clone())
            .with_props(source.props.clone());

        self.commit(Mutation::InsertNode {
            index: index + 1,
            node,
        })?;
        Ok(new_id)
    }

    /// Shallow-merge `props` into the root props
    pub fn set_root_props(&mut self, props: Props) {
        let mutation = Mutation::UpdateRootProps { props };
        if self.history.record(&mutation, &mut self.document).is_ok() {
            self.changed(&mutation);
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let mut props = Props::new();
        props.insert("title".to_string(), Value::String(title.into()));
        self.set_root_props(props);
    }

    /// Apply a mutation received from a client or an edit script
    pub fn apply(&mut self, mutation: Mutation) -> Result<(), MutationError> {
        let mutation = self.resolve(mutation)?;
        self.commit(mutation)
    }

    /// Apply a JSON array of mutations as one undo step. Nothing is applied if any
    /// mutation fails. Returns the number of mutations applied.
    ///
    /// Inside an open batch the script joins that batch, and a failure only reverts the
    /// script's own mutations.
    pub fn apply_script(&mut self, script: &str) -> Result<usize, EditorError> {
        let mutations: Vec<Mutation> = serde_json::from_str(script)?;
        let count = mutations.len();
        let version = self.version;

        self.history.begin_group(None);
        let mark = self.history.mark();
        for mutation in mutations {
            if let Err(e) = self.apply(mutation) {
                let rolled_back = self.history.rollback_to(mark, &mut self.document);
                self.history.end_group();
                self.version = version;
                rolled_back?;
                return Err(e.into());
            }
        }
        self.history.end_group();

        Ok(count)
    }

    /// Group the following edits into one undo step until [`EditSession::end_batch`].
    /// Batches nest; the outermost one names the step.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_group(Some(description.into()));
    }

    pub fn end_batch(&mut self) {
        self.history.end_group();
    }

    pub fn undo(&mut self) -> Result<bool, MutationError> {
        let undone = self.history.undo(&mut self.document)?;
        if undone {
            self.version += 1;
        }
        Ok(undone)
    }

    pub fn redo(&mut self) -> Result<bool, MutationError> {
        let redone = self.history.redo(&mut self.document)?;
        if redone {
            self.version += 1;
        }
        Ok(redone)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Name of the batch the next undo reverts, for the editor's undo button
    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    /// Advisory issues for the current tree; never blocks an edit
    pub fn validate(&self) -> Vec<DocumentIssue> {
        validate_document(&self.registry, &self.document)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether there are changes since the session opened or was last marked saved
    pub fn is_dirty(&self) -> bool {
        self.version != self.saved_version
    }

    pub fn mark_saved(&mut self) {
        self.saved_version = self.version;
    }

    /// Turn a requested mutation into the concrete one that gets recorded
    fn resolve(&mut self, mutation: Mutation) -> Result<Mutation, MutationError> {
        match mutation {
            Mutation::InsertNode { index, mut node } => {
                let definition = self
                    .registry
                    .get(&node.component_type)
                    .ok_or_else(|| MutationError::UnknownComponentType(node.component_type.clone()))?;

                node.props = definition.merge_props(&node.props);
                if node.id.is_empty() || self.document.find_node(&node.id).is_some() {
                    node.id = self.ids.fresh_id(&node.component_type, &self.document);
                }

                Ok(Mutation::InsertNode {
                    index: index.min(self.document.len()),
                    node,
                })
            }
            other => Ok(other),
        }
    }

    fn commit(&mut self, mutation: Mutation) -> Result<(), MutationError> {
        if self.history.record(&mutation, &mut self.document)? {
            self.changed(&mutation);
        }
        Ok(())
    }

    fn changed(&mut self, mutation: &Mutation) {
        self.version += 1;
        debug!(
            kind = mutation.kind(),
            node_id = mutation.node_id().unwrap_or(""),
            version = self.version,
            "Applied mutation"
        );
    }
}
