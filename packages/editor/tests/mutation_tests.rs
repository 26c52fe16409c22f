//! Edit session operations against the built-in component registry

use std::sync::Arc;

use formbuilder_components::full_registry;
use formbuilder_document::{Document, Props};
use formbuilder_editor::{EditSession, Mutation, MutationError};
use serde_json::json;

fn session() -> EditSession {
    let registry = Arc::new(full_registry().unwrap());
    EditSession::with_id_seed(Document::new_page(), registry, "test")
}

fn props(value: serde_json::Value) -> Props {
    value.as_object().cloned().unwrap_or_default()
}

fn types(doc: &Document) -> Vec<&str> {
    doc.content
        .iter()
        .map(|node| node.component_type.as_str())
        .collect()
}

#[test]
fn test_move_scenario() {
    let mut session = session();

    let heading = session.insert_node("Heading", 0, Props::new()).unwrap();
    let text = session.insert_node("Text", 1, Props::new()).unwrap();
    let before = session.serialize();

    session.move_node(&heading, 1).unwrap();
    let after = session.serialize();

    assert_eq!(types(&after), vec!["Text", "Heading"]);
    assert_eq!(after.node_ids(), vec![text.as_str(), heading.as_str()]);
    assert_eq!(after.find_node(&heading), before.find_node(&heading));
    assert_eq!(after.find_node(&text), before.find_node(&text));
}

#[test]
fn test_insert_fills_defaults_and_assigns_unique_ids() {
    let mut session = session();

    let a = session
        .insert_node("Heading", 0, props(json!({ "text": "Contact us" })))
        .unwrap();
    let b = session.insert_node("Heading", 0, Props::new()).unwrap();

    assert_ne!(a, b);
    let node = session.document().find_node(&a).unwrap();
    assert_eq!(node.props["text"], json!("Contact us"));
    assert_eq!(node.props["size"], json!("2xl"));
    assert_eq!(node.props["align"], json!("left"));
    assert_eq!(session.document().node_ids(), vec![b.as_str(), a.as_str()]);
}

#[test]
fn test_insert_unknown_type_fails() {
    let mut session = session();

    let result = session.insert_node("DoesNotExist", 0, Props::new());

    assert_eq!(
        result,
        Err(MutationError::UnknownComponentType("DoesNotExist".to_string()))
    );
    assert!(session.document().is_empty());
    assert!(!session.is_dirty());
}

#[test]
fn test_insert_index_is_clamped() {
    let mut session = session();

    session.insert_node("Text", 0, Props::new()).unwrap();
    let last = session.insert_node("Card", 99, Props::new()).unwrap();

    assert_eq!(session.document().content[1].id, last);
}

#[test]
fn test_update_merges_without_resetting() {
    let mut session = session();
    let id = session.insert_node("Text", 0, Props::new()).unwrap();

    session
        .update_node_props(&id, props(json!({ "color": "muted" })))
        .unwrap();
    session
        .update_node_props(&id, props(json!({ "size": "lg" })))
        .unwrap();

    let node = session.document().find_node(&id).unwrap();
    assert_eq!(node.props["color"], json!("muted"));
    assert_eq!(node.props["size"], json!("lg"));
    assert_eq!(node.props["text"], json!("Text content"));
}

#[test]
fn test_update_and_move_missing_node_fail() {
    let mut session = session();

    assert_eq!(
        session.update_node_props("missing", Props::new()),
        Err(MutationError::NodeNotFound("missing".to_string()))
    );
    assert_eq!(
        session.move_node("missing", 0),
        Err(MutationError::NodeNotFound("missing".to_string()))
    );
}

#[test]
fn test_delete_is_idempotent() {
    let mut session = session();
    let id = session.insert_node("Text", 0, Props::new()).unwrap();

    assert!(session.delete_node(&id));
    assert!(!session.delete_node(&id));
    assert!(session.document().is_empty());
}

#[test]
fn test_serialize_snapshot_is_isolated() {
    let mut session = session();
    let a = session.insert_node("Heading", 0, Props::new()).unwrap();
    let b = session.insert_node("Text", 1, Props::new()).unwrap();

    let before = session.serialize();
    session.set_prop(&b, "text", "Changed").unwrap();
    let after = session.serialize();

    assert_eq!(before.find_node(&a), after.find_node(&a));
    assert_ne!(before.find_node(&b), after.find_node(&b));
    assert_eq!(before.find_node(&b).unwrap().props["text"], json!("Text content"));
    assert_eq!(before.root, after.root);
}

#[test]
fn test_duplicate_node() {
    let mut session = session();
    let card = session
        .insert_node("Card", 0, props(json!({ "title": "Pricing" })))
        .unwrap();
    session.insert_node("Text", 1, Props::new()).unwrap();

    let copy = session.duplicate_node(&card).unwrap();

    let doc = session.document();
    assert_eq!(types(doc), vec!["Card", "Card", "Text"]);
    assert_eq!(doc.content[1].id, copy);
    assert_eq!(doc.content[1].props, doc.content[0].props);
    assert_eq!(
        session.duplicate_node("missing"),
        Err(MutationError::NodeNotFound("missing".to_string()))
    );
}

#[test]
fn test_invalid_props_are_accepted_and_reported() {
    let mut session = session();
    let id = session.insert_node("Heading", 0, Props::new()).unwrap();

    session.set_prop(&id, "size", "9xl").unwrap();

    let issues = session.validate();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].node_id, id);
    assert_eq!(issues[0].issue.path, "size");
}

#[test]
fn test_apply_serialized_mutation() {
    let mut session = session();
    let mutation: Mutation = serde_json::from_value(json!({
        "type": "insertNode",
        "index": 0,
        "node": { "type": "EmailInput", "props": { "name": "work_email" } }
    }))
    .unwrap();

    session.apply(mutation).unwrap();

    let node = &session.document().content[0];
    assert_eq!(node.id, "EmailInput-test-1");
    assert_eq!(node.props["name"], json!("work_email"));
    assert_eq!(node.props["required"], json!(true));
}
