/// Advisory validation of props against field specs.
///
/// Issues are surfaced to a human in the editor. Nothing here rejects a document:
/// invalid values are legal in the content tree and the renderer tolerates them.
use std::collections::HashSet;

use formbuilder_document::{Document, Props};
use serde::Serialize;
use serde_json::Value;

use crate::definition::is_empty_value;
use crate::field::{FieldKind, FieldSpec, Fields};
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Worth a look, renders fine
    Warning,
    /// Will render in a default or empty state
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub level: IssueLevel,
    /// Prop path, e.g. `options[1].value`
    pub path: String,
    pub message: String,
}

impl FieldIssue {
    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }

    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Issue attached to a node of a document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentIssue {
    pub node_id: String,
    pub index: usize,
    pub component_type: String,
    #[serde(flatten)]
    pub issue: FieldIssue,
}

/// Check `props` against `fields`
pub fn validate_props(fields: &Fields, props: &Props) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    check_record(fields, props, "", &mut issues);
    issues
}

/// Check every node of `document`: unknown types, missing or duplicate ids, and each
/// node's props (merged over defaults) against its fields.
pub fn validate_document(registry: &Registry, document: &Document) -> Vec<DocumentIssue> {
    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();

    for (index, node) in document.content.iter().enumerate() {
        let mut attach = |issue: FieldIssue| {
            issues.push(DocumentIssue {
                node_id: node.id.clone(),
                index,
                component_type: node.component_type.clone(),
                issue,
            });
        };

        if node.id.is_empty() {
            attach(FieldIssue::warning("id", "Node has no id"));
        } else if !seen_ids.insert(node.id.as_str()) {
            attach(FieldIssue::error("id", format!("Duplicate node id '{}'", node.id)));
        }

        match registry.get(&node.component_type) {
            Some(definition) => {
                let merged = definition.merge_props(&node.props);
                for issue in validate_props(definition.fields(), &merged) {
                    attach(issue);
                }
            }
            None => attach(FieldIssue::error(
                "type",
                format!("Unknown component type '{}'", node.component_type),
            )),
        }
    }

    issues
}

fn check_record(fields: &Fields, props: &Props, prefix: &str, issues: &mut Vec<FieldIssue>) {
    let path_of = |name: &str| {
        if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", prefix, name)
        }
    };

    for (name, spec) in fields.iter() {
        let value = props.get(name);
        let path = path_of(name);

        if is_empty_value(value) {
            if spec.required {
                issues.push(FieldIssue::error(path, "Required value is empty"));
            }
            continue;
        }

        if let Some(value) = value {
            check_value(spec, value, &path, issues);
        }
    }

    for key in props.keys() {
        if !fields.contains(key) {
            issues.push(FieldIssue::warning(path_of(key), "Prop is not declared by any field"));
        }
    }
}

fn check_value(spec: &FieldSpec, value: &Value, path: &str, issues: &mut Vec<FieldIssue>) {
    match &spec.kind {
        FieldKind::Text | FieldKind::Textarea => {
            if !value.is_string() {
                issues.push(FieldIssue::warning(path, "Expected text"));
            }
        }

        FieldKind::Number { min, max } => match value.as_f64() {
            Some(n) => {
                if min.map_or(false, |min| n < min) || max.map_or(false, |max| n > max) {
                    issues.push(FieldIssue::error(path, format!("{} is out of range", n)));
                }
            }
            None => issues.push(FieldIssue::warning(path, "Expected a number")),
        },

        FieldKind::Select { options } | FieldKind::Radio { options } => {
            if !options.iter().any(|option| option.value == *value) {
                issues.push(FieldIssue::error(
                    path,
                    format!("{} is not one of the field's options", value),
                ));
            }
        }

        FieldKind::Array { item_fields, .. } => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    match item {
                        Value::Object(record) => {
                            check_record(item_fields, record, &item_path, issues)
                        }
                        _ => issues.push(FieldIssue::error(item_path, "Expected a record")),
                    }
                }
            }
            _ => issues.push(FieldIssue::error(path, "Expected a list")),
        },
    }
}
