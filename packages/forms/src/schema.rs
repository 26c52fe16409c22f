use formbuilder_document::Document;
use formbuilder_renderer::{InputKind, PropsView, Registry};
use serde::Serialize;

/// One input a document collects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub node_id: String,
    /// Submission key
    pub name: String,
    pub label: String,
    pub required: bool,
    pub input: InputKind,
    /// Allowed values for choice inputs, empty otherwise
    pub options: Vec<String>,
}

impl FormField {
    pub fn is_choice(&self) -> bool {
        matches!(self.input, InputKind::Choice | InputKind::MultiChoice)
    }
}

/// Every form input of `document` in content order, read from props merged over defaults.
///
/// Nodes of unknown types, layout components and inputs with a blank `name` are skipped.
pub fn form_fields(registry: &Registry, document: &Document) -> Vec<FormField> {
    document
        .content
        .iter()
        .filter_map(|node| {
            let definition = registry.get(&node.component_type)?;
            let input = definition.input()?;

            let merged = definition.merge_props(&node.props);
            let props = PropsView::new(&merged, definition.default_props());
            let name = props.non_empty("name")?;

            let options = match input {
                InputKind::Choice | InputKind::MultiChoice => props
                    .records("options")
                    .into_iter()
                    .map(|option| PropsView::record(option).string("value"))
                    .collect(),
                _ => Vec::new(),
            };

            Some(FormField {
                node_id: node.id.clone(),
                label: props.non_empty("label").unwrap_or_else(|| name.clone()),
                name,
                required: props.bool("required"),
                input,
                options,
            })
        })
        .collect()
}
