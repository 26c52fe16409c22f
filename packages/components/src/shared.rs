use formbuilder_renderer::field::options;
use formbuilder_renderer::{FieldOption, FieldSpec, Fields, PropsView, VNode};
use serde_json::{json, Map, Value};

pub(crate) const ALIGNS: &[&str] = &["left", "center", "right"];

pub(crate) fn align_field() -> FieldSpec {
    FieldSpec::radio(options(&[
        ("Left", "left"),
        ("Center", "center"),
        ("Right", "right"),
    ]))
}

pub(crate) fn justify_class(align: &str) -> &'static str {
    match align {
        "center" => "justify-center",
        "right" => "justify-end",
        _ => "justify-start",
    }
}

pub(crate) fn required_field() -> FieldSpec {
    FieldSpec::radio(vec![
        FieldOption::new("Required", true),
        FieldOption::new("Optional", false),
    ])
}

pub(crate) fn option_list_field() -> FieldSpec {
    FieldSpec::array(
        Fields::new()
            .with("label", FieldSpec::text())
            .with("value", FieldSpec::text()),
        record(json!({ "label": "Option", "value": "option" })),
    )
}

pub(crate) fn default_option_list() -> Value {
    json!([
        { "label": "Option 1", "value": "option1" },
        { "label": "Option 2", "value": "option2" }
    ])
}

pub(crate) fn record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Label with a required marker, shared by all inputs
pub(crate) fn input_label(props: &PropsView<'_>, tag: &str) -> VNode {
    let name = props.string("name");
    let mut label = VNode::element(tag).with_class("block text-sm font-medium text-gray-700 mb-1");
    if tag == "label" {
        label = label.with_attr("for", name);
    }

    label
        .with_child(VNode::text(props.string("label")))
        .with_optional_child(props.bool("required").then(|| {
            VNode::element("span")
                .with_class("text-red-600")
                .with_child(VNode::text(" *"))
        }))
}

pub(crate) fn helper_text(props: &PropsView<'_>) -> Option<VNode> {
    props.non_empty("helperText").map(|text| {
        VNode::element("p")
            .with_class("mt-1 text-sm text-gray-500")
            .with_child(VNode::text(text))
    })
}

pub(crate) const INPUT_CLASS: &str =
    "w-full px-4 py-2 border border-gray-300 rounded-lg focus:ring-2 focus:ring-blue-500";
