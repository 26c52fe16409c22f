//! Form components. Each one declares the [`InputKind`] it contributes to a submission.

use formbuilder_renderer::field::options;
use formbuilder_renderer::{
    Category, ComponentDefinition, DefinitionError, FieldOption, FieldSpec, InputKind, PropsView,
    RenderError, VNode,
};
use serde_json::json;

use crate::shared::{
    align_field, default_option_list, helper_text, input_label, justify_class, option_list_field,
    required_field, ALIGNS, INPUT_CLASS,
};

const MB: u64 = 1024 * 1024;

pub fn text_input() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("TextInput")
        .label("Text Input")
        .input(InputKind::Text)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("placeholder", FieldSpec::text())
        .field("required", required_field())
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "field",
            "label": "Text Field",
            "placeholder": "",
            "required": false,
            "helperText": ""
        }))
        .render(|props| {
            Ok(field_wrapper(props)
                .with_child(
                    VNode::element("input")
                        .with_attr("type", "text")
                        .with_attr("id", props.string("name"))
                        .with_attr("name", props.string("name"))
                        .with_attr("placeholder", props.string("placeholder"))
                        .with_flag("required", props.bool("required"))
                        .with_class(INPUT_CLASS),
                )
                .with_optional_child(helper_text(props)))
        })
        .build()
}

pub fn text_area() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("TextArea")
        .label("Text Area")
        .input(InputKind::Text)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("placeholder", FieldSpec::text())
        .field("rows", FieldSpec::number_range(Some(1.0), None))
        .field("required", required_field())
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "message",
            "label": "Message",
            "placeholder": "",
            "rows": 4,
            "required": false,
            "helperText": ""
        }))
        .render(|props| {
            let rows = props.number("rows").max(1.0).round() as u64;

            Ok(field_wrapper(props)
                .with_child(
                    VNode::element("textarea")
                        .with_attr("id", props.string("name"))
                        .with_attr("name", props.string("name"))
                        .with_attr("placeholder", props.string("placeholder"))
                        .with_attr("rows", rows.to_string())
                        .with_flag("required", props.bool("required"))
                        .with_class(INPUT_CLASS),
                )
                .with_optional_child(helper_text(props)))
        })
        .build()
}

pub fn email_input() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("EmailInput")
        .label("Email Input")
        .input(InputKind::Email)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("placeholder", FieldSpec::text())
        .field("required", required_field())
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "email",
            "label": "Email Address",
            "placeholder": "your@email.com",
            "required": true,
            "helperText": ""
        }))
        .render(|props| {
            Ok(field_wrapper(props)
                .with_child(
                    VNode::element("input")
                        .with_attr("type", "email")
                        .with_attr("id", props.string("name"))
                        .with_attr("name", props.string("name"))
                        .with_attr("placeholder", props.string("placeholder"))
                        .with_flag("required", props.bool("required"))
                        .with_class(INPUT_CLASS),
                )
                .with_optional_child(helper_text(props)))
        })
        .build()
}

pub fn select() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Select")
        .input(InputKind::Choice)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("options", option_list_field())
        .field("required", required_field())
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "select",
            "label": "Select Option",
            "options": default_option_list(),
            "required": false,
            "helperText": ""
        }))
        .render(render_select)
        .build()
}

fn render_select(props: &PropsView<'_>) -> Result<VNode, RenderError> {
    let choices = props.records("options").into_iter().map(|option| {
        let option = PropsView::record(option);
        VNode::element("option")
            .with_attr("value", option.string("value"))
            .with_child(VNode::text(option.string("label")))
    });

    let select = VNode::element("select")
        .with_attr("id", props.string("name"))
        .with_attr("name", props.string("name"))
        .with_flag("required", props.bool("required"))
        .with_class(INPUT_CLASS)
        .with_child(
            VNode::element("option")
                .with_attr("value", "")
                .with_child(VNode::text("Select an option...")),
        )
        .with_children(choices);

    Ok(field_wrapper(props)
        .with_child(select)
        .with_optional_child(helper_text(props)))
}

pub fn radio_group() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("RadioGroup")
        .label("Radio Group")
        .input(InputKind::Choice)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("options", option_list_field())
        .field("required", required_field())
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "radio",
            "label": "Choose One",
            "options": default_option_list(),
            "required": false,
            "helperText": ""
        }))
        .render(|props| Ok(choice_group(props, "radio")))
        .build()
}

pub fn checkbox_group() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("CheckboxGroup")
        .label("Checkbox Group")
        .input(InputKind::MultiChoice)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("options", option_list_field())
        .field("required", required_field())
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "checkbox",
            "label": "Choose Options",
            "options": default_option_list(),
            "required": false,
            "helperText": ""
        }))
        .render(|props| Ok(choice_group(props, "checkbox")))
        .build()
}

/// Fieldset of radio or checkbox inputs sharing one name. Only the first input carries
/// `required`, which is enough for the browser to enforce a selection.
fn choice_group(props: &PropsView<'_>, input_type: &str) -> VNode {
    let name = props.string("name");
    let required = props.bool("required");

    let choices = props
        .records("options")
        .into_iter()
        .enumerate()
        .map(|(index, option)| {
            let option = PropsView::record(option);
            let id = format!("{}-{}", name, index);

            VNode::element("div")
                .with_class("flex items-center")
                .with_child(
                    VNode::element("input")
                        .with_attr("type", input_type)
                        .with_attr("id", id.clone())
                        .with_attr("name", name.clone())
                        .with_attr("value", option.string("value"))
                        .with_flag("required", required && index == 0)
                        .with_class("mr-2"),
                )
                .with_child(
                    VNode::element("label")
                        .with_attr("for", id)
                        .with_class("text-sm text-gray-700")
                        .with_child(VNode::text(option.string("label"))),
                )
        });

    VNode::element("fieldset")
        .with_class("mb-4")
        .with_child(input_label(props, "legend"))
        .with_child(
            VNode::element("div")
                .with_class("space-y-2")
                .with_children(choices),
        )
        .with_optional_child(helper_text(props))
}

pub fn submit_button() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("SubmitButton")
        .label("Submit Button")
        .category(Category::Form)
        .field("label", FieldSpec::text())
        .field("align", align_field())
        .defaults(json!({ "label": "Submit", "align": "left" }))
        .render(|props| {
            Ok(VNode::element("div")
                .with_class(format!(
                    "flex {}",
                    justify_class(props.choice("align", ALIGNS))
                ))
                .with_child(
                    VNode::element("button")
                        .with_attr("type", "submit")
                        .with_class(
                            "px-6 py-3 bg-blue-600 text-white rounded-lg font-semibold hover:bg-blue-700",
                        )
                        .with_child(VNode::text(props.string("label"))),
                ))
        })
        .build()
}

const ACCEPTS: &[&str] = &[
    "*",
    "image/*",
    ".pdf,.doc,.docx,.txt",
    "image/*,.pdf,.doc,.docx,.txt",
    "custom",
];

pub fn file_upload() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("FileUpload")
        .label("File Upload")
        .input(InputKind::File)
        .field("name", FieldSpec::text().with_label("Field Name"))
        .field("label", FieldSpec::text())
        .field("required", required_field())
        .field(
            "accept",
            FieldSpec::select(options(&[
                ("All files", "*"),
                ("Images only", "image/*"),
                ("Documents", ".pdf,.doc,.docx,.txt"),
                ("Images and documents", "image/*,.pdf,.doc,.docx,.txt"),
                ("Custom", "custom"),
            ])),
        )
        .field("customAccept", FieldSpec::text().with_label("Custom file types"))
        .field(
            "maxSize",
            FieldSpec::select(
                [1, 5, 10, 25, 50]
                    .into_iter()
                    .map(|mb| FieldOption::new(format!("{} MB", mb), mb * MB))
                    .collect(),
            ),
        )
        .field("helperText", FieldSpec::text().with_label("Helper Text"))
        .defaults(json!({
            "name": "file",
            "label": "Upload File",
            "required": false,
            "accept": "*",
            "customAccept": "",
            "maxSize": 5 * MB,
            "helperText": ""
        }))
        .render(render_file_upload)
        .build()
}

fn render_file_upload(props: &PropsView<'_>) -> Result<VNode, RenderError> {
    let accept = match props.choice("accept", ACCEPTS) {
        "custom" => props.non_empty("customAccept").unwrap_or_else(|| "*".to_string()),
        accept => accept.to_string(),
    };
    let max_size = props.number("maxSize").max(0.0) as u64;

    let mut input = VNode::element("input")
        .with_attr("type", "file")
        .with_attr("id", props.string("name"))
        .with_attr("name", props.string("name"))
        .with_attr("data-max-size", max_size.to_string())
        .with_flag("required", props.bool("required"))
        .with_class(INPUT_CLASS);
    if accept != "*" {
        input = input.with_attr("accept", accept.clone());
    }

    Ok(field_wrapper(props)
        .with_child(input)
        .with_child(
            VNode::element("p")
                .with_class("mt-1 text-xs text-gray-500")
                .with_child(VNode::text(format!(
                    "{} up to {}",
                    describe_accept(&accept),
                    format_file_size(max_size)
                ))),
        )
        .with_optional_child(helper_text(props)))
}

fn describe_accept(accept: &str) -> String {
    match accept {
        "*" => "Any file".to_string(),
        "image/*" => "Images".to_string(),
        ".pdf,.doc,.docx,.txt" => "PDF, Word or text documents".to_string(),
        "image/*,.pdf,.doc,.docx,.txt" => "Images or documents".to_string(),
        other => other.split(',').map(str::trim).collect::<Vec<_>>().join(", "),
    }
}

fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    let rounded = (size * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

fn field_wrapper(props: &PropsView<'_>) -> VNode {
    VNode::element("div")
        .with_class("mb-4")
        .with_child(input_label(props, "label"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * MB), "5 MB");
    }

    #[test]
    fn test_describe_custom_accept() {
        assert_eq!(describe_accept(".png, .jpg"), ".png, .jpg");
        assert_eq!(describe_accept("*"), "Any file");
    }
}
