use formbuilder_components::full_registry;
use formbuilder_document::{ContentNode, Document};
use formbuilder_forms::{capture, form_fields, FormField, FormSettings, SubmissionError};
use formbuilder_renderer::InputKind;
use serde_json::json;

fn contact_form() -> Document {
    let mut doc = Document::empty("Contact");
    doc.content.push(ContentNode::new("Heading", "h"));
    doc.content.push(ContentNode::new("EmailInput", "e"));
    doc.content.push(
        ContentNode::new("TextInput", "n")
            .with_prop("name", "full_name")
            .with_prop("label", "Full name")
            .with_prop("required", true),
    );
    doc.content.push(
        ContentNode::new("Select", "s")
            .with_prop("name", "topic")
            .with_prop(
                "options",
                json!([
                    { "label": "Sales", "value": "sales" },
                    { "label": "Support", "value": "support" }
                ]),
            ),
    );
    doc.content.push(ContentNode::new("CheckboxGroup", "c"));
    doc.content.push(ContentNode::new("SubmitButton", "b"));
    doc.content.push(ContentNode::new("DoesNotExist", "x"));
    doc
}

fn fields() -> Vec<FormField> {
    form_fields(&full_registry().unwrap(), &contact_form())
}

fn entries(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_form_fields_in_content_order() {
    let fields = fields();

    let summary: Vec<(&str, InputKind, bool)> = fields
        .iter()
        .map(|f| (f.name.as_str(), f.input, f.required))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("email", InputKind::Email, true),
            ("full_name", InputKind::Text, true),
            ("topic", InputKind::Choice, false),
            ("checkbox", InputKind::MultiChoice, false),
        ]
    );

    assert_eq!(fields[1].label, "Full name");
    assert_eq!(fields[1].node_id, "n");
    assert_eq!(fields[2].options, vec!["sales", "support"]);
    assert_eq!(fields[3].options, vec!["option1", "option2"]);
}

#[test]
fn test_capture_valid_submission() {
    let submission = capture(
        &fields(),
        &FormSettings::default(),
        entries(&[
            ("email", " ada@example.com "),
            ("full_name", "Ada"),
            ("topic", "support"),
            ("checkbox", "option2"),
            ("utm_source", "newsletter"),
        ]),
    )
    .unwrap();

    assert_eq!(submission.email.as_deref(), Some("ada@example.com"));
    assert_eq!(submission.data["full_name"], json!("Ada"));
    assert_eq!(submission.data["checkbox"], json!(["option2"]));
    assert_eq!(submission.data["utm_source"], json!("newsletter"));
}

#[test]
fn test_repeated_keys_become_arrays() {
    let submission = capture(
        &fields(),
        &FormSettings::default(),
        entries(&[
            ("email", "a@b.c"),
            ("full_name", "Ada"),
            ("checkbox", "option1"),
            ("checkbox", "option2"),
            ("tag", "x"),
            ("tag", "y"),
            ("tag", "z"),
        ]),
    )
    .unwrap();

    assert_eq!(submission.data["checkbox"], json!(["option1", "option2"]));
    assert_eq!(submission.data["tag"], json!(["x", "y", "z"]));
}

#[test]
fn test_missing_required_fields_are_listed() {
    let result = capture(&fields(), &FormSettings::default(), entries(&[("full_name", "   ")]));

    assert_eq!(
        result,
        Err(SubmissionError::MissingRequired(vec![
            "email".to_string(),
            "full_name".to_string()
        ]))
    );
}

#[test]
fn test_choice_must_be_an_option() {
    let result = capture(
        &fields(),
        &FormSettings::default(),
        entries(&[("email", "a@b.c"), ("full_name", "Ada"), ("topic", "billing")]),
    );

    assert_eq!(
        result,
        Err(SubmissionError::InvalidChoice {
            field: "topic".to_string(),
            value: "billing".to_string()
        })
    );
}

#[test]
fn test_email_needs_at_sign() {
    let result = capture(
        &fields(),
        &FormSettings::default(),
        entries(&[("email", "not-an-email"), ("full_name", "Ada")]),
    );

    assert_eq!(
        result,
        Err(SubmissionError::InvalidEmail("not-an-email".to_string()))
    );
}

#[test]
fn test_form_without_email_input_uses_email_entry() {
    let mut doc = Document::empty("Survey");
    doc.content.push(ContentNode::new("RadioGroup", "r"));
    let fields = form_fields(&full_registry().unwrap(), &doc);
    let optional_email = FormSettings {
        require_email: false,
        ..FormSettings::default()
    };

    let anonymous = capture(&fields, &optional_email, entries(&[("radio", "option1")])).unwrap();
    assert_eq!(anonymous.email, None);

    let identified = capture(
        &fields,
        &FormSettings::default(),
        entries(&[("radio", "option1"), ("email", "me@example.com")]),
    )
    .unwrap();
    assert_eq!(identified.email.as_deref(), Some("me@example.com"));
}

#[test]
fn test_email_required_by_default() {
    let mut doc = Document::empty("Survey");
    doc.content.push(ContentNode::new("RadioGroup", "r"));
    let fields = form_fields(&full_registry().unwrap(), &doc);

    let result = capture(
        &fields,
        &FormSettings::default(),
        entries(&[("radio", "option1"), ("email", "  ")]),
    );

    assert_eq!(result, Err(SubmissionError::EmailRequired));
}

#[test]
fn test_renamed_email_input() {
    let mut doc = Document::empty("Signup");
    doc.content
        .push(ContentNode::new("EmailInput", "e").with_prop("name", "work_email"));
    let fields = form_fields(&full_registry().unwrap(), &doc);

    let submission = capture(&fields, &FormSettings::default(), entries(&[("work_email", "x@corp.io")])).unwrap();

    assert_eq!(submission.email.as_deref(), Some("x@corp.io"));
}
