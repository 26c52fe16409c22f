//! Layout components: page structure and static content.

use formbuilder_renderer::field::options;
use formbuilder_renderer::{
    ComponentDefinition, DefinitionError, FieldSpec, Fields, PropsView, RenderError, VNode,
};
use serde_json::json;

use crate::shared::{align_field, justify_class, record, ALIGNS};

pub fn hero() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Hero")
        .field("title", FieldSpec::text())
        .field("description", FieldSpec::textarea())
        .field(
            "align",
            FieldSpec::radio(options(&[("Left", "left"), ("Center", "center")])),
        )
        .field("padding", FieldSpec::text())
        .defaults(json!({
            "title": "Hero Title",
            "description": "Hero description",
            "align": "left",
            "padding": "64px"
        }))
        .render(render_hero)
        .build()
}

fn render_hero(props: &PropsView<'_>) -> Result<VNode, RenderError> {
    let centered = props.choice("align", &["left", "center"]) == "center";

    Ok(VNode::element("div")
        .with_class(format!(
            "bg-gradient-to-br from-blue-50 to-indigo-100 {}",
            if centered { "text-center" } else { "" }
        ))
        .with_style("padding", props.string("padding"))
        .with_child(
            VNode::element("div")
                .with_class("max-w-6xl mx-auto")
                .with_child(
                    VNode::element("h1")
                        .with_class("text-5xl font-bold mb-4 text-gray-900")
                        .with_child(VNode::text(props.string("title"))),
                )
                .with_child(
                    VNode::element("p")
                        .with_class("text-xl text-gray-600 max-w-2xl mx-auto")
                        .with_child(VNode::text(props.string("description"))),
                ),
        ))
}

pub fn vertical_space() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("VerticalSpace")
        .field(
            "size",
            FieldSpec::select(options(&[
                ("Small (16px)", "16px"),
                ("Medium (32px)", "32px"),
                ("Large (64px)", "64px"),
                ("XLarge (96px)", "96px"),
            ])),
        )
        .defaults(json!({ "size": "32px" }))
        .render(|props| {
            let size = props.choice("size", &["16px", "32px", "64px", "96px"]);
            Ok(VNode::element("div").with_style("height", size))
        })
        .build()
}

pub fn heading() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Heading")
        .field("text", FieldSpec::text())
        .field(
            "size",
            FieldSpec::select(options(&[
                ("XL", "xl"),
                ("2XL", "2xl"),
                ("3XL", "3xl"),
                ("4XL", "4xl"),
                ("5XL", "5xl"),
            ])),
        )
        .field("align", align_field())
        .defaults(json!({ "text": "Heading", "size": "2xl", "align": "left" }))
        .render(|props| {
            let size = props.choice("size", &["xl", "2xl", "3xl", "4xl", "5xl"]);
            let align = props.choice("align", ALIGNS);

            Ok(VNode::element("h2")
                .with_class(format!(
                    "text-{} font-bold text-{} text-gray-900 mb-2",
                    size, align
                ))
                .with_child(VNode::text(props.string("text"))))
        })
        .build()
}

pub fn text() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Text")
        .field("text", FieldSpec::textarea())
        .field(
            "size",
            FieldSpec::select(options(&[("Small", "sm"), ("Base", "base"), ("Large", "lg")])),
        )
        .field("align", align_field())
        .field(
            "color",
            FieldSpec::radio(options(&[("Default", "default"), ("Muted", "muted")])),
        )
        .defaults(json!({
            "text": "Text content",
            "size": "base",
            "align": "left",
            "color": "default"
        }))
        .render(|props| {
            let size = props.choice("size", &["sm", "base", "lg"]);
            let color = match props.choice("color", &["default", "muted"]) {
                "muted" => "text-gray-600",
                _ => "text-gray-900",
            };
            let align = props.choice("align", ALIGNS);

            Ok(VNode::element("p")
                .with_class(format!(
                    "text-{} {} text-{} whitespace-pre-wrap",
                    size, color, align
                ))
                .with_child(VNode::text(props.string("text"))))
        })
        .build()
}

pub fn button_group() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("ButtonGroup")
        .field(
            "buttons",
            FieldSpec::array(
                Fields::new()
                    .with("label", FieldSpec::text())
                    .with("href", FieldSpec::text())
                    .with(
                        "variant",
                        FieldSpec::select(options(&[
                            ("Primary", "primary"),
                            ("Secondary", "secondary"),
                        ])),
                    ),
                record(json!({ "label": "Button", "href": "#", "variant": "primary" })),
            ),
        )
        .field("align", align_field())
        .defaults(json!({
            "buttons": [{ "label": "Click me", "href": "#", "variant": "primary" }],
            "align": "left"
        }))
        .render(render_button_group)
        .build()
}

fn render_button_group(props: &PropsView<'_>) -> Result<VNode, RenderError> {
    let buttons = props.records("buttons").into_iter().map(|button| {
        let button = PropsView::record(button);
        let variant = match button.choice("variant", &["primary", "secondary"]) {
            "secondary" => "bg-gray-200 text-gray-900 hover:bg-gray-300",
            _ => "bg-blue-600 text-white hover:bg-blue-700",
        };
        let href = button.non_empty("href").unwrap_or_else(|| "#".to_string());

        VNode::element("a")
            .with_attr("href", href)
            .with_class(format!(
                "px-6 py-3 rounded-lg font-semibold transition-colors {}",
                variant
            ))
            .with_child(VNode::text(button.string("label")))
    });

    Ok(VNode::element("div")
        .with_class(format!(
            "flex gap-2 {}",
            justify_class(props.choice("align", ALIGNS))
        ))
        .with_children(buttons))
}

pub fn columns() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Columns")
        .field(
            "columns",
            FieldSpec::array(
                Fields::new().with("content", FieldSpec::textarea()),
                record(json!({ "content": "Column content" })),
            ),
        )
        .field(
            "distribution",
            FieldSpec::radio(options(&[("Auto", "auto"), ("Manual", "manual")])),
        )
        .defaults(json!({
            "columns": [{ "content": "Column 1" }, { "content": "Column 2" }],
            "distribution": "auto"
        }))
        .render(|props| {
            let columns = props.records("columns").into_iter().map(|column| {
                VNode::element("div")
                    .with_class("p-4 bg-white rounded-lg border border-gray-200")
                    .with_child(
                        VNode::element("p")
                            .with_class("text-gray-700")
                            .with_child(VNode::text(PropsView::record(column).string("content"))),
                    )
            });

            Ok(VNode::element("div")
                .with_class("grid gap-4 md:grid-cols-2 lg:grid-cols-3")
                .with_attr("data-distribution", props.choice("distribution", &["auto", "manual"]))
                .with_children(columns))
        })
        .build()
}

pub fn card() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Card")
        .field("title", FieldSpec::text())
        .field("description", FieldSpec::textarea())
        .field("icon", FieldSpec::text())
        .field(
            "mode",
            FieldSpec::radio(options(&[("Flat", "flat"), ("Card", "card")])),
        )
        .defaults(json!({
            "title": "Card Title",
            "description": "Card description",
            "icon": "⭐",
            "mode": "card"
        }))
        .render(|props| {
            let surface = match props.choice("mode", &["card", "flat"]) {
                "flat" => "bg-transparent",
                _ => "bg-white shadow-lg border border-gray-100",
            };
            let icon = props.non_empty("icon").map(|icon| {
                VNode::element("div")
                    .with_class("text-4xl mb-4")
                    .with_child(VNode::text(icon))
            });

            Ok(VNode::element("div")
                .with_class(format!("p-6 rounded-lg {}", surface))
                .with_optional_child(icon)
                .with_child(
                    VNode::element("h3")
                        .with_class("text-xl font-bold text-gray-900 mb-2")
                        .with_child(VNode::text(props.string("title"))),
                )
                .with_child(
                    VNode::element("p")
                        .with_class("text-gray-600")
                        .with_child(VNode::text(props.string("description"))),
                ))
        })
        .build()
}

pub fn flex() -> Result<ComponentDefinition, DefinitionError> {
    ComponentDefinition::builder("Flex")
        .field(
            "items",
            FieldSpec::array(
                Fields::new()
                    .with("title", FieldSpec::text())
                    .with("description", FieldSpec::text()),
                record(json!({ "title": "Item", "description": "Description" })),
            ),
        )
        .field("minItemWidth", FieldSpec::number_range(Some(0.0), None))
        .defaults(json!({
            "items": [
                { "title": "Feature 1", "description": "Description 1" },
                { "title": "Feature 2", "description": "Description 2" },
                { "title": "Feature 3", "description": "Description 3" }
            ],
            "minItemWidth": 256
        }))
        .render(|props| {
            let min_width = props.number("minItemWidth").max(0.0);
            let items = props.records("items").into_iter().map(|item| {
                let item = PropsView::record(item);
                VNode::element("div")
                    .with_class("p-4 bg-gray-50 rounded-lg")
                    .with_child(
                        VNode::element("h4")
                            .with_class("font-semibold text-gray-900 mb-1")
                            .with_child(VNode::text(item.string("title"))),
                    )
                    .with_child(
                        VNode::element("p")
                            .with_class("text-sm text-gray-600")
                            .with_child(VNode::text(item.string("description"))),
                    )
            });

            Ok(VNode::element("div")
                .with_class("grid gap-4")
                .with_style(
                    "grid-template-columns",
                    format!("repeat(auto-fit, minmax({}px, 1fr))", min_width),
                )
                .with_children(items))
        })
        .build()
}
