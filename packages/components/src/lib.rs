//! # Built-in Components
//!
//! The application's component library, supplied to the [`Registry`] at startup.
//!
//! Two generations exist: the layout set ([`layout_registry`]) and the superset that
//! adds form inputs ([`full_registry`]). A document that only uses layout types renders
//! the same under both.

mod form;
mod layout;
mod shared;

use formbuilder_renderer::{ComponentDefinition, DefinitionError, Registry};

pub use form::{
    checkbox_group, email_input, file_upload, radio_group, select, submit_button, text_area,
    text_input,
};
pub use layout::{button_group, card, columns, flex, heading, hero, text, vertical_space};

/// Hero, VerticalSpace, Heading, Text, ButtonGroup, Columns, Card, Flex
pub fn layout_components() -> Result<Vec<ComponentDefinition>, DefinitionError> {
    Ok(vec![
        hero()?,
        vertical_space()?,
        heading()?,
        text()?,
        button_group()?,
        columns()?,
        card()?,
        flex()?,
    ])
}

/// TextInput, TextArea, EmailInput, Select, RadioGroup, CheckboxGroup, SubmitButton, FileUpload
pub fn form_components() -> Result<Vec<ComponentDefinition>, DefinitionError> {
    Ok(vec![
        text_input()?,
        text_area()?,
        email_input()?,
        select()?,
        radio_group()?,
        checkbox_group()?,
        submit_button()?,
        file_upload()?,
    ])
}

pub fn layout_registry() -> Result<Registry, DefinitionError> {
    Ok(Registry::with_definitions(layout_components()?))
}

pub fn full_registry() -> Result<Registry, DefinitionError> {
    let mut registry = layout_registry()?;
    registry.register_all(form_components()?);
    Ok(registry)
}
