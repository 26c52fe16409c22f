//! # Field Specs
//!
//! Describes how each prop of a component is edited. Field specs drive the editor's
//! property panel and advisory validation; they are never used to reject stored data.

use formbuilder_document::Props;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;

/// One choice of a `select` or `radio` field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldOption {
    pub label: String,
    pub value: Value,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Build string-valued options from `(label, value)` pairs
pub fn options(pairs: &[(&str, &str)]) -> Vec<FieldOption> {
    pairs
        .iter()
        .map(|(label, value)| FieldOption::new(*label, *value))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        options: Vec<FieldOption>,
    },
    Radio {
        options: Vec<FieldOption>,
    },
    /// Sequence of records, each validated against `item_fields`
    Array {
        #[serde(rename = "arrayFields")]
        item_fields: Fields,
        #[serde(rename = "defaultItemProps")]
        default_item_props: Props,
    },
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Number { .. } => "number",
            FieldKind::Select { .. } => "select",
            FieldKind::Radio { .. } => "radio",
            FieldKind::Array { .. } => "array",
        }
    }

    /// Options of a `select` or `radio` field
    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            FieldKind::Select { options } | FieldKind::Radio { options } => Some(options),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    #[serde(flatten)]
    pub kind: FieldKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
}

impl FieldSpec {
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            label: None,
            required: false,
        }
    }

    pub fn text() -> Self {
        Self::new(FieldKind::Text)
    }

    pub fn textarea() -> Self {
        Self::new(FieldKind::Textarea)
    }

    pub fn number() -> Self {
        Self::new(FieldKind::Number {
            min: None,
            max: None,
        })
    }

    pub fn number_range(min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(FieldKind::Number { min, max })
    }

    pub fn select(options: Vec<FieldOption>) -> Self {
        Self::new(FieldKind::Select { options })
    }

    pub fn radio(options: Vec<FieldOption>) -> Self {
        Self::new(FieldKind::Radio { options })
    }

    pub fn array(item_fields: Fields, default_item_props: Props) -> Self {
        Self::new(FieldKind::Array {
            item_fields,
            default_item_props,
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the prop as required: an empty value is reported by validation
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered mapping from prop name to field spec
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(Vec<(String, FieldSpec)>);

impl Fields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Add or replace a field; a replaced field keeps its position
    pub fn with(mut self, name: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(name, spec);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: FieldSpec) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = spec,
            None => self.0.push((name, spec)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, spec) in &self.0 {
            map.serialize_entry(name, spec)?;
        }
        map.end()
    }
}
