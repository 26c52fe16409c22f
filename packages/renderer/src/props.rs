use formbuilder_document::Props;
use serde_json::Value;

/// Shallow merge of `props` over `defaults`.
///
/// Per top-level key: a key present in `props` wins, missing keys fall back to the
/// default. Nested values are never merged.
pub fn merge_props(defaults: &Props, props: &Props) -> Props {
    let mut merged = defaults.clone();
    for (key, value) in props {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Read-only view over merged props handed to render functions.
///
/// Getters never fail. A value with the wrong shape (a number where text is expected,
/// a string where a list is expected, `null`) falls back to the component default, and
/// then to an empty value.
#[derive(Debug, Clone, Copy)]
pub struct PropsView<'a> {
    props: &'a Props,
    defaults: &'a Props,
}

static EMPTY: std::sync::OnceLock<Props> = std::sync::OnceLock::new();

impl<'a> PropsView<'a> {
    pub fn new(props: &'a Props, defaults: &'a Props) -> Self {
        Self { props, defaults }
    }

    /// View over a record (array item) with its own item defaults
    pub fn record(props: &'a Props) -> Self {
        Self {
            props,
            defaults: EMPTY.get_or_init(Props::new),
        }
    }

    pub fn raw(&self) -> &'a Props {
        self.props
    }

    pub fn value(&self, key: &str) -> Option<&'a Value> {
        self.props.get(key)
    }

    /// String value; numbers and booleans are formatted
    pub fn string(&self, key: &str) -> String {
        scalar_to_string(self.props.get(key))
            .or_else(|| scalar_to_string(self.defaults.get(key)))
            .unwrap_or_default()
    }

    /// Non-empty string value, or `None`
    pub fn non_empty(&self, key: &str) -> Option<String> {
        let value = self.string(key);
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    pub fn bool(&self, key: &str) -> bool {
        to_bool(self.props.get(key))
            .or_else(|| to_bool(self.defaults.get(key)))
            .unwrap_or(false)
    }

    pub fn number(&self, key: &str) -> f64 {
        to_number(self.props.get(key))
            .or_else(|| to_number(self.defaults.get(key)))
            .unwrap_or(0.0)
    }

    /// Object items of an array prop. A non-array value falls back to the default list;
    /// non-object items are skipped.
    pub fn records(&self, key: &str) -> Vec<&'a Props> {
        let list = match self.props.get(key) {
            Some(Value::Array(items)) => Some(items),
            _ => match self.defaults.get(key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            },
        };

        list.map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    /// Value of a closed-choice prop. Unknown values resolve to the default choice, then to
    /// the first allowed value.
    pub fn choice(&self, key: &str, allowed: &[&'static str]) -> &'static str {
        let pick = |value: Option<&Value>| {
            let value = scalar_to_string(value)?;
            allowed.iter().copied().find(|candidate| *candidate == value)
        };

        pick(self.props.get(key))
            .or_else(|| pick(self.defaults.get(key)))
            .or_else(|| allowed.first().copied())
            .unwrap_or("")
    }
}

fn scalar_to_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn to_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn to_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_merge_is_shallow() {
        let defaults = props(json!({ "style": { "a": 1, "b": 2 }, "title": "Default" }));
        let node = props(json!({ "style": { "a": 9 } }));

        let merged = merge_props(&defaults, &node);

        assert_eq!(merged["style"], json!({ "a": 9 }));
        assert_eq!(merged["title"], json!("Default"));
    }

    #[test]
    fn test_wrong_types_fall_back_to_defaults() {
        let defaults = props(json!({ "rows": 4, "required": false, "title": "T", "items": [{ "x": 1 }] }));
        let node = props(json!({ "rows": "lots", "required": "maybe", "title": null, "items": "nope" }));
        let merged = merge_props(&defaults, &node);
        let view = PropsView::new(&merged, &defaults);

        assert_eq!(view.number("rows"), 4.0);
        assert!(!view.bool("required"));
        assert_eq!(view.string("title"), "T");
        assert_eq!(view.records("items").len(), 1);
    }

    #[test]
    fn test_scalar_coercions() {
        let defaults = Props::new();
        let node = props(json!({ "rows": "6", "required": "true", "width": 256 }));
        let view = PropsView::new(&node, &defaults);

        assert_eq!(view.number("rows"), 6.0);
        assert!(view.bool("required"));
        assert_eq!(view.string("width"), "256");
        assert_eq!(view.string("missing"), "");
    }

    #[test]
    fn test_choice_resolves_unknown_values() {
        let defaults = props(json!({ "size": "2xl" }));
        let node = props(json!({ "size": "9xl" }));
        let view = PropsView::new(&node, &defaults);

        assert_eq!(view.choice("size", &["xl", "2xl", "3xl"]), "2xl");
        assert_eq!(view.choice("other", &["left", "right"]), "left");
    }

    #[test]
    fn test_records_skip_non_objects() {
        let defaults = Props::new();
        let node = props(json!({ "items": [{ "a": 1 }, 3, "x", { "b": 2 }] }));
        let view = PropsView::new(&node, &defaults);

        assert_eq!(view.records("items").len(), 2);
    }
}
