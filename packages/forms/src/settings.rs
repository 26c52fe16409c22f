use formbuilder_document::{Document, Props};
use serde::Serialize;
use serde_json::Value;

const PUBLISHED_KEY: &str = "isPublished";
const REQUIRE_EMAIL_KEY: &str = "requireEmail";

/// Per-form switches, kept in the document's root props next to the title.
///
/// Forms start as drafts. Submissions need an email unless `requireEmail` is `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub published: bool,
    pub require_email: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            published: false,
            require_email: true,
        }
    }
}

impl FormSettings {
    /// Settings stored in `document`. Values that are not booleans read as the default.
    pub fn of(document: &Document) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            document
                .root
                .props
                .get(key)
                .and_then(Value::as_bool)
                .unwrap_or(default)
        };

        Self {
            published: flag(PUBLISHED_KEY, defaults.published),
            require_email: flag(REQUIRE_EMAIL_KEY, defaults.require_email),
        }
    }

    /// Root props that store these settings
    pub fn to_props(self) -> Props {
        let mut props = Props::new();
        props.insert(PUBLISHED_KEY.to_string(), Value::Bool(self.published));
        props.insert(REQUIRE_EMAIL_KEY.to_string(), Value::Bool(self.require_email));
        props
    }

    pub fn write_to(self, document: &mut Document) {
        document.root.props.extend(self.to_props());
    }
}
