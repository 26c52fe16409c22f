use chrono::{DateTime, Utc};
use formbuilder_renderer::InputKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::{FormField, FormSettings};

/// Key that supplies the submitter email when the form has no email input
const EMAIL_KEY: &str = "email";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmissionError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingRequired(Vec<String>),

    #[error("Please provide a valid email address (got {0:?})")]
    InvalidEmail(String),

    #[error("Please provide a valid email address")]
    EmailRequired,

    #[error("{value:?} is not an option of {field}")]
    InvalidChoice { field: String, value: String },
}

/// Captured values, a record separate from the content tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub email: Option<String>,
    /// Values keyed by field name. Repeated keys and multi-choice inputs hold arrays.
    pub data: Map<String, Value>,
    pub submitted_at: DateTime<Utc>,
}

/// Build a submission from posted `name=value` pairs.
///
/// - Repeated keys become arrays, in posting order
/// - Required fields need at least one non-blank value
/// - Choice values must be one of the field's options
/// - The email comes from the first email input, or an `email` entry when there is
///   none, and must contain `@`. It may only be missing when `settings.require_email`
///   is off.
///
/// Keys that match no field are kept as posted.
pub fn capture(
    fields: &[FormField],
    settings: &FormSettings,
    entries: Vec<(String, String)>,
) -> Result<Submission, SubmissionError> {
    let mut data = Map::new();
    for (key, value) in entries {
        match data.get_mut(&key) {
            Some(Value::Array(values)) => values.push(Value::String(value)),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, Value::String(value)]);
            }
            None => {
                data.insert(key, Value::String(value));
            }
        }
    }

    for field in fields.iter().filter(|f| f.input == InputKind::MultiChoice) {
        if let Some(value) = data.get_mut(&field.name) {
            if !value.is_array() {
                *value = Value::Array(vec![value.take()]);
            }
        }
    }

    let missing: Vec<String> = fields
        .iter()
        .filter(|field| field.required && values_of(&data, &field.name).is_empty())
        .map(|field| field.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(SubmissionError::MissingRequired(missing));
    }

    for field in fields.iter().filter(|f| f.is_choice() && !f.options.is_empty()) {
        if let Some(value) = values_of(&data, &field.name)
            .into_iter()
            .find(|value| !field.options.iter().any(|option| option.as_str() == *value))
        {
            return Err(SubmissionError::InvalidChoice {
                field: field.name.clone(),
                value: value.to_string(),
            });
        }
    }

    let email_key = fields
        .iter()
        .find(|field| field.input == InputKind::Email)
        .map_or(EMAIL_KEY, |field| field.name.as_str());

    let email = match values_of(&data, email_key).first() {
        Some(email) => {
            let email = email.trim();
            if !email.contains('@') {
                return Err(SubmissionError::InvalidEmail(email.to_string()));
            }
            Some(email.to_string())
        }
        None if settings.require_email => return Err(SubmissionError::EmailRequired),
        None => None,
    };

    debug!(fields = data.len(), has_email = email.is_some(), "Captured submission");

    Ok(Submission {
        email,
        data,
        submitted_at: Utc::now(),
    })
}

/// Non-blank string values posted under `name`
fn values_of<'d>(data: &'d Map<String, Value>, name: &str) -> Vec<&'d str> {
    let values: Vec<&Value> = match data.get(name) {
        Some(Value::Array(values)) => values.iter().collect(),
        Some(value) => vec![value],
        None => Vec::new(),
    };

    values
        .into_iter()
        .filter_map(Value::as_str)
        .filter(|value| !value.trim().is_empty())
        .collect()
}
