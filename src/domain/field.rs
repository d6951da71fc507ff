use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The value written into a Jira custom field.
///
/// Jira is strict about shape: a select field takes `{"id": "..."}` while a
/// multi-select takes `[{"id": "..."}]`, and sending the wrong one is a 400.
/// The shape is therefore declared per field in configuration instead of
/// being inferred from the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    List(Vec<Value>),
    Scalar(Value),
}

impl FieldValue {
    /// Convenience for the common `{"id": "..."}` option reference.
    pub fn option_id(id: &str) -> Self {
        FieldValue::Scalar(serde_json::json!({ "id": id }))
    }

    /// Single-element list of an option reference, for multi-select fields.
    pub fn option_id_list(id: &str) -> Self {
        FieldValue::List(vec![serde_json::json!({ "id": id })])
    }
}

/// A custom field to populate on every created issue: the opaque Jira field
/// id plus the fixed value configuration assigns to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomField {
    pub field_id: String,
    pub value: FieldValue,
}

impl CustomField {
    pub fn new(field_id: impl Into<String>, value: FieldValue) -> Self {
        Self {
            field_id: field_id.into(),
            value,
        }
    }
}
