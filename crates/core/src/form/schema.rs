//! Form schema data shapes and boundary normalization.
//!
//! The wire form is the camelCase JSON document the admin UI and public
//! site exchange; unknown field types fail deserialization outright, so an
//! untyped blob can never reach the database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of input kinds a form field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Textarea,
    Select,
    Number,
    File,
    Checkbox,
}

impl FieldType {
    /// Wire name of the type, as stored in the JSON document.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Number => "number",
            FieldType::File => "file",
            FieldType::Checkbox => "checkbox",
        }
    }
}

/// Optional numeric bounds, meaningful only for `number` fields.
///
/// These constrain the input control; out-of-range values are not rejected
/// at submission time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumberBounds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// One field definition in an application form.
///
/// `id` is assigned once at creation and is the key under which answers are
/// persisted; reordering or relabelling a field never changes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Present iff `field_type == Select`; enforced by [`ApplicationFormConfig::normalize`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<NumberBounds>,
}

impl FormField {
    /// A fresh field with builder defaults: single-line text, optional.
    pub fn new(id: String) -> Self {
        FormField {
            id,
            label: "New Field".to_string(),
            field_type: FieldType::Text,
            required: false,
            placeholder: None,
            options: None,
            validation: None,
        }
    }
}

/// Default label on the submit button.
pub const DEFAULT_SUBMIT_BUTTON_TEXT: &str = "Submit Application";

/// Default success-panel message shown after a stored submission.
pub const DEFAULT_SUCCESS_MESSAGE: &str =
    "Thank you! Your application has been received.";

fn default_submit_button_text() -> String {
    DEFAULT_SUBMIT_BUTTON_TEXT.to_string()
}

fn default_success_message() -> String {
    DEFAULT_SUCCESS_MESSAGE.to_string()
}

/// The application form attached 1:1 to a competition.
///
/// Stored wholesale as a single JSONB document and replaced on every save;
/// there is no partial field patching at the persistence layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFormConfig {
    /// Gate: when false, no form is rendered and no submissions are accepted.
    #[serde(default)]
    pub enabled: bool,
    /// Display and submission order.
    #[serde(default)]
    pub fields: Vec<FormField>,
    #[serde(default = "default_submit_button_text")]
    pub submit_button_text: String,
    #[serde(default = "default_success_message")]
    pub success_message: String,
}

impl Default for ApplicationFormConfig {
    fn default() -> Self {
        ApplicationFormConfig {
            enabled: false,
            fields: Vec::new(),
            submit_button_text: default_submit_button_text(),
            success_message: default_success_message(),
        }
    }
}

impl ApplicationFormConfig {
    /// Enforce the options⇔select shape invariant in place.
    ///
    /// Select fields get an options list (empty if absent); every other
    /// type has its options dropped. Run at every persistence boundary so
    /// a hand-edited document cannot violate the invariant.
    pub fn normalize(&mut self) {
        for field in &mut self.fields {
            if field.field_type == FieldType::Select {
                field.options.get_or_insert_with(Vec::new);
            } else {
                field.options = None;
            }
        }
    }

    /// Check the structural invariants that cannot be expressed in serde:
    /// non-empty field ids, unique within the list.
    pub fn check_invariants(&self) -> Result<(), CoreError> {
        for (i, field) in self.fields.iter().enumerate() {
            if field.id.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "Field at position {i} has an empty id"
                )));
            }
            if self.fields[..i].iter().any(|f| f.id == field.id) {
                return Err(CoreError::Validation(format!(
                    "Duplicate field id '{}'",
                    field.id
                )));
            }
        }
        Ok(())
    }

    /// Position of a field by id.
    pub fn field_index(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }
}
