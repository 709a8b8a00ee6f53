//! In-memory editing operations behind the admin form builder.
//!
//! Every operation mutates the config synchronously; nothing here persists
//! anything — the caller saves the whole document when it chooses to. The
//! builder also performs no field-level validation: an admin can save a
//! required select with zero options, and that is surfaced at review time
//! rather than blocked here.

use serde::Deserialize;

use super::schema::{ApplicationFormConfig, FieldType, FormField, NumberBounds};

/// Direction for [`ApplicationFormConfig::move_field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Partial changes to merge into one field via
/// [`ApplicationFormConfig::update_field`].
///
/// `None` means "leave unchanged"; an empty placeholder string clears the
/// placeholder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldPatch {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub field_type: Option<FieldType>,
    pub required: Option<bool>,
    pub placeholder: Option<String>,
    pub options: Option<Vec<String>>,
    pub validation: Option<NumberBounds>,
}

impl ApplicationFormConfig {
    /// Flip the `enabled` gate. No other field is touched.
    pub fn toggle_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Append a new field with a generated unique id and builder defaults
    /// (label "New Field", type text, optional). Returns the new field.
    pub fn add_field(&mut self) -> &FormField {
        let id = next_field_id(&self.fields);
        self.fields.push(FormField::new(id));
        self.fields.last().expect("field appended above")
    }

    /// Delete a field by id. Prior submissions keep their answer under the
    /// removed key; there is no cascading cleanup. Returns whether a field
    /// was removed.
    pub fn remove_field(&mut self, field_id: &str) -> bool {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != field_id);
        self.fields.len() != before
    }

    /// Merge partial changes into one field.
    ///
    /// When the patch carries a type, the options list follows it: a
    /// non-select type drops any options, select ensures a (possibly
    /// empty) list exists. Returns false when the id is unknown.
    pub fn update_field(&mut self, field_id: &str, patch: FieldPatch) -> bool {
        let Some(index) = self.field_index(field_id) else {
            return false;
        };
        let field = &mut self.fields[index];

        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(placeholder) = patch.placeholder {
            field.placeholder = if placeholder.is_empty() {
                None
            } else {
                Some(placeholder)
            };
        }
        if let Some(options) = patch.options {
            field.options = Some(options);
        }
        if let Some(validation) = patch.validation {
            field.validation = Some(validation);
        }
        if let Some(field_type) = patch.field_type {
            field.field_type = field_type;
            if field_type == FieldType::Select {
                field.options.get_or_insert_with(Vec::new);
            } else {
                field.options = None;
            }
        }
        true
    }

    /// Swap the field at `index` with its immediate neighbour. No-op (and
    /// false) at the list boundaries or for an out-of-range index.
    pub fn move_field(&mut self, index: usize, direction: MoveDirection) -> bool {
        match direction {
            MoveDirection::Up => {
                if index == 0 || index >= self.fields.len() {
                    return false;
                }
                self.fields.swap(index - 1, index);
            }
            MoveDirection::Down => {
                if index + 1 >= self.fields.len() {
                    return false;
                }
                self.fields.swap(index, index + 1);
            }
        }
        true
    }

    /// Append an empty option to a select field. Returns false for unknown
    /// ids and non-select fields.
    pub fn add_option(&mut self, field_id: &str) -> bool {
        match self.select_options_mut(field_id) {
            Some(options) => {
                options.push(String::new());
                true
            }
            None => false,
        }
    }

    /// Replace the option at `index` on a select field.
    pub fn update_option(&mut self, field_id: &str, index: usize, value: &str) -> bool {
        match self.select_options_mut(field_id) {
            Some(options) if index < options.len() => {
                options[index] = value.to_string();
                true
            }
            _ => false,
        }
    }

    /// Remove the option at `index` from a select field.
    pub fn remove_option(&mut self, field_id: &str, index: usize) -> bool {
        match self.select_options_mut(field_id) {
            Some(options) if index < options.len() => {
                options.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Mutable access to a select field's options list; `None` for unknown
    /// ids or non-select fields.
    fn select_options_mut(&mut self, field_id: &str) -> Option<&mut Vec<String>> {
        let index = self.field_index(field_id)?;
        let field = &mut self.fields[index];
        if field.field_type != FieldType::Select {
            return None;
        }
        Some(field.options.get_or_insert_with(Vec::new))
    }
}

/// Generate a new field id from the millisecond clock, bumping while it
/// collides with an existing id so in-form uniqueness is guaranteed even
/// for several fields added in the same millisecond.
fn next_field_id(fields: &[FormField]) -> String {
    let mut millis = chrono::Utc::now().timestamp_millis();
    loop {
        let candidate = format!("field-{millis}");
        if !fields.iter().any(|f| f.id == candidate) {
            return candidate;
        }
        millis += 1;
    }
}
