//! Render plan for application forms.
//!
//! Turns a form schema into per-field control descriptions a client can
//! lay out without knowing the field-type mapping rules. The plan is
//! served alongside the raw config so clients never re-derive controls.

use serde::{Deserialize, Serialize};

use super::schema::{ApplicationFormConfig, FieldType, FormField};

/// Neutral first entry of every choice control.
pub const NO_SELECTION_LABEL: &str = "Select an option";

/// Prompt shown by a file picker before a file is chosen.
pub const UPLOAD_PROMPT: &str = "Click to upload or drag and drop";

/// Concrete input control for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "control")]
pub enum FieldControl {
    /// One-line input; `input_type` is the HTML input type to use.
    SingleLine {
        #[serde(rename = "inputType")]
        input_type: String,
        placeholder: Option<String>,
    },
    /// Free-form multi-line input.
    MultiLine { placeholder: Option<String> },
    /// Drop-down whose first entry is the neutral no-selection label.
    Choice { options: Vec<String> },
    /// Numeric input carrying the configured bounds.
    NumericEntry {
        min: Option<f64>,
        max: Option<f64>,
        placeholder: Option<String>,
    },
    /// Single-file picker showing the chosen name with a remove
    /// affordance, or the upload prompt when nothing is chosen.
    FilePicker { prompt: String },
    /// Single checkbox.
    CheckboxToggle,
}

/// One field of the plan, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedField {
    pub id: String,
    pub label: String,
    pub required: bool,
    #[serde(flatten)]
    pub control: FieldControl,
}

/// Build the render plan for a config. A disabled form renders nothing.
pub fn render_plan(config: &ApplicationFormConfig) -> Vec<RenderedField> {
    if !config.enabled {
        return Vec::new();
    }
    config.fields.iter().map(render_field).collect()
}

fn render_field(field: &FormField) -> RenderedField {
    let control = match field.field_type {
        FieldType::Textarea => FieldControl::MultiLine {
            placeholder: field.placeholder.clone(),
        },
        FieldType::Select => {
            let mut options = Vec::with_capacity(
                1 + field.options.as_ref().map_or(0, Vec::len),
            );
            options.push(NO_SELECTION_LABEL.to_string());
            if let Some(configured) = &field.options {
                options.extend(configured.iter().cloned());
            }
            FieldControl::Choice { options }
        }
        FieldType::File => FieldControl::FilePicker {
            prompt: UPLOAD_PROMPT.to_string(),
        },
        FieldType::Number => {
            let bounds = field.validation.as_ref();
            FieldControl::NumericEntry {
                min: bounds.and_then(|b| b.min),
                max: bounds.and_then(|b| b.max),
                placeholder: field.placeholder.clone(),
            }
        }
        FieldType::Checkbox => FieldControl::CheckboxToggle,
        FieldType::Text | FieldType::Email | FieldType::Phone => FieldControl::SingleLine {
            input_type: input_type_for(field.field_type).to_string(),
            placeholder: field.placeholder.clone(),
        },
    };
    RenderedField {
        id: field.id.clone(),
        label: field.label.clone(),
        required: field.required,
        control,
    }
}

/// HTML input type for single-line fields.
fn input_type_for(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Email => "email",
        FieldType::Phone => "tel",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::schema::NumberBounds;

    fn config_with(fields: Vec<FormField>) -> ApplicationFormConfig {
        let mut config = ApplicationFormConfig::default();
        config.enabled = true;
        config.fields = fields;
        config
    }

    fn field(id: &str, field_type: FieldType) -> FormField {
        let mut f = FormField::new(id.to_string());
        f.field_type = field_type;
        f
    }

    #[test]
    fn test_disabled_form_renders_nothing() {
        let mut config = config_with(vec![field("a", FieldType::Text)]);
        config.enabled = false;
        assert!(render_plan(&config).is_empty());
    }

    #[test]
    fn test_plan_preserves_schema_order() {
        let config = config_with(vec![
            field("first", FieldType::Text),
            field("second", FieldType::Textarea),
        ]);
        let plan = render_plan(&config);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].id, "first");
        assert_eq!(plan[1].id, "second");
    }

    #[test]
    fn test_select_gets_neutral_entry_then_options_in_order() {
        let mut f = field("region", FieldType::Select);
        f.options = Some(vec!["North".to_string(), "South".to_string()]);
        let plan = render_plan(&config_with(vec![f]));
        match &plan[0].control {
            FieldControl::Choice { options } => {
                assert_eq!(options[0], NO_SELECTION_LABEL);
                assert_eq!(&options[1..], ["North", "South"]);
            }
            other => panic!("expected choice control, got {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_ignored_for_select_and_checkbox() {
        let mut select = field("s", FieldType::Select);
        select.placeholder = Some("pick one".to_string());
        select.options = Some(vec![]);
        let mut checkbox = field("c", FieldType::Checkbox);
        checkbox.placeholder = Some("tick me".to_string());

        let plan = render_plan(&config_with(vec![select, checkbox]));
        assert!(matches!(plan[0].control, FieldControl::Choice { .. }));
        assert_eq!(plan[1].control, FieldControl::CheckboxToggle);
    }

    #[test]
    fn test_number_carries_bounds() {
        let mut f = field("age", FieldType::Number);
        f.validation = Some(NumberBounds {
            min: Some(13.0),
            max: Some(25.0),
        });
        let plan = render_plan(&config_with(vec![f]));
        match &plan[0].control {
            FieldControl::NumericEntry { min, max, .. } => {
                assert_eq!(*min, Some(13.0));
                assert_eq!(*max, Some(25.0));
            }
            other => panic!("expected numeric control, got {other:?}"),
        }
    }

    #[test]
    fn test_input_types_per_field_type() {
        let plan = render_plan(&config_with(vec![
            field("t", FieldType::Text),
            field("e", FieldType::Email),
            field("p", FieldType::Phone),
        ]));
        let types: Vec<&str> = plan
            .iter()
            .map(|r| match &r.control {
                FieldControl::SingleLine { input_type, .. } => input_type.as_str(),
                other => panic!("expected single-line control, got {other:?}"),
            })
            .collect();
        assert_eq!(types, ["text", "email", "tel"]);
    }

    #[test]
    fn test_file_picker_carries_prompt() {
        let plan = render_plan(&config_with(vec![field("cv", FieldType::File)]));
        assert_eq!(
            plan[0].control,
            FieldControl::FilePicker {
                prompt: UPLOAD_PROMPT.to_string()
            }
        );
    }
}
