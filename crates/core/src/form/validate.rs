//! Pre-submission answer validation.
//!
//! Runs entirely before any network call, in three passes over the fields
//! in schema order — required, then email shape, then phone shape — and
//! stops at the first failure. The message strings here are user-facing
//! and rendered verbatim next to the form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::schema::{FieldType, FormField};

/// Answers keyed by field id. Values are strings for text-like inputs,
/// booleans for checkboxes, and URL strings for uploaded files.
pub type AnswerMap = serde_json::Map<String, Value>;

/// Permissive `local@domain.tld` shape; anything with one `@`, no
/// whitespace, and a dotted domain passes.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

/// Digits, spaces, `+`, `-`, and parentheses only.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s+\-()]+$").expect("valid regex"));

/// A single field failure; `message` is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValidationError {
    pub field_id: String,
    pub message: String,
}

impl fmt::Display for FormValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for FormValidationError {}

/// Validate a permissive email shape (shared with the fixed applicant
/// identity fields).
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Validate a permissive phone shape (shared with the fixed applicant
/// identity fields).
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Validate answers against the schema. First failure wins.
///
/// 1. Every `required` field must have a non-empty trimmed value; file
///    fields must have a chosen file (non-empty string answer); a required
///    checkbox must be checked.
/// 2. Every email field with a non-empty value must match the permissive
///    email shape.
/// 3. Every phone field with a non-empty value must contain only digits,
///    spaces, `+`, `-`, and parentheses.
pub fn validate_answers(
    fields: &[FormField],
    answers: &AnswerMap,
) -> Result<(), FormValidationError> {
    for field in fields {
        if !field.required {
            continue;
        }
        let value = answer_text(answers.get(&field.id));
        let unfilled = if field.field_type == FieldType::Checkbox {
            value != "true"
        } else {
            value.trim().is_empty()
        };
        if unfilled {
            let message = if field.field_type == FieldType::File {
                format!("Please upload a file for {}", field.label)
            } else {
                format!("Please fill in {}", field.label)
            };
            return Err(FormValidationError {
                field_id: field.id.clone(),
                message,
            });
        }
    }

    for field in fields {
        if field.field_type != FieldType::Email {
            continue;
        }
        let value = answer_text(answers.get(&field.id));
        if !value.trim().is_empty() && !is_valid_email(value.trim()) {
            return Err(FormValidationError {
                field_id: field.id.clone(),
                message: format!(
                    "Please enter a valid email address for {}",
                    field.label
                ),
            });
        }
    }

    for field in fields {
        if field.field_type != FieldType::Phone {
            continue;
        }
        let value = answer_text(answers.get(&field.id));
        if !value.trim().is_empty() && !is_valid_phone(value.trim()) {
            return Err(FormValidationError {
                field_id: field.id.clone(),
                message: format!(
                    "Please enter a valid phone number for {}",
                    field.label
                ),
            });
        }
    }

    Ok(())
}

/// Text form of an answer: strings as-is, booleans as "true"/"false",
/// numbers formatted, everything else (missing, null, arrays) empty.
fn answer_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(id: &str, label: &str, field_type: FieldType, required: bool) -> FormField {
        let mut f = FormField::new(id.to_string());
        f.label = label.to_string();
        f.field_type = field_type;
        f.required = required;
        f
    }

    fn answers(pairs: &[(&str, Value)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_required_empty_fails_with_label() {
        let fields = vec![field("n", "Full name", FieldType::Text, true)];
        let err = validate_answers(&fields, &answers(&[("n", json!(""))])).unwrap_err();
        assert_eq!(err.message, "Please fill in Full name");
        assert_eq!(err.field_id, "n");
    }

    #[test]
    fn test_required_whitespace_only_fails() {
        let fields = vec![field("n", "Full name", FieldType::Text, true)];
        let err = validate_answers(&fields, &answers(&[("n", json!("   "))])).unwrap_err();
        assert_eq!(err.message, "Please fill in Full name");
    }

    #[test]
    fn test_required_missing_key_fails() {
        let fields = vec![field("n", "Full name", FieldType::Text, true)];
        assert!(validate_answers(&fields, &AnswerMap::new()).is_err());
    }

    #[test]
    fn test_optional_empty_passes() {
        let fields = vec![field("n", "Nickname", FieldType::Text, false)];
        assert!(validate_answers(&fields, &AnswerMap::new()).is_ok());
    }

    #[test]
    fn test_required_file_message_variant() {
        let fields = vec![field("cv", "Your CV", FieldType::File, true)];
        let err = validate_answers(&fields, &answers(&[("cv", json!(""))])).unwrap_err();
        assert_eq!(err.message, "Please upload a file for Your CV");

        let ok = answers(&[("cv", json!("https://cdn.example.org/u/cv.pdf"))]);
        assert!(validate_answers(&fields, &ok).is_ok());
    }

    #[test]
    fn test_required_checkbox_must_be_checked() {
        let fields = vec![field("terms", "Terms of entry", FieldType::Checkbox, true)];
        assert!(validate_answers(&fields, &answers(&[("terms", json!(false))])).is_err());
        assert!(validate_answers(&fields, &answers(&[("terms", json!(true))])).is_ok());
    }

    #[test]
    fn test_literal_false_string_fills_a_text_field() {
        let fields = vec![field("q", "Answer", FieldType::Text, true)];
        assert!(validate_answers(&fields, &answers(&[("q", json!("false"))])).is_ok());
    }

    #[test]
    fn test_email_shapes() {
        let fields = vec![field("e", "Email", FieldType::Email, false)];
        assert!(validate_answers(&fields, &answers(&[("e", json!("a@b.com"))])).is_ok());

        let err =
            validate_answers(&fields, &answers(&[("e", json!("not-an-email"))])).unwrap_err();
        assert_eq!(err.message, "Please enter a valid email address for Email");
    }

    #[test]
    fn test_optional_email_empty_passes() {
        let fields = vec![field("e", "Email", FieldType::Email, false)];
        assert!(validate_answers(&fields, &answers(&[("e", json!(""))])).is_ok());
    }

    #[test]
    fn test_phone_shapes() {
        let fields = vec![field("p", "Phone", FieldType::Phone, false)];
        let ok = answers(&[("p", json!("+1 (555) 123-4567"))]);
        assert!(validate_answers(&fields, &ok).is_ok());

        let err = validate_answers(&fields, &answers(&[("p", json!("call-me"))])).unwrap_err();
        assert_eq!(err.message, "Please enter a valid phone number for Phone");
    }

    #[test]
    fn test_required_pass_runs_before_format_passes() {
        // The empty required text field must be reported before the invalid
        // email that sits earlier in the list.
        let fields = vec![
            field("e", "Email", FieldType::Email, false),
            field("n", "Name", FieldType::Text, true),
        ];
        let input = answers(&[("e", json!("bad-address")), ("n", json!(""))]);
        let err = validate_answers(&fields, &input).unwrap_err();
        assert_eq!(err.field_id, "n");
    }

    #[test]
    fn test_first_failure_wins_in_schema_order() {
        let fields = vec![
            field("a", "First", FieldType::Text, true),
            field("b", "Second", FieldType::Text, true),
        ];
        let err = validate_answers(&fields, &AnswerMap::new()).unwrap_err();
        assert_eq!(err.field_id, "a");
    }

    #[test]
    fn test_number_answer_counts_as_filled() {
        let fields = vec![field("age", "Age", FieldType::Number, true)];
        assert!(validate_answers(&fields, &answers(&[("age", json!(17))])).is_ok());
    }

    #[test]
    fn test_required_select_with_zero_options_still_requires_selection() {
        // A required select with no options is unsatisfiable by a real
        // user; left at the placeholder it fails the required check. The
        // builder permits saving such a field — documented, not fixed.
        let mut f = field("s", "Region", FieldType::Select, true);
        f.options = Some(vec![]);
        let err = validate_answers(&[f], &answers(&[("s", json!(""))])).unwrap_err();
        assert_eq!(err.message, "Please fill in Region");
    }
}
