//! Field-level validation for inbound JSON bodies.
//!
//! Each entity declares a `const` schema slice; handlers run [`validate`]
//! over the decoded body before deserializing it into a typed payload.
//! Errors accumulate into an ordered field → messages map so every bad
//! field is reported in one response.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Text { max_len: Option<usize> },
    Integer,
    /// Nullable foreign key; accepts an integer pk or explicit null.
    Reference,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Rejects non-object bodies the way a list or bare string would be
/// rejected upstream: a `non_field_errors` entry naming the actual type.
pub fn require_object(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object().ok_or_else(|| {
        let mut errors = FieldErrors::new();
        errors.insert(
            "non_field_errors".into(),
            vec![format!(
                "Invalid data. Expected a dictionary, but got {}.",
                type_name(body)
            )],
        );
        errors
    })
}

/// Checks `body` against `schema`. In partial mode absent fields are
/// skipped; present fields are always validated. Unknown fields are
/// ignored.
pub fn validate(schema: &[Field], body: &Map<String, Value>, partial: bool) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for field in schema {
        match body.get(field.name) {
            None => {
                if field.required && !partial {
                    push(&mut errors, field.name, "This field is required.".into());
                }
            }
            Some(Value::Null) => match field.kind {
                FieldKind::Reference => {}
                _ => push(&mut errors, field.name, "This field may not be null.".into()),
            },
            Some(value) => check_value(&mut errors, field, value),
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fallback for bodies that pass schema checks but still fail typed
/// deserialization.
pub fn invalid_data() -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert("non_field_errors".into(), vec!["Invalid data.".into()]);
    errors
}

/// Field error for a reference naming a pk with no matching row.
pub fn invalid_pk(field: &'static str, pk: i64) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(
        field.into(),
        vec![format!("Invalid pk \"{pk}\" - object does not exist.")],
    );
    errors
}

fn check_value(errors: &mut FieldErrors, field: &Field, value: &Value) {
    match field.kind {
        FieldKind::Text { max_len } => {
            let Some(text) = value.as_str() else {
                push(errors, field.name, "Not a valid string.".into());
                return;
            };
            if field.required && text.trim().is_empty() {
                push(errors, field.name, "This field may not be blank.".into());
            } else if let Some(max) = max_len {
                if text.chars().count() > max {
                    push(
                        errors,
                        field.name,
                        format!("Ensure this field has no more than {max} characters."),
                    );
                }
            }
        }
        FieldKind::Integer => {
            if value.as_i64().is_none() {
                push(errors, field.name, "A valid integer is required.".into());
            }
        }
        FieldKind::Reference => {
            if value.as_i64().is_none() {
                push(
                    errors,
                    field.name,
                    format!(
                        "Incorrect type. Expected pk value, received {}.",
                        type_name(value)
                    ),
                );
            }
        }
    }
}

fn push(errors: &mut FieldErrors, name: &str, message: String) {
    errors.entry(name.to_string()).or_default().push(message);
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
