//! Request field validation.
//!
//! DTOs derive [`validator::Validate`]; [`validate`] runs the derived rules
//! and flattens the nested error tree into a flat, sorted list of
//! [`FieldError`]s with paths like `actors[1].name`.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Error param naming the field a struct-level check reports against.
const FIELD_PARAM: &str = "field";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted/indexed path to the offending field.
    pub field: String,
    /// Machine-readable rule name (e.g. `range`, `blank`).
    pub code: String,
    pub message: String,
}

/// Reject strings that are empty or only whitespace.
///
/// Intended for `#[validate(custom(function = "not_blank"))]`.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Report a struct-level (`schema`) error under `field` instead of `__all__`.
///
/// Lets a collection carry both a size limit and `nested` item rules: the
/// derive macro cannot put two kinds of error on one key.
pub fn for_field(field: &'static str, mut err: ValidationError) -> ValidationError {
    err.add_param(Cow::Borrowed(FIELD_PARAM), &field);
    err
}

/// Run the derived validation rules on `input`.
///
/// Returns [`CoreError::InvalidFields`] listing every failure.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(flatten(&errors)))
}

/// Flatten a validator error tree into sorted [`FieldError`]s.
pub fn flatten(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect("", errors, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    out
}

fn collect(prefix: &str, errors: &ValidationErrors, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|err| FieldError {
                    field: match err.params.get(FIELD_PARAM).and_then(|v| v.as_str()) {
                        Some(target) if prefix.is_empty() => target.to_string(),
                        Some(target) => format!("{prefix}.{target}"),
                        None => path.clone(),
                    },
                    code: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", err.code)),
                }));
            }
            ValidationErrorsKind::Struct(inner) => collect(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(&format!("{path}[{index}]"), inner, out);
                }
            }
        }
    }
}
