//! Field-level checks applied to employee payloads at the API boundary.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use utoipa::ToSchema;

use crate::model::employee::{Gender, ProfileColor, Salutation};

/// Fields a create request must carry, in the order their errors are reported.
pub const REQUIRED_FIELDS: [&str; 8] = [
    "employeeNumber",
    "firstName",
    "lastName",
    "fullName",
    "gender",
    "salutation",
    "grossSalaryPY",
    "profileColor",
];

/// Text fields with the longest value the `employees` columns hold.
const TEXT_FIELDS: [(&str, usize); 3] = [
    ("firstName", 255),
    ("lastName", 255),
    ("fullName", 511),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "gender")]
    pub field: String,
    #[schema(example = "Gender must be either MALE, FEMALE, or UNSPECIFIED")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn is_member<T: FromStr>(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.parse::<T>().is_ok())
}

/// Check `payload` against presence, enum-membership and type rules.
///
/// In [`ValidationMode::Create`] every field in [`REQUIRED_FIELDS`] must be
/// present. In both modes each present field must hold an acceptable value;
/// `null` counts as present. Keys that are not employee fields are ignored.
pub fn validate(payload: &Map<String, Value>, mode: ValidationMode) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if mode == ValidationMode::Create {
        for field in REQUIRED_FIELDS {
            if !payload.contains_key(field) {
                errors.push(FieldError::new(field, format!("{} is required", field)));
            }
        }
    }

    if let Some(v) = payload.get("gender") {
        if !is_member::<Gender>(v) {
            errors.push(FieldError::new(
                "gender",
                "Gender must be either MALE, FEMALE, or UNSPECIFIED",
            ));
        }
    }

    if let Some(v) = payload.get("salutation") {
        if !is_member::<Salutation>(v) {
            errors.push(FieldError::new(
                "salutation",
                "Salutation must be either DR, MR, MS, MRS, or MX",
            ));
        }
    }

    if let Some(v) = payload.get("profileColor") {
        if !is_member::<ProfileColor>(v) {
            errors.push(FieldError::new(
                "profileColor",
                "Profile color must be either GREEN, BLUE, RED, or DEFAULT",
            ));
        }
    }

    // employee numbers are whole numbers; JSON fractions are rejected
    if let Some(v) = payload.get("employeeNumber") {
        if v.as_i64().is_none() {
            errors.push(FieldError::new(
                "employeeNumber",
                "Employee number must be a valid number",
            ));
        }
    }

    if let Some(v) = payload.get("grossSalaryPY") {
        if !v.is_number() {
            errors.push(FieldError::new(
                "grossSalaryPY",
                "Gross salary must be a valid number",
            ));
        }
    }

    for (field, max_len) in TEXT_FIELDS {
        match payload.get(field) {
            None => {}
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.push(FieldError::new(field, format!("{} must not be empty", field)));
            }
            Some(Value::String(s)) if s.chars().count() > max_len => {
                errors.push(FieldError::new(
                    field,
                    format!("{} must be at most {} characters", field, max_len),
                ));
            }
            Some(Value::String(_)) => {}
            Some(_) => {
                errors.push(FieldError::new(field, format!("{} must be a string", field)));
            }
        }
    }

    errors
}
