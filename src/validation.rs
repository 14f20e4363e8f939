use serde::Serialize;
use serde_json::Value;

use crate::database::models::contact::{ContactPatch, CreateContact, NewContact};
use crate::types::Field;

/// One failed input constraint, reported back as an item of `{errors: [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl FieldError {
    pub fn body(param: impl Into<String>, msg: impl Into<String>, value: Option<Value>) -> Self {
        Self {
            msg: msg.into(),
            param: param.into(),
            location: "body".to_string(),
            value,
        }
    }
}

/// Error for a request body that could not be read as JSON of the right shape
pub fn body_error(detail: impl Into<String>) -> FieldError {
    FieldError::body("body", detail, None)
}

pub const NAME_REQUIRED: &str = "Name is required";

fn name_is_valid(name: &str) -> bool {
    !name.trim().is_empty()
}

/// Check a create payload and turn it into an insertable contact.
pub fn validate_create(payload: CreateContact) -> Result<NewContact, Vec<FieldError>> {
    let mut errors = Vec::new();

    match payload.name.as_deref() {
        Some(name) if name_is_valid(name) => {}
        other => errors.push(FieldError::body(
            "name",
            NAME_REQUIRED,
            other.map(|n| Value::String(n.to_string())),
        )),
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewContact {
        name: payload.name.unwrap_or_default(),
        email: payload.email,
        phone: payload.phone,
        kind: payload.kind,
    })
}

/// A patch may leave `name` out, but may not blank it.
pub fn validate_patch(patch: &ContactPatch) -> Result<(), Vec<FieldError>> {
    if let Field::Present(name) = &patch.name {
        if !name_is_valid(name) {
            return Err(vec![FieldError::body(
                "name",
                "Name cannot be empty",
                Some(Value::String(name.clone())),
            )]);
        }
    }
    Ok(())
}
