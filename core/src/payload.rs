//! Validation of client-supplied todo payloads.
//!
//! # Design
//! Payloads are kept as raw JSON objects until validated so the key set can
//! be checked against a fixed whitelist before any field is interpreted. The
//! checks run in a fixed order: required keys, unexpected keys, then field
//! types. Unexpected keys are reported sorted so error messages are stable.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::error::TodoError;
use crate::timestamp::parse_iso8601;
use crate::types::{NewTodo, TodoChanges};

/// A JSON object as received from a client.
pub type Payload = Map<String, Value>;

/// Keys a create or update payload may contain.
pub const ALLOWED_FIELDS: [&str; 6] = [
    "title",
    "description",
    "completed",
    "deadline_at",
    "created_at",
    "updated_at",
];

/// Keys a create payload must contain.
pub const REQUIRED_FIELDS: [&str; 1] = ["title"];

/// Decode a request body into a payload object.
pub fn parse_body(body: &[u8]) -> Result<Payload, TodoError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| TodoError::validation(format!("Invalid JSON body: {e}")))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(TodoError::validation("Request body must be a JSON object")),
    }
}

/// Validate a create payload. `created_at` and `updated_at` are server-managed:
/// they must be timestamps or null if present, but both are set to `now`.
pub fn new_todo(payload: &Payload, now: NaiveDateTime) -> Result<NewTodo, TodoError> {
    check_required(payload)?;
    check_allowed(payload)?;
    check_server_managed(payload)?;

    let title = match payload.get("title") {
        Some(Value::String(title)) if !title.is_empty() => title.clone(),
        _ => return Err(invalid("title")),
    };

    Ok(NewTodo {
        title,
        description: nullable_string(payload, "description")?.flatten(),
        completed: boolean(payload, "completed")?.unwrap_or(false),
        deadline_at: nullable_timestamp(payload, "deadline_at")?.flatten(),
        created_at: now,
        updated_at: now,
    })
}

/// Validate an update payload. Only the keys present are changed.
pub fn todo_changes(payload: &Payload) -> Result<TodoChanges, TodoError> {
    check_allowed(payload)?;
    check_server_managed(payload)?;

    let title = match payload.get("title") {
        None => None,
        Some(Value::String(title)) => Some(title.clone()),
        Some(_) => return Err(invalid("title")),
    };

    Ok(TodoChanges {
        title,
        description: nullable_string(payload, "description")?,
        completed: boolean(payload, "completed")?,
        deadline_at: nullable_timestamp(payload, "deadline_at")?,
    })
}

fn check_required(payload: &Payload) -> Result<(), TodoError> {
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !payload.contains_key(*field))
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(TodoError::validation(format!(
        "Missing required fields: {}",
        missing.join(", ")
    )))
}

fn check_allowed(payload: &Payload) -> Result<(), TodoError> {
    let mut extra: Vec<&str> = payload
        .keys()
        .map(String::as_str)
        .filter(|key| !ALLOWED_FIELDS.contains(key))
        .collect();
    if extra.is_empty() {
        return Ok(());
    }
    extra.sort_unstable();
    Err(TodoError::validation(format!(
        "Unexpected fields: {}",
        extra.join(", ")
    )))
}

fn check_server_managed(payload: &Payload) -> Result<(), TodoError> {
    for field in ["created_at", "updated_at"] {
        nullable_timestamp(payload, field)?;
    }
    Ok(())
}

fn invalid(field: &str) -> TodoError {
    TodoError::validation(format!("Invalid value for field: {field}"))
}

/// `None` when absent, `Some(None)` when explicitly null.
fn nullable_string(payload: &Payload, field: &str) -> Result<Option<Option<String>>, TodoError> {
    match payload.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(s)) => Ok(Some(Some(s.clone()))),
        Some(_) => Err(invalid(field)),
    }
}

fn nullable_timestamp(
    payload: &Payload,
    field: &str,
) -> Result<Option<Option<NaiveDateTime>>, TodoError> {
    match payload.get(field) {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(raw)) => parse_iso8601(field, raw).map(|ts| Some(Some(ts))),
        Some(_) => Err(invalid(field)),
    }
}

// null is treated as absent
fn boolean(payload: &Payload, field: &str) -> Result<Option<bool>, TodoError> {
    match payload.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(invalid(field)),
    }
}
