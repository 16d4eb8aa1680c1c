//! Request-document validation.
//!
//! Validation walks the raw JSON value and aggregates every violated
//! constraint before failing, so a caller can report the complete set of
//! bad fields in one response. A document that fails here never reaches
//! the channel or the model client.

use {
    serde::Serialize,
    serde_json::{Map, Value},
    thiserror::Error,
};

use crate::{BrowserData, MAX_PROMPT_CHARS, PromptRequest, UserData};

/// One violated constraint: the dotted field path plus a human-readable reason.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// The full set of constraint violations for one request document.
#[derive(Debug, Error)]
#[error("invalid request document: {}", self.summary())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// All violations as a single `field: reason; field: reason` line,
    /// suitable for the public error envelope.
    pub fn summary(&self) -> String {
        self.violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.reason))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Validate and normalize a raw request document.
///
/// Applies defaults (`stream = false`, `datetime = false`) for absent
/// optional fields. Pure function: no side effects, no partial mutation of
/// the input.
pub fn validate(doc: &Value) -> Result<PromptRequest, ValidationError> {
    let Some(obj) = doc.as_object() else {
        return Err(ValidationError {
            violations: vec![FieldViolation::new("$", "request body must be a JSON object")],
        });
    };

    let mut violations = Vec::new();

    let prompt_user = match obj.get("prompt_user") {
        Some(Value::String(s)) => {
            if s.chars().count() > MAX_PROMPT_CHARS {
                violations.push(FieldViolation::new(
                    "prompt_user",
                    format!("must not exceed {MAX_PROMPT_CHARS} characters"),
                ));
                None
            } else {
                Some(s.clone())
            }
        },
        Some(_) => {
            violations.push(FieldViolation::new("prompt_user", "must be a string"));
            None
        },
        None => {
            violations.push(FieldViolation::new("prompt_user", "required field missing"));
            None
        },
    };

    let stream = match obj.get("stream") {
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            violations.push(FieldViolation::new("stream", "must be a boolean"));
            false
        },
        None => false,
    };

    // Absent `datetime` normalizes to JSON `false`, matching the upstream
    // contract (see `PromptRequest::datetime`).
    let datetime = match obj.get("datetime") {
        Some(v) if v.is_i64() || v.is_u64() => v.clone(),
        Some(_) => {
            violations.push(FieldViolation::new("datetime", "must be an integer"));
            Value::Bool(false)
        },
        None => Value::Bool(false),
    };

    let user_data = match obj.get("user_data") {
        Some(Value::Object(ud)) => validate_user_data(ud, &mut violations),
        Some(_) => {
            violations.push(FieldViolation::new("user_data", "must be an object"));
            None
        },
        None => {
            violations.push(FieldViolation::new("user_data", "required field missing"));
            None
        },
    };

    match (prompt_user, user_data) {
        (Some(prompt_user), Some(user_data)) if violations.is_empty() => Ok(PromptRequest {
            prompt_user,
            stream,
            user_data,
            datetime,
        }),
        _ => Err(ValidationError { violations }),
    }
}

fn validate_user_data(ud: &Map<String, Value>, violations: &mut Vec<FieldViolation>) -> Option<UserData> {
    let id = required_string(ud, "id", "user_data.id", violations);

    let browser_data = match ud.get("browserData") {
        Some(Value::Object(bd)) => validate_browser_data(bd, violations),
        Some(_) => {
            violations.push(FieldViolation::new("user_data.browserData", "must be an object"));
            None
        },
        None => {
            violations.push(FieldViolation::new(
                "user_data.browserData",
                "required field missing",
            ));
            None
        },
    };

    Some(UserData {
        id: id?,
        browser_data: browser_data?,
    })
}

fn validate_browser_data(
    bd: &Map<String, Value>,
    violations: &mut Vec<FieldViolation>,
) -> Option<BrowserData> {
    let prefix = "user_data.browserData";
    let user_agent = required_string(bd, "userAgent", &format!("{prefix}.userAgent"), violations);
    let screen_resolution = required_string(
        bd,
        "screenResolution",
        &format!("{prefix}.screenResolution"),
        violations,
    );
    let language = required_string(bd, "language", &format!("{prefix}.language"), violations);
    let platform = required_string(bd, "platform", &format!("{prefix}.platform"), violations);

    Some(BrowserData {
        user_agent: user_agent?,
        screen_resolution: screen_resolution?,
        language: language?,
        platform: platform?,
    })
}

fn required_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match obj.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(FieldViolation::new(path, "must be a string"));
            None
        },
        None => {
            violations.push(FieldViolation::new(path, "required field missing"));
            None
        },
    }
}
