use crate::journal::JournalError;
use serde_json::json;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_params(message: impl Into<String>) -> Self {
        Self::new("bad_params", message)
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<JournalError> for HandlerErr {
    fn from(e: JournalError) -> Self {
        let details = match &e {
            JournalError::UnknownClass(name) => Some(json!({ "className": name })),
            JournalError::UnknownSubject(name) => Some(json!({ "subject": name })),
            JournalError::StudentNotFound(name) => Some(json!({ "student": name })),
            JournalError::NoPendingDelete | JournalError::Storage(_) => None,
        };
        if let JournalError::Storage(inner) = &e {
            tracing::error!(error = ?inner, "storage write failed");
        }
        Self {
            code: e.code(),
            message: e.to_string(),
            details,
        }
    }
}

/// Collapses a handler result into the response envelope.
pub fn respond(id: &str, result: Result<serde_json::Value, HandlerErr>) -> serde_json::Value {
    match result {
        Ok(v) => ok(id, v),
        Err(e) => e.response(id),
    }
}
