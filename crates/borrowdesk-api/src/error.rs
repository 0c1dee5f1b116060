//! API Errors
//!
//! Every failure the gateway can hand back to a page.

use serde_json::Value;
use thiserror::Error;

/// Common result type for gateway calls
pub type ApiResult<T> = Result<T, ApiError>;

/// Validation messages for one form field, in server order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors {
    pub field: String,
    pub messages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response arrived (connection refused, DNS, CORS, timeout)
    #[error("network error calling {url} ({code}): {message}")]
    Network {
        url: String,
        code: &'static str,
        message: String,
    },

    /// HTTP 401. `login_required` is false for the login and register routes,
    /// where a 401 just means bad credentials.
    #[error("unauthorized")]
    Unauthorized {
        message: Option<String>,
        login_required: bool,
    },

    /// A 4xx carrying a field error map (usually 422)
    #[error("validation failed")]
    Validation {
        status: u16,
        message: Option<String>,
        errors: Vec<FieldErrors>,
    },

    /// Any other non-success status
    #[error("server returned {status}")]
    Server { status: u16, message: Option<String> },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not build request: {0}")]
    Request(String),
}

impl ApiError {
    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The `message` field of the failure body, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// True when the session is gone and the user must sign in again
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthorized { login_required: true, .. })
    }

    /// One line for a toast.
    ///
    /// Server message first, then every validation message joined with `", "`,
    /// then the caller's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        if let Some(message) = self.server_message().filter(|m| !m.trim().is_empty()) {
            return message.to_string();
        }
        if let ApiError::Validation { errors, .. } = self {
            let joined = errors
                .iter()
                .flat_map(|field| field.messages.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(", ");
            if !joined.is_empty() {
                return joined;
            }
        }
        fallback.to_string()
    }
}

/// `message` and `errors` pulled out of a failure body
#[derive(Debug, Default)]
pub(crate) struct FailureBody {
    pub message: Option<String>,
    pub errors: Vec<FieldErrors>,
}

impl FailureBody {
    /// Lenient parse: a non-JSON or empty body gives an empty `FailureBody`.
    pub fn parse(body: &[u8]) -> Self {
        let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let message = map.get("message").and_then(Value::as_str).map(str::to_string);

        let errors = match map.get("errors") {
            Some(Value::Object(fields)) => fields
                .iter()
                .map(|(field, value)| FieldErrors {
                    field: field.clone(),
                    messages: flatten_messages(value),
                })
                .filter(|field| !field.messages.is_empty())
                .collect(),
            _ => Vec::new(),
        };

        Self { message, errors }
    }
}

fn flatten_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(values) => values.iter().flat_map(flatten_messages).collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_message() {
        let err = ApiError::Server { status: 500, message: Some("Database offline".into()) };
        assert_eq!(err.user_message("Failed to load"), "Database offline");
    }

    #[test]
    fn test_user_message_joins_validation_errors() {
        let body = br#"{"errors":{"name":["The name field is required."],"quantity":["Must be an integer.","Must be at least 0."]}}"#;
        let parsed = FailureBody::parse(body);
        let err = ApiError::Validation { status: 422, message: parsed.message, errors: parsed.errors };
        assert_eq!(
            err.user_message("Failed to add item"),
            "The name field is required., Must be an integer., Must be at least 0."
        );
    }

    #[test]
    fn test_user_message_fallback() {
        let err = ApiError::Network {
            url: "http://localhost:8000/api/user/items".into(),
            code: "ERR_NETWORK",
            message: "connection refused".into(),
        };
        assert_eq!(err.user_message("Failed to load inventory data"), "Failed to load inventory data");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_failure_body_tolerates_garbage() {
        let parsed = FailureBody::parse(b"<html>502 Bad Gateway</html>");
        assert!(parsed.message.is_none());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_requires_login() {
        assert!(ApiError::Unauthorized { message: None, login_required: true }.requires_login());
        assert!(!ApiError::Unauthorized { message: None, login_required: false }.requires_login());
        assert!(!ApiError::Server { status: 403, message: None }.requires_login());
    }
}
