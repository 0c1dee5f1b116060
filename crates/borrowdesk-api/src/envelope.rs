//! Response Envelope
//!
//! The backend wraps payloads as `{ status, message?, data }`, but not every
//! route does. Bodies are unwrapped here, once, so pages only see typed values.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// A decoded payload plus the server's optional `message`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse { data: f(self.data), message: self.message }
    }

    /// Server message, or `fallback` when the server sent none
    pub fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// Split a body into (payload, message)
fn open(body: &[u8]) -> Result<(Value, Option<String>), ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok((Value::Null, None));
    }
    let value: Value = serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    match value {
        Value::Object(mut map) => {
            let message = map.get("message").and_then(Value::as_str).map(str::to_string);
            match map.remove("data") {
                Some(data) => Ok((data, message)),
                None => Ok((Value::Object(map), message)),
            }
        }
        other => Ok((other, None)),
    }
}

/// Decode a single payload
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<ApiResponse<T>, ApiError> {
    let (payload, message) = open(body)?;
    let data = serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(ApiResponse { data, message })
}

/// Decode a list payload. A missing or `null` payload is an empty list.
pub fn decode_list<T: DeserializeOwned>(body: &[u8]) -> Result<ApiResponse<Vec<T>>, ApiError> {
    let (payload, message) = open(body)?;
    let data = match payload {
        Value::Null => Vec::new(),
        Value::Array(_) => serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?,
        other => {
            return Err(ApiError::Decode(format!("expected a list, got {}", kind_of(&other))));
        }
    };
    Ok(ApiResponse { data, message })
}

/// Keep only the message; used by routes whose payload nobody reads
pub fn decode_message(body: &[u8]) -> Result<ApiResponse<()>, ApiError> {
    let (_, message) = open(body)?;
    Ok(ApiResponse { data: (), message })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: u32,
    }

    #[test]
    fn test_enveloped_list() {
        let decoded: ApiResponse<Vec<Thing>> =
            decode_list(br#"{"status":true,"message":"ok","data":[{"id":1},{"id":2}]}"#).unwrap();
        assert_eq!(decoded.data, vec![Thing { id: 1 }, Thing { id: 2 }]);
        assert_eq!(decoded.message.as_deref(), Some("ok"));
    }

    #[test]
    fn test_bare_list() {
        let decoded: ApiResponse<Vec<Thing>> = decode_list(br#"[{"id":7}]"#).unwrap();
        assert_eq!(decoded.data, vec![Thing { id: 7 }]);
        assert!(decoded.message.is_none());
    }

    #[test]
    fn test_null_or_empty_list_payload() {
        let decoded: ApiResponse<Vec<Thing>> = decode_list(br#"{"status":true,"data":null}"#).unwrap();
        assert!(decoded.data.is_empty());

        let decoded: ApiResponse<Vec<Thing>> = decode_list(b"").unwrap();
        assert!(decoded.data.is_empty());
    }

    #[test]
    fn test_object_where_list_expected_is_an_error() {
        let result: Result<ApiResponse<Vec<Thing>>, _> = decode_list(br#"{"status":true,"data":{"id":1}}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_single_without_envelope() {
        let decoded: ApiResponse<Thing> = decode(br#"{"id":3,"message":"fresh"}"#).unwrap();
        assert_eq!(decoded.data, Thing { id: 3 });
        assert_eq!(decoded.message.as_deref(), Some("fresh"));
    }

    #[test]
    fn test_message_or() {
        let decoded = decode_message(br#"{"status":true,"message":"Item deleted"}"#).unwrap();
        assert_eq!(decoded.message_or("Deleted"), "Item deleted");
        let decoded = decode_message(b"{}").unwrap();
        assert_eq!(decoded.message_or("Deleted"), "Deleted");
    }
}
