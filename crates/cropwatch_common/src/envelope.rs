//! Response envelope handling.
//!
//! The gateway wraps every JSON success as `{"success": true, "data": ...}`
//! and every failure as `{"success": false, "error": {"code", "message"}}`.
//! Unwrapping happens exactly once, at the client boundary, and fails fast
//! on any shape mismatch so malformed payloads never reach render logic.

use crate::error::ApiError;
use serde_json::Value;

/// Unwrap one level of the standard envelope, returning the inner payload.
///
/// A well-formed error envelope becomes [`ApiError::Status`] carrying the
/// server-provided code and message (the HTTP status is supplied by the
/// caller, since this function never sees the transport). Anything that is
/// neither a success nor an error envelope is [`ApiError::Envelope`].
pub fn unwrap(body: Value, http_status: u16) -> Result<Value, ApiError> {
    let Value::Object(mut map) = body else {
        return Err(ApiError::Envelope(format!(
            "expected envelope object, got {}",
            kind(&body)
        )));
    };

    match map.get("success").and_then(Value::as_bool) {
        Some(true) => map
            .remove("data")
            .ok_or_else(|| ApiError::Envelope("success envelope missing data field".to_string())),
        Some(false) => Err(error_from_envelope(&map, http_status)),
        None => Err(ApiError::Envelope(
            "envelope missing boolean success field".to_string(),
        )),
    }
}

/// Build a structured error from a `success: false` envelope body.
///
/// Also used by the client when a non-2xx response carries an envelope,
/// so server-side error details survive into [`ApiError::Status`].
pub fn error_from_envelope(map: &serde_json::Map<String, Value>, http_status: u16) -> ApiError {
    let error = map.get("error");
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .unwrap_or("Unknown")
        .to_string();
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(Value::as_str)
        // Older gateway builds put a bare string under "error".
        .or_else(|| error.and_then(Value::as_str))
        .unwrap_or("request failed")
        .to_string();

    ApiError::Status {
        status: http_status,
        code,
        message,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_success_exactly_one_level() {
        let body = json!({
            "success": true,
            "data": {"temperature": 24.5, "humidity": 60}
        });
        let payload = unwrap(body, 200).unwrap();
        assert_eq!(payload, json!({"temperature": 24.5, "humidity": 60}));
    }

    #[test]
    fn test_unwrap_preserves_nested_data_key() {
        // Only the outer envelope is removed; an inner "data" field is payload.
        let body = json!({"success": true, "data": {"data": [1, 2, 3]}});
        let payload = unwrap(body, 200).unwrap();
        assert_eq!(payload, json!({"data": [1, 2, 3]}));
    }

    #[test]
    fn test_error_envelope_becomes_structured_error() {
        let body = json!({
            "success": false,
            "error": {"code": "SensorReadError", "message": "Failed to read from sensors."}
        });
        match unwrap(body, 503) {
            Err(ApiError::Status {
                status,
                code,
                message,
            }) => {
                assert_eq!(status, 503);
                assert_eq!(code, "SensorReadError");
                assert_eq!(message, "Failed to read from sensors.");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_string_error_field() {
        let body = json!({"success": false, "error": "No file uploaded"});
        match unwrap(body, 400) {
            Err(ApiError::Status { message, .. }) => assert_eq!(message, "No file uploaded"),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_data_fails_fast() {
        let body = json!({"success": true});
        assert!(matches!(unwrap(body, 200), Err(ApiError::Envelope(_))));
    }

    #[test]
    fn test_unwrapped_payload_rejected() {
        // Legacy endpoints returned the payload bare; that contract is gone.
        let body = json!({"temperature": 24.5});
        assert!(matches!(unwrap(body, 200), Err(ApiError::Envelope(_))));
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(matches!(
            unwrap(json!([1, 2, 3]), 200),
            Err(ApiError::Envelope(_))
        ));
    }
}
