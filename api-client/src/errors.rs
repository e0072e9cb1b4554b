// API client errors

use serde_json::Value;

/// API client error types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Network communication error (connection refused, DNS, TLS, ...)
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("{message}")]
    Status {
        status: u16,
        message: String,
        /// Parsed response body, `Null` when it was empty or not JSON
        body: Value,
    },

    /// Caller header or token cannot be sent as an HTTP header
    #[error("無効なヘッダーです: {0}")]
    InvalidHeader(String),

    /// Request body could not be converted to JSON
    #[error("リクエストの変換に失敗しました: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    /// Build a status error from a failed response
    ///
    /// The message is taken from the body's `error` field, then its
    /// `message` field, and otherwise synthesized from the status line.
    pub fn from_response(status: reqwest::StatusCode, body: Value) -> Self {
        let message = body_message(&body, "error")
            .or_else(|| body_message(&body, "message"))
            .unwrap_or_else(|| match status.canonical_reason() {
                Some(reason) => format!("HTTP {}: {}", status.as_u16(), reason),
                None => format!("HTTP {}", status.as_u16()),
            });

        ApiError::Status {
            status: status.as_u16(),
            message,
            body,
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True when the server rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Field value usable as an error message. Empty strings, `false`, `0`
/// and `null` are skipped so the next candidate is tried.
fn body_message(body: &Value, field: &str) -> Option<String> {
    match body.get(field)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;

    // ========================================
    // ApiError::from_response のテスト
    // ========================================

    #[test]
    fn test_error_field_is_preferred() {
        let error = ApiError::from_response(
            StatusCode::NOT_FOUND,
            json!({ "error": "not found", "message": "ignored" }),
        );

        assert_eq!(error.to_string(), "not found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn test_message_field_is_fallback() {
        let error = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            json!({ "success": false, "message": "Champ manquant: duration" }),
        );

        assert_eq!(error.to_string(), "Champ manquant: duration");
    }

    #[test]
    fn test_empty_error_falls_through_to_message() {
        let error = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            json!({ "error": "", "message": "bad input" }),
        );

        assert_eq!(error.to_string(), "bad input");
    }

    #[test]
    fn test_null_body_synthesizes_status_line() {
        let error = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, Value::Null);

        assert_eq!(error.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_unknown_status_has_no_reason() {
        let status = StatusCode::from_u16(599).unwrap();
        let error = ApiError::from_response(status, json!({}));

        assert_eq!(error.to_string(), "HTTP 599");
    }

    #[test]
    fn test_non_string_error_is_rendered_as_json() {
        let error = ApiError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            json!({ "error": { "field": "image" } }),
        );

        assert_eq!(error.to_string(), r#"{"field":"image"}"#);
    }

    #[test]
    fn test_is_unauthorized() {
        let error = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            json!({ "error": "Token invalide" }),
        );

        assert!(error.is_unauthorized());
        assert_eq!(error.to_string(), "Token invalide");
    }

    #[test]
    fn test_invalid_header_display() {
        let error = ApiError::InvalidHeader("x y".to_string());
        assert_eq!(error.to_string(), "無効なヘッダーです: x y");
    }
}
