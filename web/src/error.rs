//! Error rendering for action services.
//!
//! Bridges [`ActionError`] to HTTP responses: every rejection renders as a
//! 400-status JSON body carrying a message and an optional code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity_controller_core::ActionError;
use serde::Serialize;

/// JSON body rendered for a rejected action.
///
/// ```json
/// {
///   "message": "name is required",
///   "code": "MISSING_NAME"
/// }
/// ```
///
/// `code` is omitted when the error carries none.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
    /// Optional code for client error handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl From<&ActionError> for ErrorBody {
    fn from(err: &ActionError) -> Self {
        Self {
            message: err.message(),
            code: err.code().map(str::to_owned),
        }
    }
}

/// Response wrapper for a rejected action.
///
/// Implements [`IntoResponse`], so handlers can use
/// `Result<Json<T>, ActionRejection>` directly.
#[derive(Debug)]
pub struct ActionRejection(pub ActionError);

impl From<ActionError> for ActionRejection {
    fn from(err: ActionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ActionRejection {
    fn into_response(self) -> Response {
        // Log internal sources, never expose them to the client.
        if let ActionError::Other(source) = &self.0 {
            tracing::error!(error = %source, "action failed with internal error");
        }

        let body = ErrorBody::from(&self.0);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_body_includes_code_when_present() {
        let err = ActionError::validation("name is required").with_code("MISSING_NAME");
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            body,
            json!({"message": "name is required", "code": "MISSING_NAME"})
        );
    }

    #[test]
    fn test_body_omits_absent_code() {
        let err = ActionError::query("lookup failed");
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body, json!({"message": "lookup failed"}));
    }

    #[test]
    fn test_internal_errors_render_fixed_message() {
        let err = ActionError::from(anyhow_error());
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body["message"], "An unexpected error has occurred");
        assert!(body.get("code").is_none());
    }

    #[test]
    fn test_rejection_status_is_400() {
        let response =
            ActionRejection(ActionError::validation("bad input")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    fn anyhow_error() -> anyhow::Error {
        serde_json::from_str::<Value>("not json")
            .map_err(anyhow::Error::from)
            .unwrap_err()
    }
}
