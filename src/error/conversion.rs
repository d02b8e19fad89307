/**
 * Error Conversion
 *
 * Converts `ApiError` values into HTTP responses so handlers can return
 * them directly. Responses are JSON with the shape:
 *
 * ```json
 * { "error": "Team not found", "status": 404 }
 * ```
 */

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        // Unexpected failures are logged server-side; the caller only sees
        // the generic message.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error serving request: {}", self);
        }

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap_or_else(
                |_| format!(r#"{{"error":"{}","status":{}}}"#, message, status.as_u16()),
            )))
            .unwrap_or_else(|_| {
                Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from("Internal Server Error"))
                    .unwrap()
            })
    }
}
