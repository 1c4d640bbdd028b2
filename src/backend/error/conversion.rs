/**
 * Error Conversion
 *
 * `IntoResponse` for `ApiError`, so handlers can return
 * `Result<Json<T>, ApiError>` and have the error rendered as a JSON body
 * with the matching status code.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "message": "member not found",
 *   "status": 404
 * }
 * ```
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected: {self}");
        }

        let body = serde_json::json!({
            "message": self.public_message(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
