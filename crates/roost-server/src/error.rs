//! Response conversion for gate denials and internal faults.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roost_access::Denial;
use roost_core::RoostError;
use serde_json::json;
use tracing::error;

/// Handler-level error: either a terminal gate denial or an
/// unexpected fault outside the access-control chain.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Denied(#[from] Denial),

    #[error(transparent)]
    Internal(#[from] RoostError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Denied(denial) => {
                let status = StatusCode::from_u16(denial.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, Json(denial)).into_response()
            }
            ApiError::Internal(err) => {
                error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": "Internal server error",
                        "code": "INTERNAL_ERROR",
                    })),
                )
                    .into_response()
            }
        }
    }
}
