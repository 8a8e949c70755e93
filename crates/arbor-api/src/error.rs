//! API error mapping.
//!
//! Every handler error becomes an enveloped HTTP response: typed not-found
//! → 404, validation and refused state changes → 400, storage faults
//! (including a detected cyclic hierarchy) → 500 with the detail in `data`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use arbor_core::responses::ApiResponse;
use arbor_db::error::DatabaseError;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<DatabaseError> for ApiError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { .. } => Self::NotFound(error.to_string()),
            DatabaseError::InvalidState(_) => Self::BadRequest(error.to_string()),
            DatabaseError::CyclicHierarchy { .. }
            | DatabaseError::Query(_)
            | DatabaseError::Migration(_)
            | DatabaseError::LibSql(_)
            | DatabaseError::Other(_) => {
                tracing::error!(%error, "storage failure");
                Self::Internal(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, detail) = match self {
            Self::BadRequest(detail) => (StatusCode::BAD_REQUEST, "Bad Request", detail),
            Self::NotFound(detail) => (StatusCode::NOT_FOUND, "Resource Not Found", detail),
            Self::Internal(detail) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", detail)
            }
        };
        let body: ApiResponse<serde_json::Value> =
            ApiResponse::error(status.as_u16(), message, Some(detail.into()));
        (status, Json(body)).into_response()
    }
}
