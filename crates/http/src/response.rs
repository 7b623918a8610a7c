//! Uniform response envelope for all corkboard endpoints.
//!
//! Every response body, success or failure, is exactly one envelope:
//!
//! - `{"success": true, "data": ...}` for a success carrying a payload
//! - `{"success": true}` for a success with nothing to return
//! - `{"success": false, "error": {...}}` for a failure
//!
//! Handlers return the success arms directly; the failure arm is produced
//! by [`crate::error::AppError`] so it carries the right status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::ErrorBody;

/// Tagged-union response envelope.
#[derive(Debug)]
pub enum ApiResponse<T> {
    /// Success carrying a payload.
    Payload(T),
    /// Success with no payload.
    Empty,
    /// Failure carrying error details.
    Error(ErrorBody),
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            ApiResponse::Payload(data) => {
                map.serialize_entry("success", &true)?;
                map.serialize_entry("data", data)?;
            }
            ApiResponse::Empty => {
                map.serialize_entry("success", &true)?;
            }
            ApiResponse::Error(error) => {
                map.serialize_entry("success", &false)?;
                map.serialize_entry("error", error)?;
            }
        }
        map.end()
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
