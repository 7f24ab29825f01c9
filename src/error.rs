use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

/// Wire shape of every failure the backend returns.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "No autorizado")
    }

    pub fn missing_fields() -> Self {
        Self::bad_request("Missing fields")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

pub fn internal(e: anyhow::Error) -> ApiError {
    error!(error = %e, "internal error");
    ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Decodes a request body into `T`. Unparseable JSON, a missing JSON content
/// type and type mismatches all become a 400 with the usual error shape.
pub fn parse_body<T: serde::de::DeserializeOwned>(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(value) = payload.map_err(|e| {
        tracing::warn!(error = %e.body_text(), "request body is not json");
        ApiError::bad_request("Invalid request body")
    })?;
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "request body rejected");
        ApiError::bad_request("Invalid request body")
    })
}
