use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blakely_common::{BlakelyError, HttpStatusCode};
use serde_json::{json, Value};
use thiserror::Error;

/// VIP gallery request errors.
///
/// The gallery page reads `message` rather than `error`, so these render
/// their own body.
#[derive(Error, Debug)]
pub enum VipError {
    #[error("Invalid JSON body")]
    InvalidBody,

    #[error("Provide exactly one of assetIds or folderId.")]
    FinalizeTarget,

    #[error("`assetIds` must be a non-empty array of strings")]
    InvalidAssetIds,

    /// Carries the rejected value so the caller can see it
    #[error("`ttlDays` must be an integer")]
    InvalidTtlDays(Value),
}

impl HttpStatusCode for VipError {
    fn status_code(&self) -> u16 {
        400
    }
}

impl From<VipError> for BlakelyError {
    fn from(err: VipError) -> Self {
        BlakelyError::ValidationError(err.to_string())
    }
}

impl IntoResponse for VipError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_REQUEST);
        let body = match &self {
            VipError::InvalidTtlDays(value) => {
                json!({ "message": self.to_string(), "ttlDays": value })
            }
            _ => json!({ "message": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
