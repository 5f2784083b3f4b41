use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::CatalogError;
use crate::predict::PredictError;
use crate::tle::TleError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Catalog(CatalogError),
    Encoding(TleError),
    Predict(PredictError),
    Internal(String),
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        ApiError::Catalog(e)
    }
}

impl From<TleError> for ApiError {
    fn from(e: TleError) -> Self {
        ApiError::Encoding(e)
    }
}

impl From<PredictError> for ApiError {
    fn from(e: PredictError) -> Self {
        ApiError::Predict(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_failed", msg),
            ApiError::Catalog(e @ CatalogError::UnknownObject(_)) => {
                (StatusCode::NOT_FOUND, "object_not_found", e.to_string())
            }
            ApiError::Catalog(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "catalog_error", e.to_string())
            }
            ApiError::Encoding(e) => {
                let error = match e.root() {
                    TleError::EncodingOverflow { .. } => "encoding_overflow",
                    _ => "malformed_element_record",
                };
                (StatusCode::UNPROCESSABLE_ENTITY, error, e.to_string())
            }
            ApiError::Predict(e @ PredictError::NoPassFound { .. }) => {
                (StatusCode::NOT_FOUND, "no_pass_found", e.to_string())
            }
            ApiError::Predict(e @ PredictError::PropagatorFailure(_)) => {
                (StatusCode::BAD_GATEWAY, "propagator_failure", e.to_string())
            }
            ApiError::Predict(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "predict_error", e.to_string())
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };
        (status, Json(ErrorResponse::with_message(error, &message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
