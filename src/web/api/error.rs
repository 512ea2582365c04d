use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::feed::FeedError;
use crate::geocode::GeocodeError;
use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(&'static str),
    #[error("trajectory feed unavailable: {0}")]
    Feed(FeedError),
    /// The feed was reachable but its content could not be used.
    #[error("unusable trajectory data: {0}")]
    FeedData(TelemetryError),
    #[error("geodetic conversion failed: {0}")]
    Conversion(String),
    #[error("reverse geocoding failed: {0}")]
    Geocode(GeocodeError),
}

impl From<FeedError> for ApiError {
    fn from(e: FeedError) -> Self {
        ApiError::Feed(e)
    }
}

impl From<GeocodeError> for ApiError {
    fn from(e: GeocodeError) -> Self {
        ApiError::Geocode(e)
    }
}

impl From<TelemetryError> for ApiError {
    fn from(e: TelemetryError) -> Self {
        match e {
            TelemetryError::Conversion(msg) => ApiError::Conversion(msg),
            other => ApiError::FeedData(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(what) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(what))).into_response()
            }
            ApiError::Feed(e) => {
                log::warn!("Trajectory feed unavailable: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::with_message("feed_unavailable", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::FeedData(TelemetryError::EmptyInput) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse::new("empty_feed")),
            )
                .into_response(),
            ApiError::FeedData(e) => {
                log::warn!("Unusable trajectory data: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::with_message("invalid_feed_data", &e.to_string())),
                )
                    .into_response()
            }
            ApiError::Conversion(msg) => {
                log::error!("Geodetic conversion failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::with_message("conversion_failed", &msg)),
                )
                    .into_response()
            }
            ApiError::Geocode(e) => {
                log::warn!("Reverse geocoding failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorResponse::with_message("geocoder_unavailable", &e.to_string())),
                )
                    .into_response()
            }
        }
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
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
