use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use occupancy::OccupancyError;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

pub const NOT_FOUND_MESSAGE: &str = "Parking spot not found";
pub const UNSUPPORTED_MESSAGE: &str = "This parking spot does not support detailed simulation";

#[derive(Serialize)]
pub struct ErrorMessage {
    #[serde(skip)]
    pub status_code: StatusCode,
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Occupancy(#[from] OccupancyError),
    #[error("no facility can have id {0}")]
    UnknownFacility(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Occupancy(OccupancyError::NotFound(id)) => {
                warn!(facility_id = id, "parking facility not found");
                ErrorMessage::from((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)).into_response()
            }
            ApiError::UnknownFacility(raw) => {
                warn!(facility_id = %raw, "parking id outside the facility id range");
                ErrorMessage::from((StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)).into_response()
            }
            ApiError::Occupancy(OccupancyError::UnsupportedOperation(id)) => {
                warn!(
                    facility_id = id,
                    "sensor simulation requested for facility without spaces"
                );
                ErrorMessage::from((StatusCode::BAD_REQUEST, UNSUPPORTED_MESSAGE)).into_response()
            }
            ApiError::InvalidInput(e) => {
                warn!(error = %e, "invalid input");
                ErrorMessage::from((StatusCode::BAD_REQUEST, e)).into_response()
            }
        }
    }
}

impl From<(StatusCode, String)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, String)) -> Self {
        Self {
            status_code,
            success: false,
            message,
        }
    }
}

impl From<(StatusCode, &str)> for ErrorMessage {
    fn from((status_code, message): (StatusCode, &str)) -> Self {
        Self {
            status_code,
            success: false,
            message: message.into(),
        }
    }
}

impl IntoResponse for ErrorMessage {
    fn into_response(self) -> Response {
        (self.status_code, Json(self)).into_response()
    }
}
