use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Request-failing errors. Best-effort notification trouble is deliberately
/// absent here: it is swallowed by the booking service and only changes the
/// success message (see `NotifyError`).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("All fields are required")]
    Validation,
    #[error("{message}")]
    Storage {
        message: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    pub fn storage(message: &'static str, source: anyhow::Error) -> Self {
        ApiError::Storage { message, source }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage { source, .. } = self {
            error!("Database Error: {:#}", source);
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "All fields are required");
    }

    #[test]
    fn storage_maps_to_500_with_its_message() {
        let err = ApiError::storage(
            "Failed to save appointment",
            anyhow::anyhow!("connection refused"),
        );
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to save appointment");
    }

    #[test]
    fn error_body_is_an_error_field() {
        let body = serde_json::to_value(ErrorResponse {
            error: "All fields are required".to_string(),
        })
        .unwrap();
        assert_eq!(body["error"], "All fields are required");
    }
}
