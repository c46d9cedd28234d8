use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::matching::{MatchingServiceError, RepositoryError};
use crate::workflows::procurement::{PolicyError, ProcurementError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Policy(PolicyError),
    Procurement(ProcurementError),
    Matching(MatchingServiceError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Procurement(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Matching(MatchingServiceError::InvalidRule(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Policy(err) => write!(f, "policy error: {}", err),
            AppError::Procurement(err) => write!(f, "procurement error: {}", err),
            AppError::Matching(err) => write!(f, "tender matching error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Policy(err) => Some(err),
            AppError::Procurement(err) => Some(err),
            AppError::Matching(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<PolicyError> for AppError {
    fn from(value: PolicyError) -> Self {
        Self::Policy(value)
    }
}

impl From<ProcurementError> for AppError {
    fn from(value: ProcurementError) -> Self {
        Self::Procurement(value)
    }
}

impl From<MatchingServiceError> for AppError {
    fn from(value: MatchingServiceError) -> Self {
        Self::Matching(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Matching(MatchingServiceError::Repository(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::procurement::ValidationError;

    #[test]
    fn validation_failures_map_to_bad_request() {
        let err = AppError::from(ProcurementError::from(ValidationError::UnknownWorkType(
            "space".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn persistence_failures_map_to_internal_error() {
        let err = AppError::from(RepositoryError::Unavailable("offline".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("offline"));
    }
}
