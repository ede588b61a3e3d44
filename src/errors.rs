use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// A sleep session that must not reach the metrics engine; every variant
/// names the offending session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("session {id}: {field} is not a valid timestamp")]
    MalformedTimestamp { id: String, field: &'static str },
    #[error("session {id}: wake time must be after bed time")]
    WakeNotAfterBed { id: String },
    #[error("session {id}: quality {quality} is outside 1-10")]
    QualityOutOfRange { id: String, quality: u8 },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}
