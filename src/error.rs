use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::models::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum HeadshotError {
    #[error("Missing image data or prompts")]
    MissingInput,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Remote generation error: {0}")]
    RemoteGeneration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Failed to store upload: {0}")]
    UploadFailed(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl HeadshotError {
    /// Client errors are the caller's fault and carry no server-side detail.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HeadshotError::MissingInput | HeadshotError::InvalidImage(_) | HeadshotError::Upload(_)
        )
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            HeadshotError::MissingInput => ErrorResponse::new(self.to_string()),
            HeadshotError::InvalidImage(details) => {
                ErrorResponse::new("Invalid image").with_details(details.clone())
            }
            HeadshotError::Upload(message) => ErrorResponse::new(message.clone()),
            HeadshotError::UploadFailed(details) => {
                ErrorResponse::new("Failed to upload image").with_details(details.clone())
            }
            other => ErrorResponse::new("Failed to generate headshot").with_details(other.to_string()),
        }
    }
}

impl ResponseError for HeadshotError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }
}

pub type Result<T> = std::result::Result<T, HeadshotError>;
