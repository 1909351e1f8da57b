use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::io;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file was attached to the upload.")]
    MissingFile,

    #[error("The uploaded file is empty.")]
    EmptyFile,

    #[error("Files of type '{0}' are not accepted.")]
    UnsupportedType(String),

    #[error("The file is too large. The maximum size is {max_bytes} bytes.")]
    TooLarge { max_bytes: usize },

    #[error("The server is not allowed to store this file.")]
    PermissionDenied,

    #[error("Storage is full. Please try again later.")]
    StorageFull,

    #[error("The upload could not be read: {0}")]
    Multipart(String),

    #[error("The file could not be stored. Please try again.")]
    Storage(#[source] io::Error),
}

impl UploadError {
    /// Maps a storage failure to the message shown to the user.
    #[must_use]
    pub fn from_storage(err: io::Error, max_bytes: usize) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::StorageFull | io::ErrorKind::QuotaExceeded => Self::StorageFull,
            io::ErrorKind::FileTooLarge => Self::TooLarge { max_bytes },
            _ => Self::Storage(err),
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::MissingFile | Self::EmptyFile | Self::Multipart(_) => StatusCode::BAD_REQUEST,
            Self::UnsupportedType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::StorageFull => StatusCode::INSUFFICIENT_STORAGE,
            Self::PermissionDenied | Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        match &self {
            Self::Storage(e) => error!("Failed to store upload: {:?}", e),
            Self::PermissionDenied | Self::StorageFull => error!("Upload storage: {}", self),
            _ => warn!("Upload rejected: {}", self),
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
