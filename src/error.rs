use crate::{media_store, repository};
use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("validation error: media too large {size}/{max_size}B")]
    ValidationMediaTooLarge { size: usize, max_size: usize },

    #[error("multipart error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("capsule already exists")]
    CapsuleAlreadyExists,

    #[error("media not exist")]
    MediaNotExist,

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    #[error("media store error: {0}")]
    MediaStore(#[from] media_store::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        match self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::ValidationMediaTooLarge {
                size: _,
                max_size: _,
            } => StatusCode::PAYLOAD_TOO_LARGE,
            Error::Multipart(err) => err.status(),
            Error::CapsuleAlreadyExists => StatusCode::CONFLICT,
            Error::MediaNotExist => StatusCode::NOT_FOUND,
            Error::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::MediaStore(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
        .into_response()
    }
}
