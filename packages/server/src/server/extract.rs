//! Request extractors that reject with [`AppError`].

use axum::extract::{rejection::JsonRejection, FromRequest};

use crate::common::AppError;

/// `axum::Json` whose rejection is a 400 `{"message": ...}` like every other
/// client error, instead of axum's plain-text 415/422.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}
