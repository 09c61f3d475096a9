use crate::ENCODING_FAILED_BODY;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;

pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub error_code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    #[inline]
    pub fn new(message: String, error_code: u32) -> Self {
        Self {
            message,
            error_code,
            errors: None,
        }
    }

    fn into_response_with(self, status_code: StatusCode) -> Response {
        let tuple = match serde_json::to_vec(&self) {
            Ok(buf) => (
                status_code,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
                )],
                buf,
            ),
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(mime::APPLICATION_JSON.as_ref()),
                )],
                ENCODING_FAILED_BODY.to_vec(),
            ),
        };

        tuple.into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Server service panicked: {0:?}")]
    ServicePanicked(Option<String>),
    #[error("The message could not be found")]
    MessageNotFound,
    #[error("Failed to communicate with the database")]
    SqlxError,
}

impl From<&ApiError> for StatusCode {
    fn from(value: &ApiError) -> Self {
        match value {
            ApiError::ServicePanicked(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MessageNotFound => StatusCode::NOT_FOUND,
            ApiError::SqlxError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&ApiError> for u32 {
    fn from(value: &ApiError) -> Self {
        match value {
            ApiError::ServicePanicked(_) => 50001,
            ApiError::MessageNotFound => 40401,
            ApiError::SqlxError => 50002,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ErrorBody::new(self.to_string(), (&self).into()).into_response_with((&self).into())
    }
}

/// Error shape produced outside of [`ApiError`], e.g. by body extraction
/// rejections and by the non-success service outcomes.
#[derive(Debug)]
pub struct ErrorResponse {
    pub status_code: StatusCode,
    pub error_code: u32,
    pub message: String,
    pub errors: Option<FieldErrors>,
}

impl ErrorResponse {
    #[inline]
    pub fn new(status_code: StatusCode, error_code: u32, message: String) -> Self {
        Self {
            status_code,
            error_code,
            message,
            errors: None,
        }
    }
}

impl From<ApiError> for ErrorResponse {
    fn from(value: ApiError) -> Self {
        Self::new((&value).into(), (&value).into(), value.to_string())
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            error_code: self.error_code,
            errors: self.errors,
        };

        body.into_response_with(self.status_code)
    }
}
