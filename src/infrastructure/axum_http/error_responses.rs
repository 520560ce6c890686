use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::application::usercases::{
    clients::ClientError, contacts::ContactError, subscriptions::SubscriptionError,
};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

/// JSON error body. Internal errors never leak their detail to the client;
/// the detail has already been logged at the usecase layer.
pub fn error_response(status: StatusCode, message: String) -> Response {
    let body = Json(ErrorResponse {
        code: status.as_u16(),
        message,
    });
    (status, body).into_response()
}

impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ClientError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(status, message)
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ContactError::Storage(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };
        error_response(status, message)
    }
}

impl IntoResponse for SubscriptionError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), "Internal server error".to_string())
    }
}
