use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Uniform body returned by every company route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            success: true,
            code: None,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failure(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            success: false,
            code: Some(code.to_string()),
            message: message.into(),
            data: None,
        }
    }
}

impl ApiResponse<()> {
    /// Success-shaped HTTP exchange that reports a domain-level "nothing to show".
    pub fn empty(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            success: false,
            code: Some(code.to_string()),
            message: message.into(),
            data: None,
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            success: true,
            code: None,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
