use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Error body returned by every REST endpoint.
///
/// Serialized as `{"message": "...", "details": "..."}`; `details` is omitted
/// when empty. The HTTP status travels alongside but is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(skip)]
    pub status: u16,
    /// Human-readable summary for this occurrence.
    pub message: String,
    /// Underlying failure text (store errors and the like).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Problem {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Axum response wrapper that renders `Problem` with its status and a JSON content type.
#[derive(Debug, Clone)]
pub struct ProblemResponse(pub Problem);

impl From<Problem> for ProblemResponse {
    fn from(p: Problem) -> Self {
        Self(p)
    }
}

impl IntoResponse for ProblemResponse {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let mut resp = axum::Json(self.0).into_response();
        *resp.status_mut() = status;
        resp.headers_mut().insert(
            axum::http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        resp
    }
}

pub fn bad_request(message: impl Into<String>) -> ProblemResponse {
    Problem::new(StatusCode::BAD_REQUEST, message).into()
}

pub fn unauthorized(message: impl Into<String>) -> ProblemResponse {
    Problem::new(StatusCode::UNAUTHORIZED, message).into()
}

pub fn not_found(message: impl Into<String>) -> ProblemResponse {
    Problem::new(StatusCode::NOT_FOUND, message).into()
}

pub fn internal_error(message: impl Into<String>, details: impl Into<String>) -> ProblemResponse {
    Problem::new(StatusCode::INTERNAL_SERVER_ERROR, message)
        .with_details(details)
        .into()
}
