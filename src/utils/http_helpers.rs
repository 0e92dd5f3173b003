use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

/// Every way a request can fail.
///
/// Clients never see the distinction: each variant renders as a bare 500.
/// The variant and its message are only logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("identity provider call failed: {0}")]
    ExternalCall(String),
    #[error("storage failure: {0}")]
    Storage(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short label used for log fields and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MalformedInput(_) => "malformed_input",
            AppError::Authentication(_) => "authentication",
            AppError::ExternalCall(_) => "external_call",
            AppError::Storage(_) => "storage",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::MalformedInput(format!("Decoding form: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedInput(format!("Decoding query: {}", rejection.body_text()))
    }
}

/// Converts an `AppError` into the generic "Internal Server Error" response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error_kind = self.kind(), "{}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(CONTENT_TYPE, "text/plain; charset=utf-8")],
            "Internal Server Error",
        )
            .into_response()
    }
}

/// Router fallback for every path without a handler.
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain; charset=utf-8")],
        "404: Not Found",
    )
        .into_response()
}

/// Reads the token from the `Authorization` header.
///
/// Accepts `Bearer <token>` as well as a raw token, since mobile clients send the latter.
pub fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let raw = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or("");

    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        _ => raw,
    };

    if token.is_empty() {
        return Err(AppError::MalformedInput(
            "missing Authorization header".to_string(),
        ));
    }
    Ok(token.to_string())
}
