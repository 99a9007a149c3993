use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use uuid::Uuid;

use facette_core::FacetteError;

use crate::dto::MessageResponse;
use crate::views::ErrorPage;

/// Failures surfacing at the HTTP boundary.
#[derive(Debug)]
pub enum WebError {
    NotFound,
    MethodNotAllowed,
    /// Anything else; the detail is logged, never sent to the client.
    Internal(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Logs internal failures and returns the trace id tying the log line to the response.
    fn log(&self, operation: &str) -> Option<String> {
        let Self::Internal(detail) = self else {
            return None;
        };
        let trace_id = Uuid::new_v4().to_string();
        tracing::error!(%trace_id, operation, "{detail}");
        Some(trace_id)
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("not found"),
            Self::MethodNotAllowed => f.write_str("method not allowed"),
            Self::Internal(detail) => write!(f, "internal error: {detail}"),
        }
    }
}

impl std::error::Error for WebError {}

impl From<FacetteError> for WebError {
    fn from(err: FacetteError) -> Self {
        match err {
            FacetteError::NotFound(_) => Self::NotFound,
            other => Self::Internal(format!("{}: {other}", other.code())),
        }
    }
}

impl From<askama::Error> for WebError {
    fn from(err: askama::Error) -> Self {
        Self::Internal(format!("template render failed: {err}"))
    }
}

pub fn page_error_response(err: WebError, operation: &str, url_prefix: &str) -> Response {
    let status = err.status();
    if matches!(err, WebError::MethodNotAllowed) {
        return status.into_response();
    }
    let trace_id = err.log(operation).unwrap_or_default();
    match ErrorPage::new(url_prefix, status, trace_id).render_page() {
        Ok(body) => (status, Html(body)).into_response(),
        Err(render_err) => {
            tracing::error!(
                operation,
                status = status.as_u16(),
                "error page render failed: {render_err}"
            );
            status.into_response()
        }
    }
}

pub fn api_error_response(err: WebError, operation: &str) -> Response {
    let status = err.status();
    let trace_id = err.log(operation);
    let message = match err {
        WebError::NotFound => "not found",
        WebError::MethodNotAllowed => "method not allowed",
        WebError::Internal(_) => "internal server error",
    };
    (
        status,
        Json(MessageResponse {
            message: message.to_string(),
            trace_id,
        }),
    )
        .into_response()
}
