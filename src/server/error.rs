/// Maps `FlashcardError` onto HTTP responses and hides fault details

use super::state::AppState;
use crate::error::FlashcardError;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::any::Any;
use std::sync::Arc;
use tracing::error;

/// Body sent in place of details when errors aren't exposed
pub const OPAQUE_MESSAGE: &str = "Internal server error";

/// Handler error. Client mistakes become 400/404 plain text, everything
/// else a 500 JSON fault.
#[derive(Debug)]
pub struct ApiError(pub FlashcardError);

impl From<FlashcardError> for ApiError {
    fn from(err: FlashcardError) -> Self {
        ApiError(err)
    }
}

/// Marks a response as a server fault so the boundary can find it
#[derive(Debug, Clone, Copy)]
pub struct Fault;

#[derive(Serialize)]
struct FaultBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            FlashcardError::NotFound => not_found().into_response(),
            err if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.user_message()).into_response()
            }
            err => {
                error!(error = %err, chain = ?err.chain(), "request failed");

                let body = FaultBody {
                    error: err.to_string(),
                    stack: Some(err.chain()),
                };

                let mut response = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
                response.extensions_mut().insert(Fault);
                response
            }
        }
    }
}

pub fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Error boundary wrapped around every route.
///
/// Faults keep their message and cause chain only when the deployment asks
/// for it. Otherwise the body is replaced with an opaque one.
pub async fn error_boundary(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if state.config.expose_errors || response.extensions().get::<Fault>().is_none() {
        return response;
    }

    let body = FaultBody {
        error: OPAQUE_MESSAGE.to_string(),
        stack: None,
    };

    let mut redacted = (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
    redacted.extensions_mut().insert(Fault);

    redacted
}

/// Turns a handler panic into the same 500 fault as any other error
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    ApiError(FlashcardError::Generic(message)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_bad_request() {
        let response =
            ApiError(FlashcardError::Validation("Front and back are required".into())).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.extensions().get::<Fault>().is_none());
    }

    #[test]
    fn test_not_found() {
        let response = ApiError(FlashcardError::NotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_faults_are_marked() {
        let response = ApiError(FlashcardError::Generic("boom".into())).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.extensions().get::<Fault>().is_some());
    }

    #[test]
    fn test_panic_message_kept() {
        let response = panic_response(Box::new("kaboom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
