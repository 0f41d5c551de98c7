use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::debug;

/// HTTP face of a failed album operation.
///
/// Bad requests carry `{"error": ...}` and misses carry `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

/// Any body the JSON extractor refuses counts as malformed input.
pub fn malformed_body(rejection: JsonRejection) -> ServiceError {
    debug!(reason = %rejection.body_text(), "request body rejected");
    ServiceError::malformed()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let msg = self.0.to_string();
        match self.0 {
            ServiceError::MalformedInput(_) | ServiceError::InvalidArgument(_) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": msg}))).into_response()
            }
            ServiceError::NotFound(_) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({"message": msg}))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_error_kind() {
        let resp = ApiError(ServiceError::malformed()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError(ServiceError::InvalidArgument("bad".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = ApiError(ServiceError::not_found("album")).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
