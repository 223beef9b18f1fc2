use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors raised while serving a request or talking to the provider.
///
/// Each variant maps to one HTTP status through [`IntoResponse`], so
/// handlers can return `Result<_, ApiError>` and use `?` throughout.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status. The body is kept
    /// verbatim so it can be passed through.
    #[error("Upstream responded with {status}")]
    Upstream { status: StatusCode, body: String },

    #[error("Unexpected upstream payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A field the projection needs was absent, named by its JSON path.
    #[error("Upstream payload is missing `{0}`")]
    MissingField(&'static str),

    /// No post with the requested slug.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A slug outside `[a-z0-9-]+`.
    #[error("Invalid slug: {0:?}")]
    InvalidSlug(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Broken local content or settings, such as unparsable front matter.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// True when the failure came from talking to the upstream provider
    /// (transport, error status, or an undecodable body).
    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(
            self,
            ApiError::Http(_) | ApiError::Upstream { .. } | ApiError::Decode(_)
        )
    }
}

/// Result alias used by the client, the projection and the handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Renders the error as a JSON body `{"error": "..."}`, except for
/// [`ApiError::Upstream`], whose status and body are replayed unchanged.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            // the upstream status and body go back to the caller untouched
            ApiError::Upstream { status, body } => {
                return (
                    *status,
                    [(header::CONTENT_TYPE, "application/json")],
                    body.clone(),
                )
                    .into_response();
            }
            ApiError::Http(_) | ApiError::Decode(_) | ApiError::MissingField(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidSlug(_) => StatusCode::BAD_REQUEST,
            ApiError::Io(_) | ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            crate::warning!("{}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
