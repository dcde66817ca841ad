use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Execution error: {0}")]
    Execution(#[from] code_exec::Error),
    #[error("Assistant error: {0}")]
    Assistant(#[from] ai_proxy::Error),
    #[error("Server error: {0}")]
    ServerError(String),
}

impl ServerError {
    pub fn code_not_found() -> Self {
        ServerError::NotFound("Code not found".to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, json!({ "message": message })),
            ServerError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            ServerError::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            ServerError::Execution(e) => execution_response(e),
            ServerError::Assistant(e) => assistant_response(e),
            ServerError::ServerError(message) => {
                error!("Internal error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// "We could not run your code" responses. A program that ran and failed
/// never gets here; it is a 200 with a populated `error` field.
fn execution_response(e: code_exec::Error) -> (StatusCode, serde_json::Value) {
    use code_exec::Error;

    match e {
        Error::Validation(message) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
        Error::Configuration(message) => {
            error!("Execution misconfigured: {}", message);
            (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
        }
        Error::Submission(source) => {
            error!("Judge submission failed: {}", source);
            (
                StatusCode::BAD_GATEWAY,
                json!({ "error": "Code execution failed", "details": source.to_string() }),
            )
        }
        Error::Timeout { .. } => (
            StatusCode::REQUEST_TIMEOUT,
            json!({ "error": "Code execution timeout" }),
        ),
        Error::Cancelled => (
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": "Code execution cancelled" }),
        ),
    }
}

fn assistant_response(e: ai_proxy::Error) -> (StatusCode, serde_json::Value) {
    use ai_proxy::Error;

    let status = match &e {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        Error::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        Error::Provider(_) => StatusCode::BAD_GATEWAY,
        Error::ModelUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    if status.is_server_error() {
        error!("AI request failed: {:?}", e);
    }

    (status, json!({ "message": e.to_string() }))
}
