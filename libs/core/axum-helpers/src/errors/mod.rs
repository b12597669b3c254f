pub mod handlers;
pub mod messages;
pub mod responses;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body for plain client errors: `{ "message": "..." }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

/// Body for 404 responses: `{ "code": 404, "message": "..." }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct NotFoundBody {
    pub code: u16,
    pub message: String,
}

/// Body for rejected payloads: `{ "errors": [...] }`, one entry per failing field.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationBody {
    pub errors: Vec<FieldError>,
}

/// A single failing field of a request payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending field
    pub field: String,
    /// Human-readable reason
    pub message: String,
    /// The value that was received, when there was one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Where the field was read from (always `body` for JSON payloads)
    pub location: String,
}

/// Body for unhandled failures:
/// `{ "message": "An unexpected error occurred.", "error": "<raw error>" }`.
#[derive(Debug, Serialize, ToSchema)]
pub struct InternalErrorBody {
    pub message: String,
    pub error: String,
}

/// Application error type that can be converted to HTTP responses.
///
/// Client-side conditions (bad input, missing records) are reported with a
/// precise message. Everything else ends up in [`AppError::Internal`], which
/// renders the generic 500 envelope carrying only the raw error string.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// A query parameter carried a value outside its closed set. Reported as
    /// 404 to stay compatible with existing clients.
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(e) => {
                let errors = field_errors(&e);
                tracing::info!(fields = errors.len(), "Validation error: {}", e);
                (StatusCode::BAD_REQUEST, Json(ValidationBody { errors })).into_response()
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                message_response(StatusCode::BAD_REQUEST, e.body_text())
            }
            AppError::BadRequest(message) => {
                tracing::info!("Bad request: {}", message);
                message_response(StatusCode::BAD_REQUEST, message)
            }
            AppError::InvalidQuery(message) => {
                tracing::info!("Invalid query parameter: {}", message);
                not_found_response(message)
            }
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                not_found_response(message)
            }
            AppError::Internal(error) => {
                tracing::error!("Unhandled error: {}", error);
                internal_error_response(error)
            }
        }
    }
}

/// Flattens validator output into an ordered list of field errors.
///
/// Fields are sorted by name so responses are stable; every error recorded for
/// a field is kept.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |err| FieldError {
                field: field.clone(),
                message: err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string()),
                value: err.params.get("value").cloned(),
                location: "body".to_string(),
            })
        })
        .collect()
}

pub(crate) fn message_response(status: StatusCode, message: String) -> Response {
    (status, Json(MessageBody { message })).into_response()
}

pub(crate) fn not_found_response(message: String) -> Response {
    let body = NotFoundBody {
        code: StatusCode::NOT_FOUND.as_u16(),
        message,
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

pub(crate) fn internal_error_response(error: String) -> Response {
    let body = InternalErrorBody {
        message: messages::INTERNAL_ERROR.to_string(),
        error,
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use validator::ValidationError;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_envelope_carries_code() {
        let response = AppError::NotFound("Project with ID 7 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({ "code": 404, "message": "Project with ID 7 not found" })
        );
    }

    #[tokio::test]
    async fn test_invalid_query_is_reported_as_not_found() {
        let response = AppError::InvalidQuery("Invalid status value.".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["code"], 404);
    }

    #[tokio::test]
    async fn test_bad_request_envelope_is_message_only() {
        let response = AppError::BadRequest("id is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await, json!({ "message": "id is required" }));
    }

    #[tokio::test]
    async fn test_internal_error_keeps_raw_error_string() {
        let response = AppError::Internal("connection reset by peer".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "message": "An unexpected error occurred.",
                "error": "connection reset by peer"
            })
        );
    }

    #[tokio::test]
    async fn test_validation_lists_every_field_sorted() {
        let mut errors = ValidationErrors::new();
        let mut status = ValidationError::new("enum");
        status.message = Some("Status must be one of: A, B".into());
        status.add_param("value".into(), &"Archived");
        errors.add("status", status);
        let mut name = ValidationError::new("required");
        name.message = Some("Project name is required".into());
        errors.add("name", name);

        let response = AppError::Validation(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        let list = body["errors"].as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["field"], "name");
        assert!(list[0].get("value").is_none());
        assert_eq!(list[1]["field"], "status");
        assert_eq!(list[1]["value"], "Archived");
        assert_eq!(list[1]["location"], "body");
    }
}
