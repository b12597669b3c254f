//! Reusable OpenAPI response types for consistent API documentation.

use super::{InternalErrorBody, MessageBody, NotFoundBody, ValidationBody};
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Unhandled server error",
    content_type = "application/json",
    example = json!({
        "message": "An unexpected error occurred.",
        "error": "connection refused"
    })
)]
pub struct InternalServerErrorResponse(pub InternalErrorBody);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - payload validation failed",
    content_type = "application/json",
    example = json!({
        "errors": [{
            "field": "status",
            "message": "Status must be one of: NotStarted, InProgress, Completed",
            "value": "Archived",
            "location": "body"
        }]
    })
)]
pub struct BadRequestValidationResponse(pub ValidationBody);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - missing or malformed parameter",
    content_type = "application/json",
    example = json!({ "message": "id is required" })
)]
pub struct BadRequestResponse(pub MessageBody);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({ "code": 404, "message": "Project with ID 1 not found" })
)]
pub struct NotFoundResponse(pub NotFoundBody);
