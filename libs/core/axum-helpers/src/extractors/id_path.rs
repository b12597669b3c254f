//! Integer id path parameter extractor.

use crate::errors::{AppError, messages};
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};

/// Extractor for `/{id}` path parameters holding a numeric primary key.
///
/// Rejects with `400 { "message": ... }` before the handler runs when the id
/// is blank or not an integer.
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_project(IdPath(id): IdPath) -> String {
///     format!("Project {}", id)
/// }
///
/// let app = Router::new().route("/{id}", get(get_project));
/// ```
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;

        parse_id(&raw)
            .map(IdPath)
            .map_err(IntoResponse::into_response)
    }
}

/// Parses a raw id, trimming surrounding whitespace.
pub fn parse_id(raw: &str) -> Result<i32, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(messages::ID_REQUIRED.to_string()));
    }

    trimmed
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest(format!("Invalid id: {}", trimmed)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_id_blank_is_required_error() {
        for raw in ["", "   "] {
            match parse_id(raw) {
                Err(AppError::BadRequest(msg)) => assert_eq!(msg, messages::ID_REQUIRED),
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_id_rejects_non_numeric() {
        match parse_id("abc") {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Invalid id: abc"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
