//! JSON extractor with automatic validation using the validator crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Runs `Validate::validate` on the decoded body and rejects with
/// `400 { "errors": [...] }` listing every failing field. Bodies that are not
/// JSON objects of the expected shape are rejected with `400 { "message" }`.
///
/// ```ignore
/// use axum::{Router, routing::post};
/// use axum_helpers::extractors::ValidatedJson;
///
/// async fn create(ValidatedJson(payload): ValidatedJson<ProjectPayload>) -> String {
///     format!("{:?}", payload)
/// }
///
/// let app = Router::new().route("/", post(create));
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::Validation(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}
