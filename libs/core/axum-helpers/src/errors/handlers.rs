use std::any::Any;

use axum::response::Response;

use super::{messages, internal_error_response, not_found_response};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    not_found_response(messages::ROUTE_NOT_FOUND.to_string())
}

/// Turns a panic caught by `CatchPanicLayer` into the generic 500 envelope.
///
/// ```ignore
/// use tower_http::catch_panic::CatchPanicLayer;
///
/// let app = router.layer(CatchPanicLayer::custom(handle_panic));
/// ```
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        messages::UNKNOWN_ERROR.to_string()
    };

    tracing::error!(panic = %details, "Request handler panicked");
    internal_error_response(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_handle_panic_string_payload() {
        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], messages::INTERNAL_ERROR);
        assert_eq!(body["error"], "boom");
    }

    #[tokio::test]
    async fn test_handle_panic_opaque_payload() {
        let response = handle_panic(Box::new(42_u8));
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], messages::UNKNOWN_ERROR);
    }

    #[tokio::test]
    async fn test_not_found_fallback() {
        let response = not_found().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
