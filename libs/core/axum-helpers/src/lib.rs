//! # Axum Helpers
//!
//! HTTP plumbing shared by the domain routers and the API binary.
//!
//! ## Modules
//!
//! - **[`errors`]**: `AppError`, the JSON error envelopes and the panic/404 handlers
//! - **[`response`]**: the `{ message, data }` success envelope
//! - **[`extractors`]**: integer id path extractor, validated JSON body
//! - **[`server`]**: router composition, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header middleware
//! - **[`audit`]**: structured audit events for mutations
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await?;
//!     Ok(())
//! }
//! ```

pub mod audit;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod response;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, create_production_app, create_router, health_router,
    run_health_checks,
};

// Re-export HTTP middleware
pub use http::{cors_layer_from_env, security_headers};

// Re-export error and response types
pub use errors::{AppError, FieldError};
pub use response::ApiResponse;

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};

// Re-export audit types
pub use audit::{AuditEvent, extract_ip_from_headers, extract_user_agent};
