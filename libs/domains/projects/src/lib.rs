//! Projects Domain
//!
//! CRUD over `project` records with soft deletion, status filtering,
//! due-date ordering and case-insensitive name search.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit events
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Lookups, not-found rules, soft delete
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Project, ProjectStatus, validated input
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_projects::{
//!     handlers,
//!     repository::InMemoryProjectRepository,
//!     service::ProjectService,
//! };
//!
//! let repository = InMemoryProjectRepository::new();
//! let service = ProjectService::new(repository);
//!
//! // Mount under /api/projects
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod validation;

pub use error::{ProjectError, ProjectResult};
pub use handlers::ApiDoc;
pub use models::{
    ListQuery, Project, ProjectFilter, ProjectInput, ProjectStatus, SearchQuery, SortOrder,
};
pub use postgres::PgProjectRepository;
pub use repository::{InMemoryProjectRepository, ProjectRepository};
pub use service::ProjectService;
pub use validation::ProjectPayload;
