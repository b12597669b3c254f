use axum::{
    Router,
    extract::{Query, State},
    http::HeaderMap,
    routing::get,
};
use axum_helpers::{
    ApiResponse, AuditEvent, IdPath, ValidatedJson,
    errors::responses::{
        BadRequestResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    extract_ip_from_headers, extract_user_agent,
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProjectResult;
use crate::models::{ListQuery, Project, ProjectInput, ProjectStatus, SearchQuery};
use crate::repository::ProjectRepository;
use crate::service::ProjectService;
use crate::validation::ProjectPayload;

pub const TAG: &str = "projects";

/// Raw query pairs, so repeated keys reach the domain instead of failing extraction.
type RawQuery = Query<Vec<(String, String)>>;

/// OpenAPI documentation for Projects API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_projects,
        create_project,
        search_projects,
        get_project,
        update_project,
        delete_project,
    ),
    components(
        schemas(Project, ProjectStatus, ProjectPayload),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Project management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the project router with all HTTP endpoints
pub fn router<R: ProjectRepository + 'static>(service: ProjectService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_projects).post(create_project))
        .route("/search", get(search_projects))
        .route(
            "/{id}",
            get(get_project).put(update_project).delete(delete_project),
        )
        .with_state(shared_service)
}

fn audit(action: &str, project: &Project, headers: &HeaderMap) {
    AuditEvent::new(action, Some(format!("project:{}", project.id)))
        .with_ip(extract_ip_from_headers(headers))
        .with_user_agent(extract_user_agent(headers))
        .with_details(json!({
            "project_name": project.name,
            "status": project.status.to_string(),
            "is_deleted": project.is_deleted,
        }))
        .log();
}

/// List projects, optionally filtered by status
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ListQuery),
    responses(
        (status = 201, description = "Projects fetched successfully", body = ApiResponse<Vec<Project>>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_projects<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    Query(params): RawQuery,
) -> ProjectResult<ApiResponse<Vec<Project>>> {
    let query = ListQuery::from_pairs(&params)?;
    let projects = service.list_projects(query).await?;
    Ok(ApiResponse::new("Projects fetched successfully", projects))
}

/// Create a new project
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project created successfully!", body = ApiResponse<Project>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ProjectPayload>,
) -> ProjectResult<ApiResponse<Project>> {
    let input = ProjectInput::try_from(payload)?;
    let project = service.create_project(input).await?;

    audit("project.create", &project, &headers);
    Ok(ApiResponse::new("Project created successfully!", project))
}

/// Case-insensitive search by project name
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 201, description = "Projects retrieved successfully!", body = ApiResponse<Vec<Project>>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_projects<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    Query(params): RawQuery,
) -> ProjectResult<ApiResponse<Vec<Project>>> {
    let projects = service
        .search_projects(SearchQuery::from_pairs(&params))
        .await?;
    Ok(ApiResponse::new("Projects retrieved successfully!", projects))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 201, description = "Project fetched successfully", body = ApiResponse<Project>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    IdPath(id): IdPath,
) -> ProjectResult<ApiResponse<Project>> {
    let project = service.get_project(id).await?;
    Ok(ApiResponse::new("Project fetched successfully", project))
}

/// Replace name, description, status and due date of a project
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    request_body = ProjectPayload,
    responses(
        (status = 201, description = "Project updated successfully", body = ApiResponse<Project>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    ValidatedJson(payload): ValidatedJson<ProjectPayload>,
) -> ProjectResult<ApiResponse<Project>> {
    let input = ProjectInput::try_from(payload)?;
    let project = service.update_project(id, input).await?;

    audit("project.update", &project, &headers);
    Ok(ApiResponse::new("Project updated successfully", project))
}

/// Soft delete a project
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i32, Path, description = "Project ID")
    ),
    responses(
        (status = 201, description = "Project soft deleted successfully", body = ApiResponse<Project>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_project<R: ProjectRepository>(
    State(service): State<Arc<ProjectService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> ProjectResult<ApiResponse<Project>> {
    let project = service.soft_delete_project(id).await?;

    audit("project.delete", &project, &headers);
    Ok(ApiResponse::new("Project soft deleted successfully", project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProjectRepository;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn call(router: Router, method: &str, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn untouchable_repo() -> MockProjectRepository {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_find_active().never();
        mock_repo.expect_find_by_id().never();
        mock_repo.expect_save().never();
        mock_repo
    }

    #[tokio::test]
    async fn test_blank_id_rejected_before_storage() {
        let router = router(ProjectService::new(untouchable_repo()));
        let (status, body) = call(router, "GET", "/%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "id is required");
    }

    #[tokio::test]
    async fn test_non_numeric_id_rejected_before_storage() {
        for method in ["GET", "DELETE"] {
            let router = router(ProjectService::new(untouchable_repo()));
            let (status, body) = call(router, method, "/abc").await;

            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["message"], "Invalid id: abc");
        }
    }

    #[tokio::test]
    async fn test_storage_failure_renders_generic_envelope() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_find_active().returning(|_| {
            Err(crate::error::ProjectError::Storage(sea_orm::DbErr::Custom(
                "connection reset".into(),
            )))
        });

        let (status, body) = call(router(ProjectService::new(mock_repo)), "GET", "/1").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An unexpected error occurred.");
        assert!(body["error"].as_str().unwrap().contains("connection reset"));
    }

    #[test]
    fn test_openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"".to_string()));
        assert!(paths.contains(&"/search".to_string()));
        assert!(paths.contains(&"/{id}".to_string()));
    }
}
