use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Projects API",
        version = "0.1.0",
        description = "Create, list, search, update and soft delete projects"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/projects", api = domain_projects::ApiDoc)
    )
)]
pub struct ApiDoc;
