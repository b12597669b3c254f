use std::sync::Arc;

use crate::error::{ProjectError, ProjectResult};
use crate::models::{ListQuery, Project, ProjectFilter, ProjectInput, SearchQuery};
use crate::repository::ProjectRepository;

/// Service layer for Project business logic
#[derive(Clone)]
pub struct ProjectService<R: ProjectRepository> {
    repository: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new project. Duplicate names are allowed.
    pub async fn create_project(&self, input: ProjectInput) -> ProjectResult<Project> {
        self.repository.create(input).await
    }

    /// List non-deleted projects, optionally by status, ordered by due date.
    ///
    /// An unknown status is rejected; an unknown sort value is ignored.
    pub async fn list_projects(&self, query: ListQuery) -> ProjectResult<Vec<Project>> {
        let filter = ProjectFilter::try_from(query)?;
        self.repository.list(filter).await
    }

    /// Get a non-deleted project by ID
    pub async fn get_project(&self, id: i32) -> ProjectResult<Project> {
        self.repository
            .find_active(id)
            .await?
            .ok_or(ProjectError::NotFound(id))
    }

    /// Overwrite all mutable fields of a non-deleted project
    pub async fn update_project(&self, id: i32, input: ProjectInput) -> ProjectResult<Project> {
        let mut project = self.get_project(id).await?;
        project.apply_input(input);
        self.repository.save(project).await
    }

    /// Flag a project as deleted.
    ///
    /// The lookup ignores the deletion flag, so deleting twice succeeds and
    /// returns the record both times.
    pub async fn soft_delete_project(&self, id: i32) -> ProjectResult<Project> {
        let mut project = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id))?;
        project.mark_deleted();
        self.repository.save(project).await
    }

    /// Case-insensitive name search over non-deleted projects.
    ///
    /// An empty result is reported as not found.
    pub async fn search_projects(&self, query: SearchQuery) -> ProjectResult<Vec<Project>> {
        let term = query
            .search
            .filter(|s| !s.is_empty())
            .ok_or(ProjectError::MissingSearch)?;

        let projects = self
            .repository
            .list(ProjectFilter {
                name_contains: Some(term),
                ..Default::default()
            })
            .await?;

        if projects.is_empty() {
            return Err(ProjectError::NoSearchMatches);
        }
        Ok(projects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectStatus, SortOrder};
    use crate::repository::MockProjectRepository;
    use chrono::{NaiveDate, Utc};
    use mockall::predicate::eq;

    fn project(id: i32, is_deleted: bool) -> Project {
        let now = Utc::now();
        Project {
            id,
            name: "Website".into(),
            description: Some("Landing page".into()),
            status: ProjectStatus::NotStarted,
            due_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            created_at: now,
            updated_at: now,
            is_deleted,
        }
    }

    fn input() -> ProjectInput {
        ProjectInput {
            name: "Renamed".into(),
            description: None,
            status: ProjectStatus::Completed,
            due_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_get_missing_project_is_not_found() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_find_active()
            .with(eq(5))
            .returning(|_| Ok(None));

        let service = ProjectService::new(mock_repo);
        let err = service.get_project(5).await.unwrap_err();
        assert!(matches!(err, ProjectError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_update_missing_project_does_not_save() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_find_active().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProjectService::new(mock_repo);
        let err = service.update_project(9, input()).await.unwrap_err();
        assert!(matches!(err, ProjectError::NotFound(9)));
    }

    #[tokio::test]
    async fn test_update_overwrites_fields_and_saves() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_find_active()
            .with(eq(1))
            .returning(|id| Ok(Some(project(id, false))));
        mock_repo
            .expect_save()
            .withf(|p| p.name == "Renamed" && p.description.is_none() && !p.is_deleted)
            .times(1)
            .returning(Ok);

        let service = ProjectService::new(mock_repo);
        let updated = service.update_project(1, input()).await.unwrap();
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn test_soft_delete_uses_primary_key_lookup() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_find_active().never();
        mock_repo
            .expect_find_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(project(id, true))));
        mock_repo
            .expect_save()
            .withf(|p| p.is_deleted)
            .times(1)
            .returning(Ok);

        let service = ProjectService::new(mock_repo);
        let deleted = service.soft_delete_project(4).await.unwrap();
        assert!(deleted.is_deleted);
    }

    #[tokio::test]
    async fn test_soft_delete_unknown_id_is_not_found() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = ProjectService::new(mock_repo);
        assert!(matches!(
            service.soft_delete_project(77).await,
            Err(ProjectError::NotFound(77))
        ));
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_status_without_querying() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_list().never();

        let service = ProjectService::new(mock_repo);
        let err = service
            .list_projects(ListQuery {
                status: Some("Archived".into()),
                sort: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::InvalidStatus));
    }

    #[tokio::test]
    async fn test_list_passes_filter_through() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_list()
            .with(eq(ProjectFilter {
                status: Some(ProjectStatus::InProgress),
                name_contains: None,
                sort: SortOrder::Desc,
            }))
            .returning(|_| Ok(vec![]));

        let service = ProjectService::new(mock_repo);
        let projects = service
            .list_projects(ListQuery {
                status: Some("InProgress".into()),
                sort: Some("desc".into()),
            })
            .await
            .unwrap();
        assert!(projects.is_empty());
    }

    #[tokio::test]
    async fn test_search_requires_term() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo.expect_list().never();

        let service = ProjectService::new(mock_repo);
        for search in [None, Some(String::new())] {
            let err = service
                .search_projects(SearchQuery { search })
                .await
                .unwrap_err();
            assert!(matches!(err, ProjectError::MissingSearch));
        }
    }

    #[tokio::test]
    async fn test_search_without_matches_is_not_found() {
        let mut mock_repo = MockProjectRepository::new();
        mock_repo
            .expect_list()
            .withf(|f| f.name_contains.as_deref() == Some("proj"))
            .returning(|_| Ok(vec![]));

        let service = ProjectService::new(mock_repo);
        let err = service
            .search_projects(SearchQuery {
                search: Some("proj".into()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ProjectError::NoSearchMatches));
    }
}
